//! Pinu Adventure entry point
//!
//! Runs the game headless: scripted key presses hold right and hop, sounds and
//! frames go to the log. Usage:
//!
//! ```text
//! pinu-adventure [settings.json] [frames]
//! ```

use std::error::Error;

use pinu_adventure::audio::LogAudio;
use pinu_adventure::platform::{Action, Game, InputLatch, LogRender, ScriptedInput};
use pinu_adventure::sim::{BuiltinLevels, GameState};
use pinu_adventure::Settings;

const DEFAULT_FRAMES: u64 = 3600;
const JUMP_EVERY: u64 = 40;
const LOG_EVERY: u64 = 60;

fn main() {
    env_logger::init();
    log::info!("Pinu Adventure (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) if path != "-" => Settings::load(path)?,
        _ => Settings::default(),
    };
    let frames = match args.next() {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };

    let levels = BuiltinLevels::new(settings.tile_size);
    let state = GameState::new(settings, levels)?;
    let mut latch = InputLatch::new();
    let input = ScriptedInput::new(move |frame: u64| {
        for (key, down) in demo_keys(frame) {
            match Action::from_key_name(key) {
                Some(action) if down => latch.press(action),
                Some(action) => latch.release(action),
                None => log::warn!("unbound key {:?}", key),
            }
        }
        // Only heard on the game over / victory screens
        if frame % 120 == 119 {
            latch.click();
        }
        latch.take()
    });
    let mut game = Game::new(state, input, LogAudio::default(), LogRender::new(LOG_EVERY));

    for _ in 0..frames {
        for event in game.frame()? {
            log::debug!("tick {}: {:?}", game.state.time_ticks, event);
        }
    }

    let state = &game.state;
    log::info!(
        "Finished after {} frames: level {}/{}, score {}, phase {:?}, {} sounds",
        game.renderer().frames,
        state.level_index,
        state.level_count(),
        state.score,
        state.phase,
        game.audio().sink().played
    );
    Ok(())
}

/// Key events for a frame, as a windowing layer would name them
fn demo_keys(frame: u64) -> Vec<(&'static str, bool)> {
    let mut keys = Vec::new();
    if frame == 0 {
        keys.push(("Right", true));
    }
    match frame % JUMP_EVERY {
        0 => keys.push(("W", true)),
        1 => keys.push(("W", false)),
        _ => {}
    }
    keys
}
