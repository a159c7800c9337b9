//! Platform abstraction layer
//!
//! The simulation knows nothing about windows, speakers or keyboards. A host
//! plugs in three capabilities:
//! - `InputSource` for the per-frame input snapshot
//! - `AudioSink` for sound effects
//! - `RenderSink` for drawing a `RenderFrame`
//!
//! `Game` wires them to the fixed-step simulation.

pub mod input;
pub mod render;

pub use input::{Action, InputLatch, InputSnapshot, ScriptedInput};
pub use render::{LogRender, Overlay, RenderFrame, Sprite, SpriteKind};

use crate::LevelError;
use crate::audio::{AudioManager, AudioSink};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Supplies one input snapshot per host frame
pub trait InputSource {
    fn poll_input(&mut self) -> InputSnapshot;
}

/// Draws a finished frame
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame);
}

/// A running game bound to its host capabilities
pub struct Game<I, A, R> {
    pub state: GameState,
    input: I,
    audio: AudioManager<A>,
    render: R,
    accumulator: f32,
    /// Input carried into the next simulation step
    pending: TickInput,
}

impl<I: InputSource, A: AudioSink, R: RenderSink> Game<I, A, R> {
    pub fn new(state: GameState, input: I, audio: A, render: R) -> Self {
        let audio = AudioManager::from_settings(audio, &state.settings);
        Self {
            state,
            input,
            audio,
            render,
            accumulator: 0.0,
            pending: TickInput::default(),
        }
    }

    /// Run exactly one simulation step and draw it
    pub fn frame(&mut self) -> Result<Vec<GameEvent>, LevelError> {
        self.poll();
        let events = self.step()?;
        self.present(&events);
        Ok(events)
    }

    /// Advance by wall-clock time, running as many fixed steps as are due
    pub fn update(&mut self, dt: f32) -> Result<Vec<GameEvent>, LevelError> {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;
        self.poll();

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.step()?);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.present(&events);
        Ok(events)
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }

    pub fn renderer(&self) -> &R {
        &self.render
    }

    fn poll(&mut self) {
        let snapshot = self.input.poll_input().to_tick_input();
        self.pending.move_x = snapshot.move_x;
        // One-shot inputs wait for the next step that actually runs
        self.pending.jump |= snapshot.jump;
        self.pending.restart |= snapshot.restart;
    }

    fn step(&mut self) -> Result<Vec<GameEvent>, LevelError> {
        let events = tick(&mut self.state, &self.pending)?;

        // Clear one-shot inputs after processing
        self.pending.jump = false;
        self.pending.restart = false;
        Ok(events)
    }

    fn present(&mut self, events: &[GameEvent]) {
        self.audio.handle_events(events);
        self.render.render(&RenderFrame::capture(&self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::settings::Settings;
    use crate::sim::{BuiltinLevels, GamePhase};

    struct Frames(Vec<RenderFrame>);

    impl RenderSink for Frames {
        fn render(&mut self, frame: &RenderFrame) {
            self.0.push(frame.clone());
        }
    }

    fn game<I: InputSource>(input: I) -> Game<I, Vec<SoundEffect>, Frames> {
        let state = GameState::new(Settings::default(), BuiltinLevels::new(64.0)).unwrap();
        Game::new(state, input, Vec::new(), Frames(Vec::new()))
    }

    #[test]
    fn test_frame_runs_one_tick_and_renders() {
        let mut game = game(InputLatch::new());
        game.frame().unwrap();
        game.frame().unwrap();
        assert_eq!(game.state.time_ticks, 2);
        assert_eq!(game.renderer().0.len(), 2);
    }

    #[test]
    fn test_update_substeps_are_capped() {
        let mut game = game(InputLatch::new());
        // 0.1s clamp at 60Hz would be 6 steps; capped at 4
        game.update(1.0).unwrap();
        assert_eq!(game.state.time_ticks, MAX_SUBSTEPS as u64);
        assert_eq!(game.renderer().0.len(), 1);
    }

    #[test]
    fn test_update_accumulates_short_frames() {
        let mut game = game(InputLatch::new());
        game.update(SIM_DT * 0.6).unwrap();
        assert_eq!(game.state.time_ticks, 0);
        game.update(SIM_DT * 0.6).unwrap();
        assert_eq!(game.state.time_ticks, 1);
    }

    #[test]
    fn test_jump_fires_once_across_substeps() {
        let input = ScriptedInput::new(|frame: u64| InputSnapshot {
            jump_pressed: frame == 0,
            ..Default::default()
        });
        let mut game = game(input);
        let events = game.update(SIM_DT * 3.0).unwrap();
        let jumps = events.iter().filter(|e| **e == GameEvent::Jumped).count();
        assert_eq!(jumps, 1);
        assert_eq!(game.audio().sink(), &vec![SoundEffect::Jump]);
    }

    #[test]
    fn test_jump_survives_frame_without_steps() {
        let mut game = game(ScriptedInput::new(|frame: u64| InputSnapshot {
            jump_pressed: frame == 0,
            ..Default::default()
        }));
        game.update(0.0).unwrap();
        let events = game.update(SIM_DT).unwrap();
        assert!(events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_restart_click_after_game_over() {
        let mut game = game(ScriptedInput::new(|frame: u64| InputSnapshot {
            restart_clicked: frame == 1,
            ..Default::default()
        }));
        game.state.phase = GamePhase::GameOver;
        game.frame().unwrap();
        assert_eq!(game.state.phase, GamePhase::GameOver);
        let events = game.frame().unwrap();
        assert_eq!(events, vec![GameEvent::Restarted { level: 1 }]);
        assert_eq!(game.state.phase, GamePhase::Playing);
        assert_eq!(game.renderer().0.last().and_then(|f| f.overlay), None);
    }

    #[test]
    fn test_game_over_frame_has_overlay() {
        let mut game = game(InputLatch::new());
        game.state.phase = GamePhase::GameOver;
        game.frame().unwrap();
        let overlay = game.renderer().0[0].overlay.unwrap();
        assert_eq!(overlay.title, "Game Over");
    }
}
