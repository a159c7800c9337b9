//! Sound effects
//!
//! The simulation only reports `GameEvent`s; this module decides which sound
//! each one makes and hands it to whatever can actually play audio.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Collectible picked up
    CollectCoin,
    /// Jump pressed (full or reduced)
    Jump,
    /// Player ran into a patrolling hazard
    EnemyHit,
    /// Player fell off the map
    Fall,
    /// Player touched lethal terrain
    DontTouch,
    /// Final level cleared
    GameOver,
}

impl SoundEffect {
    /// Sound to play for an event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Collected => Some(SoundEffect::CollectCoin),
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Defeated => Some(SoundEffect::EnemyHit),
            GameEvent::Fell => Some(SoundEffect::Fall),
            GameEvent::TouchedHazard => Some(SoundEffect::DontTouch),
            GameEvent::Victory => Some(SoundEffect::GameOver),
            GameEvent::LevelAdvanced { .. } | GameEvent::Restarted { .. } => None,
        }
    }

    /// Asset the platform layer should load for this effect
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::CollectCoin => "sounds/coin1.wav",
            SoundEffect::Jump => "sounds/jump1.wav",
            SoundEffect::EnemyHit => "sounds/hurt3.wav",
            SoundEffect::Fall => "sounds/fall1.wav",
            SoundEffect::DontTouch => "sounds/hit1.wav",
            SoundEffect::GameOver => "sounds/gameover4.wav",
        }
    }

    pub const ALL: [SoundEffect; 6] = [
        SoundEffect::CollectCoin,
        SoundEffect::Jump,
        SoundEffect::EnemyHit,
        SoundEffect::Fall,
        SoundEffect::DontTouch,
        SoundEffect::GameOver,
    ];
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Logs sounds instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: u64,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::debug!("play {} at volume {:.2}", effect.file_name(), volume);
    }
}

impl AudioSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect, _volume: f32) {
        self.push(effect);
    }
}

/// Audio manager for the game
pub struct AudioManager<S> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.muted,
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the sounds for a tick's events, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
