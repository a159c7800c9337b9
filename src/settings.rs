//! Game tuning settings
//!
//! Every field falls back to the compiled-in default, so a settings file only
//! needs the values it overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::SettingsError;
use crate::consts::*;

/// Distance kept between the player and each screen edge before scrolling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollMargins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for ScrollMargins {
    fn default() -> Self {
        Self {
            left: LEFT_VIEWPORT_MARGIN,
            right: RIGHT_VIEWPORT_MARGIN,
            top: TOP_VIEWPORT_MARGIN,
            bottom: BOTTOM_VIEWPORT_MARGIN,
        }
    }
}

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub margins: ScrollMargins,

    // === Movement (pixels per frame) ===
    pub movement_speed: f32,
    /// Default gravity, used by levels without an override
    pub gravity: f32,
    pub jump_speed: f32,
    pub reduced_jump_divisor: f32,
    pub terminal_velocity: f32,

    // === Player ===
    pub player_start: Vec2,
    pub player_size: Vec2,
    pub fall_depth: f32,

    // === Levels ===
    pub tile_size: f32,
    pub total_levels: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            margins: ScrollMargins::default(),

            movement_speed: PLAYER_MOVEMENT_SPEED,
            gravity: GRAVITY,
            jump_speed: PLAYER_JUMP_SPEED,
            reduced_jump_divisor: REDUCED_JUMP_DIVISOR,
            terminal_velocity: TERMINAL_VELOCITY,

            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            fall_depth: FALL_DEPTH,

            tile_size: GRID_PIXEL_SIZE,
            total_levels: LEVELS,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(SettingsError::Invalid("screen size must be positive".into()));
        }
        let m = &self.margins;
        if m.left < 0.0 || m.right < 0.0 || m.top < 0.0 || m.bottom < 0.0 {
            return Err(SettingsError::Invalid("scroll margins must not be negative".into()));
        }
        if m.left + m.right >= self.screen_width || m.top + m.bottom >= self.screen_height {
            return Err(SettingsError::Invalid("scroll margins leave no room for the player".into()));
        }
        if self.player_size.x <= 0.0 || self.player_size.y <= 0.0 {
            return Err(SettingsError::Invalid("player size must be positive".into()));
        }
        if self.tile_size <= 0.0 {
            return Err(SettingsError::Invalid("tile size must be positive".into()));
        }
        if self.terminal_velocity <= 0.0 || self.terminal_velocity >= self.tile_size {
            return Err(SettingsError::Invalid(format!(
                "terminal velocity must be in (0, {})",
                self.tile_size
            )));
        }
        if self.reduced_jump_divisor <= 0.0 {
            return Err(SettingsError::Invalid("reduced jump divisor must be positive".into()));
        }
        if self.gravity < 0.0 {
            return Err(SettingsError::Invalid("gravity must not be negative".into()));
        }
        if !(0.0..=1.0).contains(&self.master_volume) || !(0.0..=1.0).contains(&self.sfx_volume) {
            return Err(SettingsError::Invalid("volumes must be between 0 and 1".into()));
        }
        if self.total_levels == 0 {
            return Err(SettingsError::Invalid("at least one level is required".into()));
        }
        Ok(())
    }

    /// Height of a reduced ("double-tap") jump
    pub fn reduced_jump_speed(&self) -> f32 {
        self.jump_speed / self.reduced_jump_divisor
    }
}
