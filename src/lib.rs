//! Pinu Adventure - A tile-based side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level flow)
//! - `platform`: Input, render and frame-loop seams for the host engine
//! - `audio`: Sound effect mapping and playback sink
//! - `settings`: Data-driven tuning constants
//! - `error`: Configuration and level loading errors

pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{LevelError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the physics constants are per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Window size in pixels
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 550.0;

    /// Minimum distance kept between the player and each screen edge
    pub const LEFT_VIEWPORT_MARGIN: f32 = 200.0;
    pub const RIGHT_VIEWPORT_MARGIN: f32 = 200.0;
    pub const BOTTOM_VIEWPORT_MARGIN: f32 = 150.0;
    pub const TOP_VIEWPORT_MARGIN: f32 = 100.0;

    /// Tile sprites are 128px drawn at half scale
    pub const SPRITE_PIXEL_SIZE: f32 = 128.0;
    pub const TILE_SCALING: f32 = 0.5;
    pub const GRID_PIXEL_SIZE: f32 = SPRITE_PIXEL_SIZE * TILE_SCALING;

    /// Player movement, pixels per frame
    pub const PLAYER_MOVEMENT_SPEED: f32 = 5.0;
    pub const GRAVITY: f32 = 1.0;
    pub const PLAYER_JUMP_SPEED: f32 = 20.0;
    /// Mid-air (or low-gravity) jumps get this fraction of the full jump
    pub const REDUCED_JUMP_DIVISOR: f32 = 5.0;
    /// Fall speed cap, kept below the tile size so bodies cannot tunnel
    pub const TERMINAL_VELOCITY: f32 = 30.0;

    /// Player spawn (bottom-left corner)
    pub const PLAYER_START_X: f32 = 128.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    pub const PLAYER_WIDTH: f32 = 56.0;
    pub const PLAYER_HEIGHT: f32 = 90.0;

    /// The player's center falling below this height respawns them
    pub const FALL_DEPTH: f32 = -100.0;

    /// Number of levels in the built-in campaign
    pub const LEVELS: u32 = 3;
}
