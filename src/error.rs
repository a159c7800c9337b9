//! Configuration errors
//!
//! Both kinds are fatal at load time: a failed load never installs partial
//! state.

use thiserror::Error;

/// Failure to produce or install a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {index} does not exist (campaign has {count} levels)")]
    UnknownLevel { index: u32, count: u32 },
    #[error("level {index} is malformed: {source}")]
    Malformed {
        index: u32,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown tile glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph { row: usize, column: usize, glyph: char },
    #[error("level has no tile rows")]
    Empty,
    #[error("player spawn overlaps an obstacle in level {index}")]
    SpawnBlocked { index: u32 },
    #[error("expected {expected} levels, level source provides {found}")]
    CountMismatch { expected: u32, found: u32 },
}

/// Failure to load tuning settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}
