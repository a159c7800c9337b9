//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock time
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or input dependencies

pub mod aabb;
pub mod camera;
pub mod level;
pub mod patrol;
pub mod physics;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use camera::Camera;
pub use level::{
    BuiltinLevels, Decoration, HazardDef, HazardSpawn, LevelData, LevelFile, LevelSource,
    ReflectSurface,
};
pub use patrol::PatrolHazard;
pub use physics::{Body, PlatformerPhysics, StepOutcome};
pub use state::{
    Collectible, EntityKind, EntityStore, GameEvent, GamePhase, GameState, Player,
};
pub use tick::{TickInput, tick};
