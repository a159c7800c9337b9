//! Game state and entity store
//!
//! `GameState` owns the active level and everything spawned from it. Loading
//! a new level replaces all of it; nothing from the previous level survives.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::camera::Camera;
use super::level::{LevelData, LevelSource};
use super::patrol::PatrolHazard;
use super::physics::{Body, PlatformerPhysics};
use crate::settings::Settings;
use crate::LevelError;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Defeated by a hazard, waiting for restart
    GameOver,
    /// Final level cleared, waiting for restart
    Victory,
}

impl GamePhase {
    /// Both end states wait for a restart click
    pub fn is_over(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Things that happened during a tick, for sound and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Collected,
    Jumped,
    Defeated,
    Fell,
    TouchedHazard,
    Victory,
    LevelAdvanced { level: u32 },
    Restarted { level: u32 },
}

/// Tag for anything drawn from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Collectible,
    PatrolHazard,
    StaticObstacle,
    LethalTile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}

/// One-shot pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub bounds: Aabb,
}

/// Everything spawned for the active level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    pub player: Player,
    /// Sorted by id
    pub collectibles: Vec<Collectible>,
    /// Sorted by id
    pub hazards: Vec<PatrolHazard>,
    pub obstacles: Vec<Aabb>,
    pub lethal_tiles: Vec<Aabb>,
}

/// Complete session state
pub struct GameState {
    pub settings: Settings,
    /// 1-based index of the active level
    pub level_index: u32,
    pub score: u32,
    pub phase: GamePhase,
    /// Bottom-left world coordinate currently displayed
    pub viewport_origin: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub level: LevelData,
    pub entities: EntityStore,
    pub physics: PlatformerPhysics,
    pub camera: Camera,
    /// Every level of the campaign, loaded and checked up front
    levels: Vec<LevelData>,
    /// Next entity ID
    next_id: u32,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("level_index", &self.level_index)
            .field("score", &self.score)
            .field("phase", &self.phase)
            .field("viewport_origin", &self.viewport_origin)
            .field("time_ticks", &self.time_ticks)
            .field("level", &self.level.name)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Start a session at level 1.
    ///
    /// Every level is loaded and spawn-checked here, so a bad level fails
    /// the session before play instead of in the middle of a frame.
    pub fn new(settings: Settings, source: impl LevelSource) -> Result<Self, LevelError> {
        let found = source.level_count();
        if found != settings.total_levels {
            return Err(LevelError::CountMismatch {
                expected: settings.total_levels,
                found,
            });
        }

        let levels = (1..=found)
            .map(|index| -> Result<LevelData, LevelError> {
                let level = source.load_level(index)?;
                check_spawn(&settings, &level, index)?;
                Ok(level)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let level = levels.first().cloned().ok_or(LevelError::UnknownLevel {
            index: 1,
            count: found,
        })?;

        let physics = PlatformerPhysics::new(
            level.gravity.unwrap_or(settings.gravity),
            settings.terminal_velocity,
        );
        let player = Player {
            body: Body::new(settings.player_start, settings.player_size),
        };
        let mut state = Self {
            camera: Camera::from_settings(&settings),
            level_index: 1,
            score: 0,
            phase: GamePhase::Playing,
            viewport_origin: Vec2::ZERO,
            time_ticks: 0,
            entities: EntityStore {
                player,
                collectibles: Vec::new(),
                hazards: Vec::new(),
                obstacles: Vec::new(),
                lethal_tiles: Vec::new(),
            },
            physics,
            level,
            settings,
            levels,
            next_id: 1,
        };
        state.install(1, state.level.clone());
        Ok(state)
    }

    /// Total number of levels (`L`)
    pub fn level_count(&self) -> u32 {
        self.settings.total_levels
    }

    pub fn is_final_level(&self) -> bool {
        self.level_index >= self.level_count()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Install level `index` and replace every entity with a fresh spawn.
    ///
    /// On error nothing is modified.
    pub fn setup(&mut self, index: u32) -> Result<(), LevelError> {
        let level = index
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .cloned()
            .ok_or(LevelError::UnknownLevel {
                index,
                count: self.level_count(),
            })?;
        self.install(index, level);
        Ok(())
    }

    fn install(&mut self, index: u32, level: LevelData) {
        let collectibles = level
            .collectibles
            .iter()
            .map(|&bounds| Collectible {
                id: self.next_entity_id(),
                bounds,
            })
            .collect();
        let hazards = level
            .hazards
            .iter()
            .map(|def| PatrolHazard::spawn(self.next_entity_id(), def))
            .collect();

        self.entities = EntityStore {
            player: Player {
                body: Body::new(self.settings.player_start, self.settings.player_size),
            },
            collectibles,
            hazards,
            obstacles: level.obstacles.clone(),
            lethal_tiles: level.lethal_tiles.clone(),
        };
        self.physics = PlatformerPhysics::new(
            level.gravity.unwrap_or(self.settings.gravity),
            self.settings.terminal_velocity,
        );
        self.level_index = index;
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.viewport_origin = Vec2::ZERO;

        log::info!(
            "Level {} \"{}\": {} obstacles, {} collectibles, {} hazards, end at x={}",
            index,
            level.name,
            self.entities.obstacles.len(),
            self.entities.collectibles.len(),
            self.entities.hazards.len(),
            level.end_of_level
        );
        self.level = level;
    }

    /// Put the player back at the start of the level
    pub fn respawn_player(&mut self) {
        self.entities.player.body = Body::new(self.settings.player_start, self.settings.player_size);
        self.physics.reset();
        self.viewport_origin = Vec2::ZERO;
    }

    /// Leave an end state: back to level 1 after a win, same level otherwise
    pub fn restart(&mut self) -> Result<(), LevelError> {
        let index = match self.phase {
            GamePhase::Victory => 1,
            _ => self.level_index,
        };
        log::info!("Restarting at level {}", index);
        self.setup(index)
    }

    /// Whether the player touched the level's right edge
    pub fn reached_end(&self) -> bool {
        self.entities.player.bounds().right >= self.level.end_of_level
    }
}

fn check_spawn(settings: &Settings, level: &LevelData, index: u32) -> Result<(), LevelError> {
    let spawn = Aabb::from_pos_size(settings.player_start, settings.player_size);
    if level.obstacles.iter().any(|o| o.overlaps(&spawn)) {
        return Err(LevelError::SpawnBlocked { index });
    }
    Ok(())
}
