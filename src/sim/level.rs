//! Level data and level files
//!
//! A level file is JSON with the tile geometry drawn as rows of glyphs (top
//! row first) plus a list of patrol hazards in tile units. Everything that
//! differs between levels (gravity, which surfaces hazards bounce off, whether
//! falling respawns, whether full jumps are allowed) lives in the file.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::LevelError;

const OBSTACLE: char = '#';
const COLLECTIBLE: char = 'o';
const LETHAL: char = '^';

/// Built-in campaign, in play order
const BUILTIN_LEVELS: [&str; 3] = [
    include_str!("../../levels/level1.json"),
    include_str!("../../levels/level2.json"),
    include_str!("../../levels/level3.json"),
];

/// Which tiles turn a patrolling hazard around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectSurface {
    #[default]
    Obstacles,
    LethalTiles,
}

/// Hazard spawn as written in a level file (tile units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardSpawn {
    pub sprite: String,
    pub left: f32,
    pub bottom: f32,
    /// Signed horizontal speed, pixels per frame
    pub speed: f32,
    #[serde(default)]
    pub left_bound: Option<f32>,
    #[serde(default)]
    pub right_bound: Option<f32>,
}

/// On-disk level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub name: String,
    #[serde(default)]
    pub gravity: Option<f32>,
    #[serde(default)]
    pub hazard_reflect: ReflectSurface,
    #[serde(default = "default_true")]
    pub respawn_on_fall: bool,
    #[serde(default = "default_true")]
    pub full_jump: bool,
    pub tiles: Vec<String>,
    #[serde(default)]
    pub background: Vec<String>,
    #[serde(default)]
    pub foreground: Vec<String>,
    #[serde(default)]
    pub hazards: Vec<HazardSpawn>,
}

fn default_true() -> bool {
    true
}

impl Default for LevelFile {
    fn default() -> Self {
        Self {
            name: String::new(),
            gravity: None,
            hazard_reflect: ReflectSurface::Obstacles,
            respawn_on_fall: true,
            full_jump: true,
            tiles: Vec::new(),
            background: Vec::new(),
            foreground: Vec::new(),
            hazards: Vec::new(),
        }
    }
}

impl LevelFile {
    /// Level with only tile geometry and default policies
    pub fn with_tiles(rows: &[&str]) -> Self {
        Self {
            tiles: rows.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }
}

/// Purely visual tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub glyph: char,
    pub bounds: Aabb,
}

/// Hazard spawn in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardDef {
    pub sprite: String,
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub left_bound: Option<f32>,
    pub right_bound: Option<f32>,
}

/// One level, resolved to world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    /// Overrides the default gravity when set
    pub gravity: Option<f32>,
    pub hazard_reflect: ReflectSurface,
    pub respawn_on_fall: bool,
    pub full_jump: bool,
    pub obstacles: Vec<Aabb>,
    pub lethal_tiles: Vec<Aabb>,
    pub collectibles: Vec<Aabb>,
    pub background: Vec<Decoration>,
    pub foreground: Vec<Decoration>,
    pub hazards: Vec<HazardDef>,
    /// Reaching this x coordinate with the player's right edge ends the level
    pub end_of_level: f32,
    pub tile_size: f32,
}

impl LevelData {
    /// Resolve a level file against a tile size
    pub fn from_file(file: &LevelFile, tile_size: f32) -> Result<Self, LevelError> {
        if file.tiles.is_empty() {
            return Err(LevelError::Empty);
        }

        let mut obstacles = Vec::new();
        let mut lethal_tiles = Vec::new();
        let mut collectibles = Vec::new();
        for_each_tile(&file.tiles, tile_size, |glyph, bounds, row, column| {
            match glyph {
                OBSTACLE => obstacles.push(bounds),
                COLLECTIBLE => collectibles.push(bounds),
                LETHAL => lethal_tiles.push(bounds),
                glyph => return Err(LevelError::UnknownGlyph { row, column, glyph }),
            }
            Ok(())
        })?;

        let columns = file.tiles.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let end_of_level = columns.saturating_sub(1) as f32 * tile_size;

        let hazards = file
            .hazards
            .iter()
            .map(|h| HazardDef {
                sprite: h.sprite.clone(),
                position: Vec2::new(h.left, h.bottom) * tile_size,
                size: Vec2::splat(tile_size),
                speed: h.speed,
                left_bound: h.left_bound.map(|b| b * tile_size),
                right_bound: h.right_bound.map(|b| b * tile_size),
            })
            .collect();

        Ok(Self {
            name: file.name.clone(),
            gravity: file.gravity,
            hazard_reflect: file.hazard_reflect,
            respawn_on_fall: file.respawn_on_fall,
            full_jump: file.full_jump,
            obstacles,
            lethal_tiles,
            collectibles,
            background: decorations(&file.background, tile_size)?,
            foreground: decorations(&file.foreground, tile_size)?,
            hazards,
            end_of_level,
            tile_size,
        })
    }

    /// Parse a JSON level file; `index` is only used for error reporting
    pub fn parse(index: u32, json: &str, tile_size: f32) -> Result<Self, LevelError> {
        let file: LevelFile =
            serde_json::from_str(json).map_err(|source| LevelError::Malformed { index, source })?;
        Self::from_file(&file, tile_size)
    }

    /// Surfaces that reverse patrolling hazards on this level
    pub fn reflecting_surfaces(&self) -> &[Aabb] {
        match self.hazard_reflect {
            ReflectSurface::Obstacles => &self.obstacles,
            ReflectSurface::LethalTiles => &self.lethal_tiles,
        }
    }
}

/// Visits every non-empty glyph with its world bounds
fn for_each_tile(
    rows: &[String],
    tile_size: f32,
    mut visit: impl FnMut(char, Aabb, usize, usize) -> Result<(), LevelError>,
) -> Result<(), LevelError> {
    let row_count = rows.len();
    for (row, line) in rows.iter().enumerate() {
        let bottom = (row_count - 1 - row) as f32 * tile_size;
        for (column, glyph) in line.chars().enumerate() {
            if glyph == '.' || glyph == ' ' {
                continue;
            }
            let left = column as f32 * tile_size;
            let bounds = Aabb::new(left, left + tile_size, bottom, bottom + tile_size);
            visit(glyph, bounds, row, column)?;
        }
    }
    Ok(())
}

/// Decorative layers accept any glyph
fn decorations(rows: &[String], tile_size: f32) -> Result<Vec<Decoration>, LevelError> {
    let mut out = Vec::new();
    for_each_tile(rows, tile_size, |glyph, bounds, _, _| {
        out.push(Decoration { glyph, bounds });
        Ok(())
    })?;
    Ok(out)
}

/// Provider of level data, 1-based
pub trait LevelSource {
    fn level_count(&self) -> u32;
    fn load_level(&self, index: u32) -> Result<LevelData, LevelError>;
}

/// The levels compiled into the game
#[derive(Debug, Clone, Copy)]
pub struct BuiltinLevels {
    tile_size: f32,
}

impl BuiltinLevels {
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }
}

impl LevelSource for BuiltinLevels {
    fn level_count(&self) -> u32 {
        BUILTIN_LEVELS.len() as u32
    }

    fn load_level(&self, index: u32) -> Result<LevelData, LevelError> {
        let count = self.level_count();
        let json = index
            .checked_sub(1)
            .and_then(|i| BUILTIN_LEVELS.get(i as usize))
            .ok_or(LevelError::UnknownLevel { index, count })?;
        LevelData::parse(index, json, self.tile_size)
    }
}

impl LevelSource for Vec<LevelData> {
    fn level_count(&self) -> u32 {
        self.len() as u32
    }

    fn load_level(&self, index: u32) -> Result<LevelData, LevelError> {
        index
            .checked_sub(1)
            .and_then(|i| self.get(i as usize))
            .cloned()
            .ok_or(LevelError::UnknownLevel {
                index,
                count: self.level_count(),
            })
    }
}
