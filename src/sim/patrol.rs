//! Patrolling hazards
//!
//! Hazards slide along x at a constant speed and turn around when they touch
//! a reflecting surface or cross one of their optional bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::level::HazardDef;

/// A hazard that ends the game on contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolHazard {
    pub id: u32,
    pub sprite: String,
    pub position: Vec2,
    pub size: Vec2,
    /// Signed pixels per frame
    pub patrol_speed: f32,
    pub left_bound: Option<f32>,
    pub right_bound: Option<f32>,
}

impl PatrolHazard {
    pub fn spawn(id: u32, def: &HazardDef) -> Self {
        Self {
            id,
            sprite: def.sprite.clone(),
            position: def.position,
            size: def.size,
            patrol_speed: def.speed,
            left_bound: def.left_bound,
            right_bound: def.right_bound,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.position, self.size)
    }

    /// Move one frame along x
    pub fn advance(&mut self) {
        self.position.x += self.patrol_speed;
    }

    /// Reverse direction if touching `surfaces` or outside a bound.
    ///
    /// Flips at most once per frame. Returns true if it flipped.
    pub fn reflect(&mut self, surfaces: &[Aabb]) -> bool {
        let bounds = self.bounds();
        let past_left = self.left_bound.is_some_and(|b| bounds.left < b);
        let past_right = self.right_bound.is_some_and(|b| bounds.right > b);
        let touching = surfaces.iter().any(|s| bounds.overlaps(s));

        if touching || past_left || past_right {
            self.patrol_speed = -self.patrol_speed;
            true
        } else {
            false
        }
    }
}

/// Move every hazard one frame
pub fn advance_all(hazards: &mut [PatrolHazard]) {
    for hazard in hazards {
        hazard.advance();
    }
}

/// Apply reflection rules to every hazard
pub fn reflect_all(hazards: &mut [PatrolHazard], surfaces: &[Aabb]) {
    for hazard in hazards {
        if hazard.reflect(surfaces) {
            log::trace!("hazard {} reversed, speed {}", hazard.id, hazard.patrol_speed);
        }
    }
}
