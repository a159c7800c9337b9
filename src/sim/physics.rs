//! Platformer physics for the player body
//!
//! Gravity, then horizontal move and push-out, then vertical move and
//! push-out. Resolving x before y keeps the body from snagging on the seams
//! between floor tiles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Tolerance for "resting exactly on top of" an obstacle
const REST_EPSILON: f32 = 0.01;

/// A moving box: bottom-left position, per-frame velocity, fixed size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.position, self.size)
    }
}

/// What the last physics step ran into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub hit_wall: bool,
    pub hit_ceiling: bool,
    pub landed: bool,
}

/// Gravity integrator with axis-separated collision resolution
#[derive(Debug, Clone)]
pub struct PlatformerPhysics {
    pub gravity: f32,
    pub terminal_velocity: f32,
    last: StepOutcome,
}

impl PlatformerPhysics {
    pub fn new(gravity: f32, terminal_velocity: f32) -> Self {
        Self {
            gravity,
            terminal_velocity,
            last: StepOutcome::default(),
        }
    }

    /// Outcome of the most recent `step`
    pub fn last_outcome(&self) -> StepOutcome {
        self.last
    }

    /// Advance `body` by one frame against static `obstacles`
    pub fn step(&mut self, body: &mut Body, obstacles: &[Aabb]) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        body.velocity.y = (body.velocity.y - self.gravity).max(-self.terminal_velocity);

        // Horizontal velocity is input-driven and survives wall contact
        if body.velocity.x != 0.0 {
            body.position.x += body.velocity.x;
            let moving_right = body.velocity.x > 0.0;
            for obstacle in obstacles {
                let bounds = body.bounds();
                if !bounds.overlaps(obstacle) {
                    continue;
                }
                if moving_right {
                    body.position.x = obstacle.left - body.size.x;
                } else {
                    body.position.x = obstacle.right;
                }
                outcome.hit_wall = true;
            }
        }

        body.position.y += body.velocity.y;
        let bounds = body.bounds();
        let hits = obstacles.iter().filter(|o| bounds.overlaps(o));
        if body.velocity.y > 0.0 {
            if let Some(ceiling) = hits.map(|o| o.bottom).reduce(f32::min) {
                body.position.y = ceiling - body.size.y;
                body.velocity.y = 0.0;
                outcome.hit_ceiling = true;
            }
        } else if let Some(floor) = hits.map(|o| o.top).reduce(f32::max) {
            body.position.y = floor;
            body.velocity.y = 0.0;
            outcome.landed = true;
        }

        let bounds = body.bounds();
        if let Some(obstacle) = obstacles.iter().find(|o| o.encloses(&bounds)) {
            log::error!(
                "body at {:?} is enclosed by obstacle {:?}; level geometry is invalid",
                body.position,
                obstacle
            );
        }

        self.last = outcome;
        outcome
    }

    /// Whether the body stands on something this frame
    pub fn can_jump(&self, body: &Body, obstacles: &[Aabb]) -> bool {
        self.last.landed || (body.velocity.y == 0.0 && is_resting_on(body, obstacles))
    }

    /// Forget the last step (used on respawn)
    pub fn reset(&mut self) {
        self.last = StepOutcome::default();
    }
}

fn is_resting_on(body: &Body, obstacles: &[Aabb]) -> bool {
    let bounds = body.bounds();
    obstacles
        .iter()
        .any(|o| bounds.overlaps_x(o) && (bounds.bottom - o.top).abs() <= REST_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(20.0, 40.0);

    fn floor() -> Vec<Aabb> {
        vec![
            Aabb::new(0.0, 64.0, 0.0, 64.0),
            Aabb::new(64.0, 128.0, 0.0, 64.0),
            Aabb::new(128.0, 192.0, 0.0, 64.0),
        ]
    }

    #[test]
    fn test_lands_on_obstacle_top() {
        // Player at (100, 300) over an obstacle spanning x 90..150, y 0..310
        let obstacles = [Aabb::new(90.0, 150.0, 0.0, 310.0)];
        let mut body = Body::new(Vec2::new(100.0, 300.0), SIZE);
        let mut physics = PlatformerPhysics::new(1.0, 30.0);

        let outcome = physics.step(&mut body, &obstacles);

        assert!(outcome.landed);
        assert_eq!(body.position.y, 310.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(physics.can_jump(&body, &obstacles));
    }

    #[test]
    fn test_free_fall_accumulates_gravity() {
        let mut body = Body::new(Vec2::new(0.0, 500.0), SIZE);
        let mut physics = PlatformerPhysics::new(1.0, 30.0);
        let mut last_vy = body.velocity.y;
        for _ in 0..10 {
            physics.step(&mut body, &[]);
            assert_eq!(body.velocity.y, last_vy - 1.0);
            last_vy = body.velocity.y;
        }
        // 1 + 2 + ... + 10
        assert_eq!(body.position.y, 500.0 - 55.0);
        assert!(!physics.can_jump(&body, &[]));
    }

    #[test]
    fn test_terminal_velocity_clamp() {
        let mut body = Body::new(Vec2::new(0.0, 10_000.0), SIZE);
        let mut physics = PlatformerPhysics::new(4.0, 30.0);
        for _ in 0..20 {
            physics.step(&mut body, &[]);
        }
        assert_eq!(body.velocity.y, -30.0);
    }

    #[test]
    fn test_walks_across_tile_seams() {
        let obstacles = floor();
        let mut body = Body::new(Vec2::new(10.0, 64.0), SIZE);
        body.velocity.x = 5.0;
        let mut physics = PlatformerPhysics::new(1.0, 30.0);
        for _ in 0..30 {
            let outcome = physics.step(&mut body, &obstacles);
            assert!(!outcome.hit_wall);
            assert!(outcome.landed);
            assert_eq!(body.position.y, 64.0);
        }
        assert_eq!(body.position.x, 160.0);
    }

    #[test]
    fn test_wall_pushes_back_without_zeroing_velocity() {
        let mut obstacles = floor();
        obstacles.push(Aabb::new(128.0, 192.0, 64.0, 128.0));
        let mut body = Body::new(Vec2::new(100.0, 64.0), SIZE);
        body.velocity.x = 10.0;
        let mut physics = PlatformerPhysics::new(1.0, 30.0);

        let outcome = physics.step(&mut body, &obstacles);
        assert!(outcome.hit_wall);
        assert_eq!(body.bounds().right, 128.0);
        assert_eq!(body.velocity.x, 10.0);

        body.velocity.x = -10.0;
        body.position.x = 195.0;
        physics.step(&mut body, &obstacles);
        assert_eq!(body.position.x, 192.0);
    }

    #[test]
    fn test_ceiling_stops_rise() {
        let obstacles = [Aabb::new(0.0, 64.0, 100.0, 164.0)];
        let mut body = Body::new(Vec2::new(10.0, 50.0), SIZE);
        body.velocity.y = 20.0;
        let mut physics = PlatformerPhysics::new(1.0, 30.0);

        let outcome = physics.step(&mut body, &obstacles);
        assert!(outcome.hit_ceiling);
        assert!(!outcome.landed);
        assert_eq!(body.bounds().top, 100.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!physics.can_jump(&body, &obstacles));
    }

    #[test]
    fn test_can_jump_false_after_leaving_ground() {
        let obstacles = floor();
        let mut body = Body::new(Vec2::new(10.0, 64.0), SIZE);
        let mut physics = PlatformerPhysics::new(1.0, 30.0);
        physics.step(&mut body, &obstacles);
        assert!(physics.can_jump(&body, &obstacles));

        body.velocity.y = 20.0;
        physics.step(&mut body, &obstacles);
        assert!(!physics.last_outcome().landed);
        assert!(!physics.can_jump(&body, &obstacles));
    }

    #[test]
    fn test_resting_without_landing_counts() {
        let obstacles = floor();
        let body = Body::new(Vec2::new(10.0, 64.0), SIZE);
        let physics = PlatformerPhysics::new(0.0, 30.0);
        assert!(physics.can_jump(&body, &obstacles));

        let hovering = Body::new(Vec2::new(10.0, 70.0), SIZE);
        assert!(!physics.can_jump(&hovering, &obstacles));
    }

    #[test]
    fn test_corner_resolves_x_then_y() {
        // Falling diagonally into the corner of a step
        let obstacles = [
            Aabb::new(0.0, 64.0, 0.0, 64.0),
            Aabb::new(64.0, 128.0, 0.0, 128.0),
        ];
        let mut body = Body::new(Vec2::new(40.0, 68.0), SIZE);
        body.velocity = Vec2::new(8.0, -5.0);
        let mut physics = PlatformerPhysics::new(1.0, 30.0);

        let outcome = physics.step(&mut body, &obstacles);
        assert!(outcome.hit_wall);
        assert!(outcome.landed);
        assert_eq!(body.position, Vec2::new(44.0, 64.0));
    }
}
