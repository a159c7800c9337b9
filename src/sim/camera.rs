//! Scrolling viewport
//!
//! The camera only moves when the player pushes into a margin, and then by
//! exactly the overflow. No clamping to the level edges.

use glam::Vec2;

use super::aabb::Aabb;
use crate::settings::{ScrollMargins, Settings};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub screen: Vec2,
    pub margins: ScrollMargins,
}

impl Camera {
    pub fn new(screen: Vec2, margins: ScrollMargins) -> Self {
        Self { screen, margins }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Vec2::new(settings.screen_width, settings.screen_height),
            settings.margins,
        )
    }

    /// New viewport origin if the player left the margined interior.
    ///
    /// The result is floored so tiles land on whole pixels.
    pub fn follow(&self, origin: Vec2, player: &Aabb) -> Option<Vec2> {
        let mut next = origin;
        let mut changed = false;

        let left_boundary = next.x + self.margins.left;
        if player.left < left_boundary {
            next.x -= left_boundary - player.left;
            changed = true;
        }

        let right_boundary = next.x + self.screen.x - self.margins.right;
        if player.right > right_boundary {
            next.x += player.right - right_boundary;
            changed = true;
        }

        let top_boundary = next.y + self.screen.y - self.margins.top;
        if player.top > top_boundary {
            next.y += player.top - top_boundary;
            changed = true;
        }

        let bottom_boundary = next.y + self.margins.bottom;
        if player.bottom < bottom_boundary {
            next.y -= bottom_boundary - player.bottom;
            changed = true;
        }

        changed.then(|| next.floor())
    }

    /// World rectangle shown for a given origin
    pub fn visible(&self, origin: Vec2) -> Aabb {
        Aabb::from_pos_size(origin, self.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(
            Vec2::new(1000.0, 550.0),
            ScrollMargins {
                left: 200.0,
                right: 200.0,
                top: 100.0,
                bottom: 150.0,
            },
        )
    }

    fn player_at(x: f32, y: f32) -> Aabb {
        Aabb::from_pos_size(Vec2::new(x, y), Vec2::new(56.0, 90.0))
    }

    #[test]
    fn test_inside_margins_no_change() {
        assert_eq!(camera().follow(Vec2::ZERO, &player_at(400.0, 200.0)), None);
    }

    #[test]
    fn test_scrolls_right_by_overflow() {
        // right edge 810.5 vs boundary 800
        let next = camera().follow(Vec2::ZERO, &player_at(754.5, 200.0)).unwrap();
        assert_eq!(next, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_scrolls_left_by_overflow() {
        let next = camera()
            .follow(Vec2::new(500.0, 0.0), &player_at(650.0, 200.0))
            .unwrap();
        assert_eq!(next, Vec2::new(450.0, 0.0));
    }

    #[test]
    fn test_scrolls_up_and_down() {
        let cam = camera();
        // top edge 480 vs boundary 450
        let up = cam.follow(Vec2::ZERO, &player_at(400.0, 390.0)).unwrap();
        assert_eq!(up, Vec2::new(0.0, 30.0));

        // bottom edge 100 vs boundary 150
        let down = cam.follow(Vec2::ZERO, &player_at(400.0, 100.0)).unwrap();
        assert_eq!(down, Vec2::new(0.0, -50.0));
    }

    #[test]
    fn test_player_left_of_start_margin() {
        // Spawn at x=128 sits inside the left margin, so the view slides left
        let next = camera().follow(Vec2::ZERO, &player_at(128.0, 300.0)).unwrap();
        assert_eq!(next, Vec2::new(-72.0, 0.0));
    }

    #[test]
    fn test_unchanged_origin_keeps_fraction() {
        let origin = Vec2::new(10.25, 3.5);
        assert_eq!(camera().follow(origin, &player_at(400.0, 200.0)), None);
    }

    #[test]
    fn test_visible_rect() {
        let rect = camera().visible(Vec2::new(10.0, -5.0));
        assert_eq!(rect, Aabb::new(10.0, 1010.0, -5.0, 545.0));
    }
}
