//! Axis-aligned bounding boxes
//!
//! Every overlap test in the game goes through `Aabb`. Overlap is strict, so
//! a body standing exactly on a tile top does not collide with it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-space rectangle, y up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Aabb {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        debug_assert!(left <= right && bottom <= top, "inverted aabb");
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Box with its bottom-left corner at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.x + size.x, pos.y, pos.y + size.y)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.bottom + self.top) * 0.5)
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left < other.right && self.right > other.left
    }

    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.bottom < other.top && self.top > other.bottom
    }

    /// True if `other` lies entirely inside this box
    pub fn encloses(&self, other: &Aabb) -> bool {
        self.left <= other.left
            && self.right >= other.right
            && self.bottom <= other.bottom
            && self.top >= other.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pos_size() {
        let b = Aabb::from_pos_size(Vec2::new(10.0, 20.0), Vec2::new(5.0, 8.0));
        assert_eq!(b, Aabb::new(10.0, 15.0, 20.0, 28.0));
        assert_eq!(b.width(), 5.0);
        assert_eq!(b.height(), 8.0);
        assert_eq!(b.center(), Vec2::new(12.5, 24.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let floor = Aabb::new(0.0, 64.0, 0.0, 64.0);
        let standing = Aabb::new(10.0, 50.0, 64.0, 150.0);
        assert!(!floor.overlaps(&standing));
        let beside = Aabb::new(64.0, 100.0, 0.0, 64.0);
        assert!(!floor.overlaps(&beside));
    }

    #[test]
    fn test_overlap() {
        let a = Aabb::new(0.0, 10.0, 0.0, 10.0);
        assert!(a.overlaps(&Aabb::new(9.0, 20.0, 9.0, 20.0)));
        assert!(!a.overlaps(&Aabb::new(9.0, 20.0, 11.0, 20.0)));
        assert!(a.overlaps_x(&Aabb::new(9.0, 20.0, 11.0, 20.0)));
    }

    #[test]
    fn test_encloses() {
        let outer = Aabb::new(0.0, 100.0, 0.0, 100.0);
        let inner = Aabb::new(10.0, 20.0, 10.0, 20.0);
        assert!(outer.encloses(&inner));
        assert!(!inner.encloses(&outer));
        assert!(!outer.encloses(&Aabb::new(95.0, 105.0, 10.0, 20.0)));
    }
}
