//! Axis-aligned bounding box overlap
//!
//! Ship and asteroids are plain rectangles, so a single inclusive range
//! test per axis is all the collision work the game needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }
}

/// Inclusive overlap on both axes (touching edges count as a hit)
#[inline]
pub fn collides(a: &Aabb, b: &Aabb) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}
