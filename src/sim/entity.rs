//! Base moving body shared by the ship and the asteroids
//!
//! Entities carry no drawable: the host renderer links its sprite to an
//! entity through the opaque `EntityId`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::SPRITE_FRACTION;

/// Opaque identifier linking a simulation body to a host sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Opaque image reference understood by the host renderer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Asteroid image for a variant in 1..=ASTEROID_VARIANTS
    pub fn asteroid(variant: u32) -> Self {
        Self(format!("./sandstone_{variant}.png"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Screen dimensions, sampled from the host once per session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Side length of every sprite (square, width-relative)
    pub fn sprite_size(&self) -> Vec2 {
        Vec2::splat(self.width * SPRITE_FRACTION)
    }
}

/// A moving body with fixed size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    size: Vec2,
    pub vel: Vec2,
    pub image: ImageRef,
}

impl Entity {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, image: ImageRef) -> Self {
        Self {
            id,
            pos,
            size,
            vel: Vec2::ZERO,
            image,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Advance position by one tick of velocity
    #[inline]
    pub fn move_step(&mut self) {
        self.pos += self.vel;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// True once the body's right edge has passed x = 0
    pub fn is_left_of_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}
