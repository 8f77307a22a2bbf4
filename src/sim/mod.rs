//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per host tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod session;
pub mod ship;
pub mod spawner;

pub use collision::{Aabb, collides};
pub use entity::{Entity, EntityId, ImageRef, Screen};
pub use session::{Asteroid, GameEvent, GameSession, SessionError, SessionSnapshot, SessionState};
pub use ship::Ship;
pub use spawner::{AsteroidSpawner, AsteroidSpec, SpawnState};
