//! Flappy Ship - dodge the asteroids
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship physics, spawning, collisions, session state)
//! - `platform`: Host collaborator traits (scheduler, renderer, screen metrics)
//! - `game`: Driver wiring a session to a host
//! - `settings`: Serializable configuration

pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{CeilingRule, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default tick rate of the host scheduler
    pub const TICK_RATE_HZ: f32 = 60.0;

    /// Upward impulse applied on player input
    pub const SHIP_IMPULSE: f32 = 3.0;
    /// Gravity value right after an input (and at spawn)
    pub const SHIP_BASE_GRAVITY: f32 = -0.1;
    /// Per-tick multiplicative growth of gravity
    pub const GRAVITY_GROWTH: f32 = 1.05;
    /// Gravity never drops below this
    pub const GRAVITY_FLOOR: f32 = -4.0;
    /// Per-tick multiplicative decay of impulse
    pub const IMPULSE_DECAY: f32 = 0.95;
    /// Impulse forced when the ship reaches the ceiling
    pub const CEILING_PUSHBACK: f32 = -3.0;
    /// Ceiling height as a fraction of screen height
    pub const CEILING_FRACTION: f32 = 0.95;

    /// Spawn roll is drawn from 1..=SPAWN_ROLL_MAX
    pub const SPAWN_ROLL_MAX: u32 = 1800;
    /// Threshold at session start (and after restart)
    pub const SPAWN_THRESHOLD_START: u32 = 1700;
    /// Threshold floor (maximum difficulty)
    pub const SPAWN_THRESHOLD_FLOOR: u32 = 1300;
    /// Number of discrete vertical spawn lanes
    pub const SPAWN_LANES: u32 = 16;
    /// Lane spacing as a fraction of screen height
    pub const LANE_FRACTION: f32 = 0.0625;
    /// Spawn x as a fraction of screen width
    pub const SPAWN_X_FRACTION: f32 = 0.99;
    /// Number of asteroid image variants
    pub const ASTEROID_VARIANTS: u32 = 4;
    /// Horizontal asteroid velocity (units per tick)
    pub const ASTEROID_SPEED: f32 = -1.0;

    /// Sprite side length as a fraction of screen width (0.002 * 25)
    pub const SPRITE_FRACTION: f32 = 0.002 * 25.0;

    /// Ship image asset
    pub const SHIP_IMAGE: &str = "./ship.png";
    /// Title shown on startup
    pub const TITLE_TEXT: &str = "Flappy Ship";
    /// Restart button label
    pub const RESTART_TEXT: &str = "Restart";
}
