//! Procedural asteroid spawning
//!
//! Each tick rolls 1..=1800 against a threshold. A roll strictly above the
//! threshold spawns an asteroid in one of 16 lanes and lowers the threshold
//! by one, floored at 1300. Spawns get more frequent the longer a round lasts.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{ImageRef, Screen};
use crate::consts::*;

/// Difficulty ramp state; lower threshold means more spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnState {
    pub threshold: u32,
}

impl Default for SpawnState {
    fn default() -> Self {
        Self {
            threshold: SPAWN_THRESHOLD_START,
        }
    }
}

impl SpawnState {
    fn ramp(&mut self) {
        self.threshold = self.threshold.saturating_sub(1).max(SPAWN_THRESHOLD_FLOOR);
    }
}

/// Everything the session needs to build a new asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidSpec {
    pub pos: Vec2,
    pub vel: Vec2,
    pub image: ImageRef,
    pub lane: u32,
}

/// Threshold plus the RNG stream; serializes whole so a restored spawner
/// continues the exact same sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSpawner {
    state: SpawnState,
    rng: Pcg32,
}

impl AsteroidSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            state: SpawnState::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pull a deserialized threshold back into its legal range
    pub fn clamp_threshold(&mut self) {
        self.state.threshold = self
            .state
            .threshold
            .clamp(SPAWN_THRESHOLD_FLOOR, SPAWN_THRESHOLD_START);
    }

    pub fn state(&self) -> SpawnState {
        self.state
    }

    pub fn threshold(&self) -> u32 {
        self.state.threshold
    }

    /// Back to the starting difficulty (RNG stream continues)
    pub fn reset(&mut self) {
        self.state = SpawnState::default();
    }

    /// Roll for a spawn this tick
    pub fn maybe_spawn(&mut self, screen: &Screen) -> Option<AsteroidSpec> {
        let roll = self.rng.random_range(1..=SPAWN_ROLL_MAX);
        self.spawn_from_roll(roll, screen)
    }

    /// Decide a spawn for an already-drawn roll; draws variant then lane on success
    pub fn spawn_from_roll(&mut self, roll: u32, screen: &Screen) -> Option<AsteroidSpec> {
        if roll <= self.state.threshold {
            return None;
        }

        let variant = self.rng.random_range(1..=ASTEROID_VARIANTS);
        let lane = self.rng.random_range(1..=SPAWN_LANES);
        self.state.ramp();

        Some(AsteroidSpec {
            pos: Vec2::new(
                screen.width * SPAWN_X_FRACTION,
                lane as f32 * LANE_FRACTION * screen.height,
            ),
            vel: Vec2::new(ASTEROID_SPEED, 0.0),
            image: ImageRef::asteroid(variant),
            lane,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn screen() -> Screen {
        Screen::new(800.0, 600.0)
    }

    #[test]
    fn test_roll_must_exceed_threshold() {
        let mut spawner = AsteroidSpawner::new(7);
        assert_eq!(spawner.threshold(), 1700);

        assert!(spawner.spawn_from_roll(1700, &screen()).is_none());
        assert_eq!(spawner.threshold(), 1700);

        let spec = spawner.spawn_from_roll(1800, &screen()).expect("spawn");
        assert_eq!(spawner.threshold(), 1699);
        assert!((spec.pos.x - 792.0).abs() < 1e-3);
        assert_eq!(spec.vel, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_spawn_lands_in_a_lane() {
        let s = screen();
        let mut spawner = AsteroidSpawner::new(42);
        for _ in 0..200 {
            let spec = spawner.spawn_from_roll(SPAWN_ROLL_MAX, &s).expect("spawn");
            assert!((1..=SPAWN_LANES).contains(&spec.lane));
            let expected_y = spec.lane as f32 * LANE_FRACTION * s.height;
            assert!((spec.pos.y - expected_y).abs() < 1e-3);
            let name = spec.image.as_str();
            assert!(name.starts_with("./sandstone_") && name.ends_with(".png"));
        }
    }

    #[test]
    fn test_threshold_floors_at_1300() {
        let mut spawner = AsteroidSpawner::new(1);
        for _ in 0..1000 {
            spawner.spawn_from_roll(SPAWN_ROLL_MAX, &screen());
        }
        assert_eq!(spawner.threshold(), SPAWN_THRESHOLD_FLOOR);
    }

    #[test]
    fn test_reset_restores_start_threshold() {
        let mut spawner = AsteroidSpawner::new(3);
        for _ in 0..50 {
            spawner.spawn_from_roll(SPAWN_ROLL_MAX, &screen());
        }
        spawner.reset();
        assert_eq!(spawner.threshold(), SPAWN_THRESHOLD_START);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let s = screen();
        let mut a = AsteroidSpawner::new(99);
        let mut b = AsteroidSpawner::new(99);
        for _ in 0..5000 {
            assert_eq!(a.maybe_spawn(&s), b.maybe_spawn(&s));
        }
        assert_eq!(a.threshold(), b.threshold());
    }

    #[test]
    fn test_clamp_threshold() {
        let mut spawner = AsteroidSpawner::new(0);
        spawner.state.threshold = 9000;
        spawner.clamp_threshold();
        assert_eq!(spawner.threshold(), SPAWN_THRESHOLD_START);
        spawner.state.threshold = 12;
        spawner.clamp_threshold();
        assert_eq!(spawner.threshold(), SPAWN_THRESHOLD_FLOOR);
    }

    #[test]
    fn test_json_copy_continues_rng_stream() {
        let s = screen();
        let mut spawner = AsteroidSpawner::new(777);
        for _ in 0..300 {
            spawner.maybe_spawn(&s);
        }
        let json = serde_json::to_string(&spawner).unwrap();
        let mut copy: AsteroidSpawner = serde_json::from_str(&json).unwrap();
        assert_eq!(copy, spawner);
        for _ in 0..2000 {
            assert_eq!(copy.maybe_spawn(&s), spawner.maybe_spawn(&s));
        }
        assert_eq!(copy, spawner);
    }

    proptest! {
        #[test]
        fn prop_threshold_stays_in_bounds(seed in any::<u64>(), ticks in 0usize..6000) {
            let s = screen();
            let mut spawner = AsteroidSpawner::new(seed);
            for _ in 0..ticks {
                spawner.maybe_spawn(&s);
                let t = spawner.threshold();
                prop_assert!((SPAWN_THRESHOLD_FLOOR..=SPAWN_THRESHOLD_START).contains(&t));
            }
        }
    }
}
