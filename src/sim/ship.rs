//! The player's ship
//!
//! Vertical motion is the sum of a decaying upward impulse and a gravity term
//! that grows multiplicatively until clamped. Horizontal velocity stays zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, ImageRef, Screen};
use crate::consts::*;
use crate::settings::CeilingRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub body: Entity,
    pub impulse: f32,
    pub gravity: f32,
}

impl Ship {
    pub fn new(id: EntityId, screen: &Screen) -> Self {
        let body = Entity::new(
            id,
            Self::spawn_position(screen),
            screen.sprite_size(),
            ImageRef::new(SHIP_IMAGE),
        );
        Self {
            body,
            impulse: SHIP_IMPULSE,
            gravity: SHIP_BASE_GRAVITY,
        }
    }

    /// Quarter of the way across, halfway up
    pub fn spawn_position(screen: &Screen) -> Vec2 {
        Vec2::new(screen.width / 4.0, screen.height / 2.0)
    }

    /// Put the ship back at its spawn point with fresh physics
    pub fn reset(&mut self, screen: &Screen) {
        self.body.pos = Self::spawn_position(screen);
        self.body.vel = Vec2::ZERO;
        self.impulse = SHIP_IMPULSE;
        self.gravity = SHIP_BASE_GRAVITY;
    }

    /// Restart the boost; overrides whatever decay was in progress
    pub fn apply_impulse(&mut self) {
        self.impulse = SHIP_IMPULSE;
        self.gravity = SHIP_BASE_GRAVITY;
    }

    pub fn update_velocity(&mut self) {
        self.gravity = (self.gravity * GRAVITY_GROWTH).max(GRAVITY_FLOOR);
        self.body.vel.y = self.impulse + self.gravity;
        self.impulse *= IMPULSE_DECAY;
    }

    pub fn update(&mut self, screen: &Screen, ceiling: CeilingRule) {
        self.update_velocity();
        self.body.move_step();

        let ceiling_y = screen.height * CEILING_FRACTION;
        let at_ceiling = match ceiling {
            #[allow(clippy::float_cmp)]
            CeilingRule::ExactMatch => self.body.pos.y == ceiling_y,
            CeilingRule::Threshold => self.body.pos.y >= ceiling_y,
        };
        if at_ceiling {
            self.impulse = CEILING_PUSHBACK;
        }
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
    fn test_spawn_state() {
        let ship = Ship::new(EntityId(1), &screen());
        assert_eq!(ship.body.pos, Vec2::new(200.0, 300.0));
        assert_eq!(ship.body.vel, Vec2::ZERO);
        assert_eq!(ship.impulse, SHIP_IMPULSE);
        assert_eq!(ship.gravity, SHIP_BASE_GRAVITY);
    }

    #[test]
    fn test_update_velocity_single_step() {
        let mut ship = Ship::new(EntityId(1), &screen());
        ship.update_velocity();
        assert!((ship.gravity - -0.105).abs() < 1e-4);
        assert!((ship.body.vel.y - 2.895).abs() < 1e-4);
        assert!((ship.impulse - 2.85).abs() < 1e-4);
        assert_eq!(ship.body.vel.x, 0.0);
    }

    #[test]
    fn test_gravity_clamps_at_floor() {
        let mut ship = Ship::new(EntityId(1), &screen());
        for _ in 0..500 {
            ship.update_velocity();
        }
        assert_eq!(ship.gravity, GRAVITY_FLOOR);
        assert!(ship.impulse.abs() < 1e-4);
        assert!((ship.body.vel.y - GRAVITY_FLOOR).abs() < 1e-3);
    }

    #[test]
    fn test_apply_impulse_restarts_boost() {
        let mut ship = Ship::new(EntityId(1), &screen());
        for _ in 0..30 {
            ship.update(&screen(), CeilingRule::ExactMatch);
        }
        assert!(ship.impulse < 1.0);
        ship.apply_impulse();
        assert_eq!(ship.impulse, SHIP_IMPULSE);
        assert_eq!(ship.gravity, SHIP_BASE_GRAVITY);
    }

    #[test]
    fn test_update_moves_by_new_velocity() {
        let mut ship = Ship::new(EntityId(1), &screen());
        let y0 = ship.body.pos.y;
        ship.update(&screen(), CeilingRule::ExactMatch);
        assert!((ship.body.pos.y - (y0 + 2.895)).abs() < 1e-3);
        assert_eq!(ship.body.pos.x, 200.0);
    }

    #[test]
    fn test_exact_ceiling_only_triggers_on_equality() {
        let s = screen();
        let ceiling_y = s.height * CEILING_FRACTION;

        let mut ship = Ship::new(EntityId(1), &s);
        ship.body.pos.y = ceiling_y + 10.0;
        ship.update(&s, CeilingRule::ExactMatch);
        assert!(ship.impulse > 0.0);

        // Land exactly on the ceiling: zero net velocity this tick
        let mut ship = Ship::new(EntityId(1), &s);
        ship.body.pos.y = ceiling_y;
        ship.impulse = 0.0;
        ship.gravity = 0.0;
        ship.update(&s, CeilingRule::ExactMatch);
        assert_eq!(ship.impulse, CEILING_PUSHBACK);
    }

    #[test]
    fn test_threshold_ceiling_pushes_down() {
        let s = screen();
        let mut ship = Ship::new(EntityId(1), &s);
        ship.body.pos.y = s.height * CEILING_FRACTION + 10.0;
        ship.update(&s, CeilingRule::Threshold);
        assert_eq!(ship.impulse, CEILING_PUSHBACK);
    }

    #[test]
    fn test_reset_restores_spawn() {
        let s = screen();
        let mut ship = Ship::new(EntityId(1), &s);
        for _ in 0..40 {
            ship.update(&s, CeilingRule::ExactMatch);
        }
        ship.reset(&s);
        assert_eq!(ship, Ship::new(EntityId(1), &s));
    }

    proptest! {
        #[test]
        fn prop_gravity_never_below_floor(taps in proptest::collection::vec(any::<bool>(), 0..400)) {
            let s = screen();
            let mut ship = Ship::new(EntityId(1), &s);
            for tap in taps {
                if tap {
                    ship.apply_impulse();
                }
                ship.update(&s, CeilingRule::Threshold);
                prop_assert!(ship.gravity >= GRAVITY_FLOOR);
                prop_assert!(ship.gravity < 0.0);
            }
        }
    }
}
