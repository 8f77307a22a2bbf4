//! Game session: per-tick update order and the Playing/GameOver state machine
//!
//! A session exclusively owns the ship, the live asteroids and the spawn
//! ramp. Side effects the host must react to are queued as `GameEvent`s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::collides;
use super::entity::{Entity, EntityId, Screen};
use super::ship::Ship;
use super::spawner::{AsteroidSpawner, AsteroidSpec};
use crate::settings::{CeilingRule, Settings};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Ticking, accepting input
    Playing,
    /// Round ended, waiting for restart
    GameOver,
}

/// Events the host reacts to, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    AsteroidSpawned(EntityId),
    /// Pruned off the left edge or cleared on restart
    AsteroidRemoved(EntityId),
    /// Ship hit an asteroid; fired once per round
    GameOver { asteroid: EntityId, ticks_survived: u64 },
    Restarted,
}

/// Rejected state-machine commands
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot tick: session is over")]
    NotPlaying,
    #[error("cannot restart: session is still playing")]
    NotGameOver,
}

/// An obstacle drifting left at constant speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Entity,
}

impl Asteroid {
    fn from_spec(id: EntityId, spec: AsteroidSpec, size: Vec2) -> Self {
        let mut body = Entity::new(id, spec.pos, size, spec.image);
        body.vel = spec.vel;
        Self { body }
    }

    pub fn update(&mut self) {
        self.body.move_step();
    }
}

/// Serializable copy of everything a session needs to resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub screen: Screen,
    pub state: SessionState,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    /// Threshold and RNG position
    pub spawner: AsteroidSpawner,
    pub ticks_survived: u64,
    #[serde(default)]
    pub elapsed: f32,
    pub next_id: u32,
}

pub struct GameSession {
    seed: u64,
    screen: Screen,
    ceiling: CeilingRule,
    prune_offscreen: bool,
    state: SessionState,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    spawner: AsteroidSpawner,
    ticks_survived: u64,
    elapsed: f32,
    next_id: u32,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(screen: Screen, settings: &Settings, seed: u64) -> Self {
        let mut session = Self {
            seed,
            screen,
            ceiling: settings.ceiling,
            prune_offscreen: settings.prune_offscreen,
            state: SessionState::Playing,
            ship: Ship::new(EntityId(0), &screen),
            asteroids: Vec::new(),
            spawner: AsteroidSpawner::new(seed),
            ticks_survived: 0,
            elapsed: 0.0,
            next_id: 1,
            events: Vec::new(),
        };
        let ship_id = session.next_entity_id();
        session.ship.body.id = ship_id;

        log::info!(
            "Session started ({}x{}, seed {})",
            screen.width,
            screen.height,
            seed
        );
        session
    }

    /// Rebuild a session from a snapshot; the spawner continues its RNG stream
    pub fn from_snapshot(snapshot: SessionSnapshot, settings: &Settings) -> Self {
        let mut spawner = snapshot.spawner;
        spawner.clamp_threshold();

        // Ids below the highest live id are taken
        let max_id = snapshot
            .asteroids
            .iter()
            .map(|a| a.body.id.0)
            .chain(std::iter::once(snapshot.ship.body.id.0))
            .max()
            .unwrap_or(0);
        let next_id = snapshot.next_id.max(max_id.saturating_add(1));
        if next_id != snapshot.next_id {
            log::warn!(
                "Snapshot next_id {} collides with live ids, using {}",
                snapshot.next_id,
                next_id
            );
        }

        Self {
            seed: snapshot.seed,
            screen: snapshot.screen,
            ceiling: settings.ceiling,
            prune_offscreen: settings.prune_offscreen,
            state: snapshot.state,
            ship: snapshot.ship,
            asteroids: snapshot.asteroids,
            spawner,
            ticks_survived: snapshot.ticks_survived,
            elapsed: snapshot.elapsed,
            next_id,
            events: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed: self.seed,
            screen: self.screen,
            state: self.state,
            ship: self.ship.clone(),
            asteroids: self.asteroids.clone(),
            spawner: self.spawner.clone(),
            ticks_survived: self.ticks_survived,
            elapsed: self.elapsed,
            next_id: self.next_id,
        }
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn spawn_threshold(&self) -> u32 {
        self.spawner.threshold()
    }

    pub fn ticks_survived(&self) -> u64 {
        self.ticks_survived
    }

    /// Seconds accumulated from `tick` deltas this round
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Take all events queued since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one fixed step: ship, spawn, asteroids + collisions, prune
    pub fn tick(&mut self, dt: f32) -> Result<(), SessionError> {
        if self.state != SessionState::Playing {
            return Err(SessionError::NotPlaying);
        }

        self.ticks_survived += 1;
        self.elapsed += dt;

        self.ship.update(&self.screen, self.ceiling);

        if let Some(spec) = self.spawner.maybe_spawn(&self.screen) {
            let id = self.next_entity_id();
            log::debug!(
                "Spawned asteroid {} in lane {} (threshold now {})",
                id.0,
                spec.lane,
                self.spawner.threshold()
            );
            self.asteroids
                .push(Asteroid::from_spec(id, spec, self.screen.sprite_size()));
            self.events.push(GameEvent::AsteroidSpawned(id));
        }

        // Every asteroid still moves on the tick that ends the round
        let ship_box = self.ship.body.bounds();
        let mut hit = None;
        for asteroid in &mut self.asteroids {
            if hit.is_none() && collides(&asteroid.body.bounds(), &ship_box) {
                hit = Some(asteroid.body.id);
            }
            asteroid.update();
        }

        if self.prune_offscreen {
            let events = &mut self.events;
            self.asteroids.retain(|a| {
                if a.body.is_left_of_screen() {
                    log::debug!("Pruned asteroid {}", a.body.id.0);
                    events.push(GameEvent::AsteroidRemoved(a.body.id));
                    false
                } else {
                    true
                }
            });
        }

        log::trace!(
            "tick {}: ship y={:.2} vy={:.3}, {} asteroids",
            self.ticks_survived,
            self.ship.body.pos.y,
            self.ship.body.vel.y,
            self.asteroids.len()
        );

        if let Some(asteroid) = hit {
            self.state = SessionState::GameOver;
            log::info!(
                "Ship hit asteroid {} after {} ticks",
                asteroid.0,
                self.ticks_survived
            );
            self.events.push(GameEvent::GameOver {
                asteroid,
                ticks_survived: self.ticks_survived,
            });
        }

        Ok(())
    }

    /// Player input: restart the ship's boost. Returns false (no-op) when over.
    pub fn on_primary_input(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.ship.apply_impulse();
        true
    }

    /// Clear the field and start a new round
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::GameOver {
            return Err(SessionError::NotGameOver);
        }

        for asteroid in self.asteroids.drain(..) {
            self.events.push(GameEvent::AsteroidRemoved(asteroid.body.id));
        }
        self.ship.reset(&self.screen);
        self.spawner.reset();
        self.ticks_survived = 0;
        self.elapsed = 0.0;
        self.state = SessionState::Playing;
        self.events.push(GameEvent::Restarted);

        log::info!("Session restarted");
        Ok(())
    }

    /// Place an asteroid directly
    #[cfg(test)]
    pub(crate) fn insert_asteroid(&mut self, spec: AsteroidSpec) -> EntityId {
        let id = self.next_entity_id();
        self.asteroids
            .push(Asteroid::from_spec(id, spec, self.screen.sprite_size()));
        self.events.push(GameEvent::AsteroidSpawned(id));
        id
    }
}
