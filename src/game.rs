//! Game driver
//!
//! Owns a `GameSession` and the host it runs on. Starts and stops the
//! host timer, routes input, keeps sprites in sync with the simulation and
//! manages the restart button.

use glam::Vec2;

use crate::consts::*;
use crate::platform::{ButtonSpec, Host, TimerHandle, WidgetHandle};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSession, Screen, SessionState};

pub struct Game<H: Host> {
    host: H,
    session: GameSession,
    settings: Settings,
    timer: Option<TimerHandle>,
    title: Option<WidgetHandle>,
    restart_button: Option<WidgetHandle>,
    rounds_played: u32,
}

impl<H: Host> Game<H> {
    /// Build the session from the host's screen and start ticking
    pub fn new(mut host: H, settings: Settings, seed: u64) -> Self {
        let screen = Screen::new(host.width(), host.height());
        let session = GameSession::new(screen, &settings, seed);

        let title = settings.show_title.then(|| {
            host.create_label(
                TITLE_TEXT,
                Vec2::new(screen.width / 2.0, screen.height * 0.8),
            )
        });

        log::info!(
            "Flappy Ship ready: {} Hz, ceiling {}, pruning {}",
            settings.tick_rate_hz,
            settings.ceiling.as_str(),
            if settings.prune_offscreen { "on" } else { "off" }
        );

        let mut game = Self {
            host,
            session,
            settings,
            timer: None,
            title,
            restart_button: None,
            rounds_played: 0,
        };
        game.start_timer();
        game.render();
        game
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn title(&self) -> Option<WidgetHandle> {
        self.title
    }

    pub fn restart_button(&self) -> Option<WidgetHandle> {
        self.restart_button
    }

    /// True while the host timer is scheduled
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Completed rounds (ended by a collision)
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Host timer fired
    pub fn on_timer(&mut self, dt: f32) {
        if let Err(e) = self.session.tick(dt) {
            log::debug!("Ignoring timer: {e}");
            return;
        }
        self.process_events();
        self.render();
    }

    /// Tap/click/key from the player
    pub fn on_primary_input(&mut self) {
        if !self.session.on_primary_input() {
            log::trace!("Input ignored: round is over");
        }
    }

    /// A host button was released
    pub fn on_button_released(&mut self, handle: WidgetHandle) {
        if self.restart_button == Some(handle) {
            log::info!("Restart button pushed");
            self.restart();
        } else {
            log::debug!("Release on unknown button {:?}", handle);
        }
    }

    fn restart(&mut self) {
        if let Err(e) = self.session.restart() {
            log::warn!("Restart rejected: {e}");
            return;
        }
        if let Some(button) = self.restart_button.take() {
            self.host.remove_widget(button);
        }
        self.process_events();
        self.start_timer();
        self.render();
    }

    fn start_timer(&mut self) {
        // Never run two timers at once
        if let Some(old) = self.timer.take() {
            self.host.cancel(old);
        }
        self.timer = Some(self.host.schedule_repeating(self.settings.tick_interval()));
    }

    fn process_events(&mut self) {
        for event in self.session.take_events() {
            match event {
                GameEvent::AsteroidSpawned(_) | GameEvent::Restarted => {}
                GameEvent::AsteroidRemoved(id) => self.host.remove_sprite(id),
                GameEvent::GameOver { ticks_survived, .. } => self.game_over(ticks_survived),
            }
        }
    }

    fn game_over(&mut self, ticks_survived: u64) {
        self.rounds_played += 1;
        log::info!(
            "Game over after {:.1}s ({} ticks)",
            self.session.elapsed(),
            ticks_survived
        );

        if let Some(timer) = self.timer.take() {
            self.host.cancel(timer);
        }
        if self.restart_button.is_none() {
            let button = restart_button_spec(&self.session.screen());
            self.restart_button = Some(self.host.create_button(&button));
        }
    }

    fn render(&mut self) {
        let ship = &self.session.ship().body;
        self.host
            .draw_sprite(ship.id, &ship.image, ship.pos, ship.size());
        for asteroid in self.session.asteroids() {
            let body = &asteroid.body;
            self.host
                .draw_sprite(body.id, &body.image, body.pos, body.size());
        }
    }

    /// Shortcut for tests and scripted hosts
    pub fn state(&self) -> SessionState {
        self.session.state()
    }
}

/// Centered horizontally, halfway up the screen
fn restart_button_spec(screen: &Screen) -> ButtonSpec {
    let size = Vec2::new(screen.width * 0.3, screen.width * 0.1);
    ButtonSpec {
        text: RESTART_TEXT.to_string(),
        pos: Vec2::new(screen.width * 0.5 - size.x / 2.0, screen.height * 0.5),
        size,
        font_size: screen.width * 0.018,
    }
}
