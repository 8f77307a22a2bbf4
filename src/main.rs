//! Flappy Ship native entry point
//!
//! Runs the game on the headless host with a simple autopilot that taps
//! whenever the ship sinks below mid-screen, then restarts a few rounds.
//!
//! Usage: `flappy-ship [settings.json] [exact|threshold]`

use flappy_ship::Game;
use flappy_ship::platform::HeadlessHost;
use flappy_ship::{CeilingRule, Settings};

const SCREEN_WIDTH: f32 = 800.0;
const SCREEN_HEIGHT: f32 = 600.0;
const ROUNDS: u32 = 3;
/// Give up on a round after ten simulated minutes
const MAX_TICKS_PER_ROUND: u64 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Flappy Ship (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Settings::default()
        }),
        None => Settings::default(),
    };
    if let Some(rule) = args.next() {
        match CeilingRule::from_str(&rule) {
            Some(rule) => settings.ceiling = rule,
            None => log::warn!("Unknown ceiling rule '{rule}', keeping {}", settings.ceiling.as_str()),
        }
    }

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Game initialized with seed: {}", seed);

    let host = HeadlessHost::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut game = Game::new(host, settings, seed);

    for round in 1..=ROUNDS {
        let mut ticks = 0u64;
        while let Some(dt) = game.host().active_interval() {
            if ticks >= MAX_TICKS_PER_ROUND {
                break;
            }
            autopilot(&mut game);
            game.on_timer(dt);
            ticks += 1;
        }
        println!(
            "Round {round}: survived {} ticks ({:.1}s), {} asteroids on screen",
            game.session().ticks_survived(),
            game.session().elapsed(),
            game.session().asteroids().len()
        );

        if round < ROUNDS {
            match game.restart_button() {
                Some(button) => game.on_button_released(button),
                None => break,
            }
        }
    }

    println!(
        "Played {} round(s), {} sprite draws",
        game.rounds_played(),
        game.host().draw_calls()
    );
}

/// Tap when falling below the middle of the screen
fn autopilot(game: &mut Game<HeadlessHost>) {
    let ship = game.session().ship();
    if ship.body.pos.y < SCREEN_HEIGHT * 0.5 && ship.body.vel.y < 0.0 {
        game.on_primary_input();
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
