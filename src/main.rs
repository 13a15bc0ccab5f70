//! Dig Blaster entry point
//!
//! Native headless runner: plays the game in attract mode at the fixed
//! timestep and prints the final frame. Rendering hosts drive `tick` the same
//! way and draw from `GameState::entities` and the per-tick events.

use dig_blaster::Tuning;
use dig_blaster::consts::*;
use dig_blaster::sim::{GameEvent, GameState, TickInput, tick};

/// Environment variable naming an optional tuning JSON file
const TUNING_ENV: &str = "DIG_BLASTER_TUNING";
/// How much simulated time the attract run covers
const DEMO_SECONDS: f32 = 120.0;

fn load_tuning() -> Tuning {
    let Ok(path) = std::env::var(TUNING_ENV) else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Cannot read {}: {}, using defaults", path, e);
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Dig Blaster (native) starting...");

    let tuning = load_tuning();
    let seed = 0x5eed;
    let mut state = match GameState::with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Rejected tuning: {}, using defaults", e);
            GameState::new(seed)
        }
    };
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    // Simulated frame clock: fixed steps, capped substeps per frame
    let frame_dt = 1.0 / 30.0;
    let mut accumulator = 0.0;
    let mut elapsed = 0.0;
    while elapsed < DEMO_SECONDS && !state.is_game_over() {
        accumulator += frame_dt;
        elapsed += frame_dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;

            for event in &state.events {
                match event {
                    GameEvent::ScoreChanged { score } => log::info!("Score: {}", score),
                    GameEvent::HealthChanged { health } => log::info!("HP: {}", health),
                    GameEvent::GameOver { score } => log::info!("Game Over (score {})", score),
                    other => log::debug!("{:?}", other),
                }
            }
        }
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}
