//! Ledge Runner entry point
//!
//! Native builds run the frame driver headless with the autopilot at the
//! controls and log how the run goes. Usage:
//!
//! ```text
//! ledge-runner [SEED] [TUNING.json]
//! ```

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use ledge_runner::consts::TICKS_PER_SECOND;
use ledge_runner::sim::{GameEvent, World};
use ledge_runner::{FrameDriver, Tuning};

/// Stop a demo run after ten simulated minutes
const MAX_FRAMES: u64 = 10 * 60 * TICKS_PER_SECOND as u64;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ledge Runner (native) starting...");

    let mut args = std::env::args().skip(1);

    let seed = match args.next() {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(err) => {
                log::error!("Invalid seed '{}': {}", arg, err);
                return ExitCode::FAILURE;
            }
        },
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default(),
    };

    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(err) => {
                    log::error!("{}: {}", path, err);
                    return ExitCode::FAILURE;
                }
            },
            Err(err) => {
                log::error!("Failed to read {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let world = match World::new(seed, tuning) {
        Ok(world) => world,
        Err(err) => {
            log::error!("Failed to create world: {}", err);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    let mut driver = FrameDriver::new(world);
    driver.autopilot = true;

    let mut deaths = 0u32;
    let mut coins = 0u32;
    while driver.frame < MAX_FRAMES {
        // The autopilot restarts finished runs, so stop as soon as one ends
        if driver.world.state.can_restart() {
            break;
        }
        driver.step();
        for event in &driver.last_events {
            match event {
                GameEvent::Died { .. } => deaths += 1,
                GameEvent::CoinCollected { .. } => coins += 1,
                _ => {}
            }
        }
    }

    let state = &driver.world.state;
    log::info!(
        "Run ended after {} frames: {:?}, level {}/{}, score {}, high score {}",
        driver.frame,
        state.phase,
        state.current_level,
        state.max_level,
        state.score,
        state.high_score
    );
    println!(
        "seed={} phase={:?} level={}/{} score={} coins={} deaths={} faults={}",
        seed,
        state.phase,
        state.current_level,
        state.max_level,
        state.score,
        coins,
        deaths,
        driver.faults
    );

    ExitCode::SUCCESS
}
