//! Headless engine binary for the Life Duel simulation.
//!
//! Loads configuration, seeds a random board, and runs one match on a
//! timer, logging progress and the final result. Rendering is left to
//! other hosts.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `lifeduel-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Create the session and randomize the board
//! 4. Create the schedule control and hook Ctrl-C to a clean stop
//! 5. Run the match loop
//! 6. Log the result

mod error;
mod log_observer;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lifeduel_core::config::{DuelConfig, LoggingConfig};
use lifeduel_core::runner;
use lifeduel_core::schedule::ScheduleControl;
use lifeduel_core::session::SimulationSession;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::log_observer::LogObserver;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "lifeduel-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, session setup, or the match loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run().await?;
    Ok(())
}

async fn run() -> Result<(), EngineError> {
    // 1. Load configuration. Logging depends on it, so nothing is logged yet.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, from_file) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("lifeduel-engine starting");
    if from_file {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Create the session and seed the board.
    let mut session = SimulationSession::new(&config.session_config())?;
    session.randomize(config.game.live_probability)?;
    let stats = session.stats();
    info!(
        population = stats.population,
        a = stats.counts.a,
        b = stats.counts.b,
        seeded = config.game.seed.is_some(),
        "Board seeded"
    );

    // 4. Schedule control, with Ctrl-C mapped to a clean stop.
    let control = Arc::new(ScheduleControl::from_config(&config.schedule));
    {
        let control = Arc::clone(&control);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, stopping after the current tick");
                    control.request_stop();
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 5. Run the match.
    let mut observer = LogObserver::new(config.logging.board_every);
    let result = runner::run_match(&mut session, &control, &mut observer).await?;

    // 6. Log results.
    runner::log_run_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        elapsed_seconds = control.elapsed_seconds(),
        "lifeduel-engine shutdown complete"
    );

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load `DuelConfig` from `path`, falling back to defaults when the file
/// does not exist. The flag reports whether the file was read.
fn load_config(path: &Path) -> Result<(DuelConfig, bool), EngineError> {
    if path.exists() {
        Ok((DuelConfig::from_file(path)?, true))
    } else {
        Ok((DuelConfig::parse("")?, false))
    }
}
