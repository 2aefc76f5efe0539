//! Main entry point for the magic 8-ball.
//!
//! This function performs the following steps:
//! 1. Parses the command line and loads the layered configuration.
//! 2. Initializes logging.
//! 3. Installs SIGINT/SIGTERM handlers that raise the stop flag.
//! 4. Opens the Sense HAT (or the terminal simulator).
//! 5. Shows the prompt and runs the shake/answer loop until stopped.
//!
//! # Errors
//!
//! This function will return an error if:
//! * The configuration file cannot be read, parsed or validated.
//! * Any peripheral cannot be opened or identified.
//! * The prompt cannot be displayed.
//! * The loop gives up after too many consecutive failures.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

mod board;
mod cli;
mod config;
mod display;
mod error;
mod gesture;
mod logging;
mod palette;
mod responder;
mod responses;
mod sensors;

use board::{Board, SenseBoard};
use cli::{Cli, RunMode};
use config::{AppConfig, ResponderSettings};
use display::LedMatrix;
use display::terminal::{TerminalSession, TerminalSink};
use error::ServiceError;
use responder::{GestureResponder, RunSummary};
use responses::ResponseSet;
use sensors::simulated::{FixedTemperature, KeyboardMotion};

fn setup_signal_handler(stop: &Arc<AtomicBool>) -> error::Result<()> {
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(stop))
            .map_err(|e| ServiceError::SignalError(e.to_string()))?;
    }
    Ok(())
}

fn response_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            tracing::info!("Using fixed response seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

fn run_responder<B: SenseBoard>(
    settings: ResponderSettings,
    board: B,
    seed: Option<u64>,
    stop: &AtomicBool,
) -> error::Result<RunSummary> {
    let mut responder =
        GestureResponder::new(settings, ResponseSet::default(), board, response_rng(seed));
    responder.run(stop)
}

#[cfg(target_os = "linux")]
fn run_hardware(
    config: &AppConfig,
    settings: ResponderSettings,
    seed: Option<u64>,
    stop: &AtomicBool,
) -> error::Result<RunSummary> {
    let board = board::sense_hat::open(&config.hardware)?;
    run_responder(settings, board, seed, stop)
}

#[cfg(not(target_os = "linux"))]
fn run_hardware(
    _config: &AppConfig,
    _settings: ResponderSettings,
    _seed: Option<u64>,
    _stop: &AtomicBool,
) -> error::Result<RunSummary> {
    Err(error::SensorError::InitializationError(
        "hardware mode needs Linux I2C and framebuffer devices; try --mode simulate".to_string(),
    )
    .into())
}

fn run_simulation(
    config: &AppConfig,
    settings: ResponderSettings,
    seed: Option<u64>,
    stop: &Arc<AtomicBool>,
) -> error::Result<RunSummary> {
    let _session = TerminalSession::enter()?;
    let board = Board::new(
        KeyboardMotion::new(Arc::clone(stop)),
        FixedTemperature::new(config.simulation.temperature_celsius),
        LedMatrix::new(TerminalSink::new(std::io::stdout())),
    );
    run_responder(settings, board, seed, stop)
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    if cli.version {
        println!("magic8ball {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configs
    let mut app_config = AppConfig::load(cli.config.as_deref())?;
    app_config.apply_cli_overrides(&cli);
    app_config.validate()?;

    if cli.dump_config {
        print!("{}", app_config.to_toml()?);
        return Ok(());
    }

    let fallback_log = match cli.mode {
        RunMode::Simulate => Some(Path::new(logging::SIMULATION_LOG_FILE)),
        RunMode::Hardware => None,
    };
    logging::init(&app_config.logging, fallback_log)?;
    tracing::info!(
        "magic8ball {} starting in {} mode",
        env!("CARGO_PKG_VERSION"),
        cli.mode
    );

    let settings = app_config.responder.settings()?;
    let stop = Arc::new(AtomicBool::new(false));
    setup_signal_handler(&stop)?;

    let summary = match cli.mode {
        RunMode::Hardware => run_hardware(&app_config, settings, cli.seed, &stop),
        RunMode::Simulate => run_simulation(&app_config, settings, cli.seed, &stop),
    }
    .context("magic8ball stopped with an error")?;

    tracing::info!(
        "Answered {} shakes over {} iterations ({} skipped)",
        summary.shakes,
        summary.iterations,
        summary.failures
    );
    Ok(())
}
