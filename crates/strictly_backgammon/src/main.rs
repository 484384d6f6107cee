//! Strictly Backgammon - CLI
//!
//! Drives the engine interactively or runs random self-play soak tests.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use play::PlaySession;
use std::path::Path;
use strictly_backgammon::{EngineConfig, Game, run_soak};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play => run_play(config),
        Command::Soak { games, seed } => {
            let config = match seed {
                Some(seed) => config.with_seed(seed),
                None => config,
            };
            run_soak_command(config, games)
        }
    }
}

/// Loads the config file, or defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Run an interactive game over stdin/stdout
#[instrument(skip(config))]
fn run_play(config: EngineConfig) -> Result<()> {
    info!(dice = ?config.dice(), "Starting interactive game");
    let mut session = PlaySession::new(Game::from_config(&config));
    let stdin = std::io::stdin();
    play::run_session(&mut session, stdin.lock(), std::io::stdout().lock())?;
    info!(
        phase = %session.game().phase(),
        winner = ?session.game().winner(),
        "Session ended"
    );
    Ok(())
}

/// Run random self-play games and print the summary as JSON
#[instrument(skip(config))]
fn run_soak_command(config: EngineConfig, games: usize) -> Result<()> {
    info!(games, seed = ?config.seed(), "Starting soak run");
    let report = run_soak(&config, games).context("soak run failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
