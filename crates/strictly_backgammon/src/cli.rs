//! Command-line interface for strictly_backgammon.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Backgammon - pure backgammon rules engine
#[derive(Parser, Debug)]
#[command(name = "strictly_backgammon")]
#[command(about = "Backgammon turn engine with legal-move generation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to an engine config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drive a game from stdin, one command per line, JSON on stdout
    Play,

    /// Play random legal games and check invariants after every move
    Soak {
        /// Number of games to play
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Seed overriding the config file
        #[arg(short, long)]
        seed: Option<u64>,
    },
}
