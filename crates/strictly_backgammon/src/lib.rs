//! Strictly Backgammon - a pure backgammon rules engine
//!
//! Holds the board, rolls and tracks the dice, generates every legal move
//! (including compound moves that spend several dice), applies moves with
//! hitting and bearing off, and drives the six-phase turn cycle.
//!
//! # Architecture
//!
//! - **Board**: 28 locations (24 field points, a bar and a home per colour)
//! - **Rules**: pure move generation, bear-off gating and win detection
//! - **Game**: phase-gated facade the input layer talks to
//! - **Contracts/Invariants**: checked pre- and postconditions on every move
//!
//! # Example
//!
//! ```
//! use strictly_backgammon::{BoardState, DiceSource, Game, Phase};
//!
//! # fn example() -> Result<(), strictly_backgammon::EngineError> {
//! let mut game = Game::new(BoardState::standard(), DiceSource::scripted([(3, 5)])?);
//! game.roll_dice()?;
//! game.tick();
//! assert_eq!(game.phase(), Phase::BlackMove);
//!
//! let mv = game.legal_moves()?.into_iter().next().expect("opening has moves");
//! game.apply_move(&mv)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod config;
mod dice;
mod error;
mod game;
mod phases;
mod point;
mod snapshot;
mod soak;
mod types;

// Public modules
pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Core types
pub use types::{Color, STONES_PER_COLOR, Stone};

// Crate-level exports - Locations
pub use point::{
    BAR_PROGRESS, FIELD_POINTS, HOME_PROGRESS, HOME_QUADRANT_START, LOCATION_COUNT, Point,
    PointId, PointKind,
};

// Crate-level exports - Board and moves
pub use action::Move;
pub use board::BoardState;

// Crate-level exports - Dice
pub use dice::{DiceCombination, DiceSet, DiceSource, Die, unordered_pairs, usable_combinations};

// Crate-level exports - Errors
pub use error::EngineError;

// Crate-level exports - Turn cycle
pub use game::Game;
pub use phases::{Phase, PhaseInfo, PhaseKind, advance};
pub use snapshot::{BoardSnapshot, PointView};

// Crate-level exports - Rules
pub use rules::{MoveGenerator, check_winner};

// Crate-level exports - Configuration and soak runs
pub use config::{ConfigError, DiceMode, EngineConfig};
pub use soak::{MAX_TICKS_PER_GAME, SoakReport, run_soak};
