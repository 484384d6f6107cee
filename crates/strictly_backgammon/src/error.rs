//! Engine error types.

use crate::action::Move;
use crate::dice::Die;
use crate::phases::Phase;
use crate::types::Color;

/// Error returned by a failed engine operation.
///
/// Every failure is reported synchronously and leaves the engine unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The operation is not permitted in the current phase.
    #[display("{operation} is not allowed during {phase}")]
    OutOfPhase {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Phase the engine was in.
        phase: Phase,
    },

    /// The move is not in the currently legal set.
    #[display("Illegal move: {mv}")]
    IllegalMove {
        /// The rejected move.
        mv: Move,
    },

    /// The requested dice are not all held.
    #[display("Insufficient dice: requested {requested:?}, holding {held:?}")]
    InsufficientDice {
        /// Dice the caller tried to consume.
        requested: Vec<Die>,
        /// Dice actually held.
        held: Vec<Die>,
    },

    /// A board or dice invariant no longer holds. Indicates an engine bug.
    #[display("Invariant violation: {description}")]
    InvariantViolation {
        /// Which invariant failed.
        description: String,
    },

    /// A die face outside 1-6.
    #[display("Invalid die face {value} (expected 1-6)")]
    InvalidDie {
        /// The rejected value.
        value: u8,
    },

    /// A location code that is not on the board.
    #[display("Invalid point code {code} (expected -1 to 26)")]
    InvalidPoint {
        /// The rejected code.
        code: i16,
    },

    /// The game already has a winner.
    #[display("Game is over: {winner} has won")]
    GameOver {
        /// The winning side.
        winner: Color,
    },

    /// A scripted dice source ran out of rolls.
    #[display("Dice source has no rolls left")]
    DiceExhausted,
}

impl std::error::Error for EngineError {}

impl EngineError {
    /// Builds an invariant violation from a description.
    pub fn invariant(description: impl Into<String>) -> Self {
        Self::InvariantViolation {
            description: description.into(),
        }
    }
}
