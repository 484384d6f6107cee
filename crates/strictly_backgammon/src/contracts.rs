//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}.

use crate::action::Move;
use crate::dice::{DiceSet, Die};
use crate::error::EngineError;
use crate::game::Game;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::phases::PhaseKind;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), EngineError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), EngineError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: nobody has won yet.
pub struct GameUndecided;

impl GameUndecided {
    /// Fails with `GameOver` once a winner exists.
    pub fn check(game: &Game) -> Result<(), EngineError> {
        match game.winner() {
            Some(winner) => Err(EngineError::GameOver { winner }),
            None => Ok(()),
        }
    }
}

/// Precondition: the engine is in a move phase.
pub struct InMovePhase;

impl InMovePhase {
    /// Fails with `OutOfPhase` naming `operation` outside move phases.
    pub fn check(game: &Game, operation: &'static str) -> Result<(), EngineError> {
        if game.phase().kind() == PhaseKind::Move {
            Ok(())
        } else {
            Err(EngineError::OutOfPhase {
                operation,
                phase: game.phase(),
            })
        }
    }
}

/// Precondition: the move is in the currently legal set.
pub struct MoveIsLegal;

impl MoveIsLegal {
    /// Fails with `IllegalMove` unless the generator produced `mv`.
    #[instrument(skip(game), fields(mv = %mv))]
    pub fn check(mv: &Move, game: &Game) -> Result<(), EngineError> {
        if game.legal_moves()?.contains(mv) {
            Ok(())
        } else {
            warn!("Move not in legal set");
            Err(EngineError::IllegalMove { mv: mv.clone() })
        }
    }
}

/// Composite precondition for applying a move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    pub fn check(mv: &Move, game: &Game) -> Result<(), EngineError> {
        GameUndecided::check(game)?;
        InMovePhase::check(game, "apply_move")?;
        MoveIsLegal::check(mv, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: exactly the spent dice left the held set.
pub struct DiceSpent;

impl DiceSpent {
    /// Fails with `InvariantViolation` unless `after` equals `before` minus
    /// `spent`, compared as multisets.
    pub fn check(before: &DiceSet, after: &DiceSet, spent: &[Die]) -> Result<(), EngineError> {
        let mut expected = before.clone();
        expected.consume(spent).map_err(|_| {
            EngineError::invariant("Postcondition failed: spent dice were not held")
        })?;

        let mut expected = expected.faces().to_vec();
        let mut actual = after.faces().to_vec();
        expected.sort();
        actual.sort();
        if expected == actual {
            Ok(())
        } else {
            warn!(?expected, ?actual, "Dice left after move do not match");
            Err(EngineError::invariant(format!(
                "Postcondition failed: expected dice {:?} left, found {:?}",
                expected, actual
            )))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Game not decided
/// - Move phase
/// - Move is currently legal
///
/// Postconditions:
/// - Board invariants hold
/// - Dice only shrank, and only by dice that were held
///
/// The exact dice accounting needs the move itself and lives in [`DiceSpent`].
pub struct MoveContract;

impl Contract<Game, Move> for MoveContract {
    fn pre(game: &Game, action: &Move) -> Result<(), EngineError> {
        LegalMove::check(action, game)
    }

    fn post(before: &Game, after: &Game) -> Result<(), EngineError> {
        BoardInvariants::check_all(after.board()).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            EngineError::invariant(format!("Postcondition failed: {}", descriptions))
        })?;

        if after.dice().remaining_count() >= before.dice().remaining_count() {
            return Err(EngineError::invariant(
                "Postcondition failed: no dice consumed",
            ));
        }

        // What is left must be a sub-multiset of what was held.
        let mut held = before.dice().clone();
        held.consume(after.dice().faces()).map_err(|_| {
            EngineError::invariant("Postcondition failed: dice appeared that were not held")
        })?;
        Ok(())
    }
}
