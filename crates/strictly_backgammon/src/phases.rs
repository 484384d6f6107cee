//! Turn phases and the pure transition function.
//!
//! A turn is roll, move, end. The two colours alternate, giving a fixed
//! six-phase cycle that starts with Black's roll.

use crate::types::Color;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What a phase is for, independent of colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Waiting for the dice to be rolled and committed.
    Roll,
    /// Moves are accepted until the dice are spent or unusable.
    Move,
    /// Turn hand-over.
    End,
}

/// One step of the turn cycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Phase {
    /// Black rolls.
    #[display("BLACK_ROLL")]
    BlackRoll,
    /// Black moves.
    #[display("BLACK_MOVE")]
    BlackMove,
    /// Black's turn ends.
    #[display("BLACK_END")]
    BlackEnd,
    /// White rolls.
    #[display("WHITE_ROLL")]
    WhiteRoll,
    /// White moves.
    #[display("WHITE_MOVE")]
    WhiteMove,
    /// White's turn ends.
    #[display("WHITE_END")]
    WhiteEnd,
}

impl Phase {
    /// Phase every game starts in.
    pub const INITIAL: Phase = Phase::BlackRoll;

    /// Builds the phase for `color` and `kind`.
    pub fn of(color: Color, kind: PhaseKind) -> Self {
        match (color, kind) {
            (Color::Black, PhaseKind::Roll) => Phase::BlackRoll,
            (Color::Black, PhaseKind::Move) => Phase::BlackMove,
            (Color::Black, PhaseKind::End) => Phase::BlackEnd,
            (Color::White, PhaseKind::Roll) => Phase::WhiteRoll,
            (Color::White, PhaseKind::Move) => Phase::WhiteMove,
            (Color::White, PhaseKind::End) => Phase::WhiteEnd,
        }
    }

    /// Colour whose turn this is.
    pub fn color(self) -> Color {
        match self {
            Phase::BlackRoll | Phase::BlackMove | Phase::BlackEnd => Color::Black,
            Phase::WhiteRoll | Phase::WhiteMove | Phase::WhiteEnd => Color::White,
        }
    }

    /// What this phase is for.
    pub fn kind(self) -> PhaseKind {
        match self {
            Phase::BlackRoll | Phase::WhiteRoll => PhaseKind::Roll,
            Phase::BlackMove | Phase::WhiteMove => PhaseKind::Move,
            Phase::BlackEnd | Phase::WhiteEnd => PhaseKind::End,
        }
    }

    /// The phase after this one in the cycle.
    pub fn next(self) -> Self {
        match self.kind() {
            PhaseKind::Roll => Self::of(self.color(), PhaseKind::Move),
            PhaseKind::Move => Self::of(self.color(), PhaseKind::End),
            PhaseKind::End => Self::of(self.color().opponent(), PhaseKind::Roll),
        }
    }
}

/// Advances `phase` by one step when its exit condition is met.
pub fn advance(phase: Phase, exit_met: bool) -> Phase {
    if exit_met { phase.next() } else { phase }
}

/// What `tick` reports back to the input layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct PhaseInfo {
    /// Phase after the tick.
    phase: Phase,
    /// Message to show the players.
    message: String,
    /// Winner, once the game is decided.
    winner: Option<Color>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_cycle_order() {
        let mut phase = Phase::INITIAL;
        let mut seen = vec![phase];
        for _ in 0..5 {
            phase = phase.next();
            seen.push(phase);
        }
        assert_eq!(seen, Phase::iter().collect::<Vec<_>>());
        assert_eq!(phase.next(), Phase::INITIAL);
    }

    #[test]
    fn test_advance_only_on_exit() {
        for phase in Phase::iter() {
            assert_eq!(advance(phase, false), phase);
            assert_eq!(advance(phase, true), phase.next());
        }
    }

    #[test]
    fn test_of_inverts_color_and_kind() {
        for phase in Phase::iter() {
            assert_eq!(Phase::of(phase.color(), phase.kind()), phase);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::WhiteMove.to_string(), "WHITE_MOVE");
    }
}
