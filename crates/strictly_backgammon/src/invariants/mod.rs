//! First-class invariants for backgammon boards.
//!
//! Invariants are logical properties that must hold for every reachable
//! board. They are checked as move postconditions and when a custom layout is
//! built, and can be tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violation, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod owned_reserves;
pub mod single_color;
pub mod stone_conservation;

pub use owned_reserves::OwnedReservesInvariant;
pub use single_color::SingleColorPointsInvariant;
pub use stone_conservation::StoneConservationInvariant;

/// All board invariants as a composable set.
pub type BoardInvariants = (
    StoneConservationInvariant,
    SingleColorPointsInvariant,
    OwnedReservesInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardState, Color, PointId};

    #[test]
    fn test_invariant_set_holds_for_opening() {
        let board = BoardState::standard();
        assert!(BoardInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut corrupt = BoardState::standard();
        corrupt.place_unchecked(PointId::BLACK_BAR, Color::White, 1);

        let violations = BoardInvariants::check_all(&corrupt).unwrap_err();
        assert_eq!(violations.len(), 2, "{violations:?}");
        assert_eq!(corrupt.stone_count(Color::White), 16);
    }
}
