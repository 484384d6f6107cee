//! Single-colour points: a stack never mixes colours.

use super::Invariant;
use crate::board::BoardState;

/// Invariant: every location holds stones of at most one colour.
///
/// A hit removes the lone opposing stone before the mover lands, so mixed
/// stacks never exist, not even transiently.
pub struct SingleColorPointsInvariant;

impl Invariant<BoardState> for SingleColorPointsInvariant {
    fn holds(board: &BoardState) -> bool {
        board.points().iter().all(|point| {
            point
                .stones()
                .windows(2)
                .all(|pair| pair[0].color() == pair[1].color())
        })
    }

    fn description() -> &'static str {
        "No location holds stones of both colours"
    }
}
