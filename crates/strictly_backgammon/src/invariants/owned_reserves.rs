//! Bars and homes only hold their owner's stones.

use super::Invariant;
use crate::board::BoardState;
use crate::point::PointKind;

/// Invariant: a colour's bar and home contain only that colour.
pub struct OwnedReservesInvariant;

impl Invariant<BoardState> for OwnedReservesInvariant {
    fn holds(board: &BoardState) -> bool {
        board.points().iter().all(|point| match point.id().kind() {
            PointKind::Bar(owner) | PointKind::Home(owner) => {
                point.stones().iter().all(|s| s.color() == owner)
            }
            PointKind::Field(_) => true,
        })
    }

    fn description() -> &'static str {
        "Bars and homes hold only their owner's stones"
    }
}
