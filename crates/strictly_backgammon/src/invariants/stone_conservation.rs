//! Stone conservation: each side always owns exactly 15 stones.

use super::Invariant;
use crate::board::BoardState;
use crate::types::{Color, STONES_PER_COLOR};
use strum::IntoEnumIterator;
use tracing::warn;

/// Invariant: stones are relocated, never created or destroyed.
///
/// Counts field, bar and home together.
pub struct StoneConservationInvariant;

impl Invariant<BoardState> for StoneConservationInvariant {
    fn holds(board: &BoardState) -> bool {
        Color::iter().all(|color| {
            let count = board.stone_count(color);
            if count != STONES_PER_COLOR {
                warn!(%color, count, "Stone conservation violated");
            }
            count == STONES_PER_COLOR
        })
    }

    fn description() -> &'static str {
        "Each colour has exactly 15 stones across field, bar and home"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Die, Move, PointId};

    #[test]
    fn test_opening_holds() {
        assert!(StoneConservationInvariant::holds(&BoardState::standard()));
    }

    #[test]
    fn test_holds_after_hit() {
        let pt = |n| PointId::field(n).unwrap();
        let mut board = BoardState::from_layout(&[
            (pt(1), Color::Black, 15),
            (pt(5), Color::White, 1),
            (pt(20), Color::White, 14),
        ])
        .unwrap();
        board
            .apply_move(&Move::single(pt(1), pt(5), Die::new(4).unwrap()))
            .unwrap();
        assert!(StoneConservationInvariant::holds(&board));
    }
}
