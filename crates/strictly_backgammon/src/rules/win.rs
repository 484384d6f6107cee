//! Win detection.

use crate::board::BoardState;
use crate::types::{Color, STONES_PER_COLOR};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Returns the colour that has borne off all 15 stones, if any.
#[instrument(skip(board))]
pub fn check_winner(board: &BoardState) -> Option<Color> {
    Color::iter().find(|color| board.home_count(*color) == STONES_PER_COLOR)
}
