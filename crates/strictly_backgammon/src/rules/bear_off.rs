//! Bearing-off rules.

use crate::board::BoardState;
use crate::point::HOME_PROGRESS;
use crate::types::Color;

/// True once `color` may start bearing off: nothing on the bar and every
/// stone in play inside the home quadrant.
pub fn can_bear_off(board: &BoardState, color: Color) -> bool {
    board.all_in_home_quadrant(color)
}

/// Whether a stone of `color` at `from_progress` may bear off with a die
/// that carries it to `target` (at least [`HOME_PROGRESS`]).
///
/// An exact roll always works once bearing off is allowed. A larger roll only
/// works from the rearmost occupied point.
pub fn bear_off_allowed(board: &BoardState, color: Color, from_progress: u8, target: u8) -> bool {
    if target < HOME_PROGRESS || !can_bear_off(board, color) {
        return false;
    }
    target == HOME_PROGRESS || !board.has_stone_behind(color, from_progress)
}
