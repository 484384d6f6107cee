//! Legal-move generation.
//!
//! Single steps are checked directly against the board. Compound moves are
//! walked leg by leg on a scratch board so every leg sees the position left by
//! the one before it: a hit on a waypoint, a bar that just emptied, or the
//! last straggler entering the home quadrant.

use super::bear_off::bear_off_allowed;
use crate::action::Move;
use crate::board::BoardState;
use crate::dice::{DiceCombination, Die};
use crate::point::{HOME_PROGRESS, PointId};
use crate::types::Color;
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace};

/// Where a stone of `color` on `origin` lands with `die`, if it may move.
///
/// Enforces, in order: the origin holds `color` on top; bar priority; an
/// open landing point for field moves; bear-off gating for moves that reach
/// or pass home.
pub fn step_target(board: &BoardState, origin: PointId, die: Die, color: Color) -> Option<PointId> {
    if !board.point(origin).is_possible_start(color) {
        return None;
    }
    if board.bar_count(color) > 0 && origin != PointId::bar(color) {
        return None;
    }

    let progress = origin.progress(color)?;
    let target = progress + die.value();

    if target < HOME_PROGRESS {
        let destination = PointId::from_progress(color, target)?;
        board
            .point(destination)
            .is_possible_end(color)
            .then_some(destination)
    } else {
        bear_off_allowed(board, color, progress, target).then(|| PointId::home(color))
    }
}

/// Walks one stone from `origin` through `dice` in order.
///
/// Returns `None` as soon as a leg is illegal or the stone reaches home with
/// dice left over.
fn walk(board: &BoardState, origin: PointId, dice: &[Die], color: Color) -> Option<Move> {
    if let [die] = dice {
        let destination = step_target(board, origin, *die, color)?;
        return Some(Move::single(origin, destination, *die));
    }

    let mut scratch = board.clone();
    let mut position = origin;
    let mut waypoints = Vec::with_capacity(dice.len().saturating_sub(1));

    for (leg, die) in dice.iter().enumerate() {
        if leg > 0 {
            if position.is_home() {
                return None;
            }
            waypoints.push(position);
        }
        let target = step_target(&scratch, position, *die, color)?;
        scratch.relocate(position, target).ok()?;
        position = target;
    }

    Some(Move::new(origin, position, dice.to_vec(), waypoints))
}

/// Enumerates legal moves for one colour on a borrowed board.
#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator<'a> {
    board: &'a BoardState,
}

impl<'a> MoveGenerator<'a> {
    /// Creates a generator over `board`.
    pub fn new(board: &'a BoardState) -> Self {
        Self { board }
    }

    /// Locations a stone of `color` may start from.
    ///
    /// Only the bar while it holds any of `color`'s stones.
    pub fn origins(&self, color: Color) -> Vec<PointId> {
        if self.board.bar_count(color) > 0 {
            return vec![PointId::bar(color)];
        }
        self.board.occupied_by(color).map(|p| p.id()).collect()
    }

    /// Every legal move for `color` across the given combinations.
    #[instrument(skip(self, combinations), fields(combinations = combinations.len()))]
    pub fn legal_moves(&self, color: Color, combinations: &[DiceCombination]) -> BTreeSet<Move> {
        let origins = self.origins(color);
        let mut moves = BTreeSet::new();

        for combination in combinations {
            for ordering in combination.orderings() {
                for origin in &origins {
                    if let Some(mv) = walk(self.board, *origin, &ordering, color) {
                        trace!(%mv, "Legal move");
                        moves.insert(mv);
                    }
                }
            }
        }

        debug!(count = moves.len(), "Generated legal moves");
        moves
    }

    /// Legal moves for `color` that end on `destination`.
    pub fn legal_moves_to(
        &self,
        color: Color,
        combinations: &[DiceCombination],
        destination: PointId,
    ) -> BTreeSet<Move> {
        self.legal_moves(color, combinations)
            .into_iter()
            .filter(|mv| mv.destination() == destination)
            .collect()
    }

    /// Legal moves for `color` that start on `origin`.
    pub fn legal_moves_from(
        &self,
        color: Color,
        combinations: &[DiceCombination],
        origin: PointId,
    ) -> BTreeSet<Move> {
        self.legal_moves(color, combinations)
            .into_iter()
            .filter(|mv| mv.origin() == origin)
            .collect()
    }

    /// True if any held die can move any stone of `color`.
    ///
    /// Every compound move starts with a legal single step, so checking the
    /// single dice is enough.
    pub fn has_possible_moves(&self, color: Color, combinations: &[DiceCombination]) -> bool {
        let mut dice: Vec<Die> = combinations
            .iter()
            .flat_map(|c| c.dice().iter().copied())
            .collect();
        dice.sort();
        dice.dedup();

        let origins = self.origins(color);
        dice.iter().any(|die| {
            origins
                .iter()
                .any(|origin| step_target(self.board, *origin, *die, color).is_some())
        })
    }
}
