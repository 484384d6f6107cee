//! Read-only projections of engine state for rendering.

use crate::board::BoardState;
use crate::dice::{DiceSet, Die};
use crate::phases::Phase;
use crate::point::PointId;
use crate::types::Color;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One location as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PointView {
    /// Location.
    point: PointId,
    /// Colour of the stones, if any.
    color: Option<Color>,
    /// Number of stones.
    count: usize,
}

/// Everything a renderer needs after an input event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BoardSnapshot {
    /// Every location in code order.
    points: Vec<PointView>,
    /// Dice not yet spent.
    dice: Vec<Die>,
    /// Active phase.
    phase: Phase,
    /// Winner, once decided.
    winner: Option<Color>,
}

impl BoardSnapshot {
    /// Projects the given engine state.
    pub fn capture(
        board: &BoardState,
        dice: &DiceSet,
        phase: Phase,
        winner: Option<Color>,
    ) -> Self {
        let points = board
            .points()
            .iter()
            .map(|p| PointView {
                point: p.id(),
                color: p.color(),
                count: p.len(),
            })
            .collect();
        Self {
            points,
            dice: dice.faces().to_vec(),
            phase,
            winner,
        }
    }

    /// View of a single location.
    pub fn point(&self, id: PointId) -> Option<&PointView> {
        self.points.iter().find(|view| view.point == id)
    }

    /// Stone count at `id`, zero if absent.
    pub fn count_at(&self, id: PointId) -> usize {
        self.point(id).map_or(0, |view| view.count)
    }
}
