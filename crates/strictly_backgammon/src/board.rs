//! Board state: every location and the stones on it.

use crate::action::Move;
use crate::error::EngineError;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::point::{HOME_QUADRANT_START, LOCATION_COUNT, Point, PointId, PointKind};
use crate::types::{Color, STONES_PER_COLOR, Stone};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Standard opening layout, listed from Black's side.
///
/// White's layout mirrors it: point `n` for Black is point `25 - n` for White.
const OPENING: [(u8, usize); 4] = [(1, 2), (12, 5), (17, 3), (19, 5)];

/// All 28 board locations.
///
/// Stones are only ever relocated, never created or destroyed, so each colour
/// owns [`STONES_PER_COLOR`] stones across field, bar and home for the whole
/// game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct BoardState {
    /// Indexed by [`PointId::index`].
    points: Vec<Point>,
}

/// Unvalidated wire form of a [`BoardState`].
#[derive(Deserialize)]
struct RawBoard {
    points: Vec<Point>,
}

impl TryFrom<RawBoard> for BoardState {
    type Error = EngineError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.points.len() != LOCATION_COUNT {
            return Err(EngineError::invariant(format!(
                "board has {} locations, expected {}",
                raw.points.len(),
                LOCATION_COUNT
            )));
        }
        if let Some((index, point)) = raw
            .points
            .iter()
            .enumerate()
            .find(|(index, point)| point.id().index() != *index)
        {
            return Err(EngineError::invariant(format!(
                "location {} stored at slot {}",
                point.id(),
                index
            )));
        }

        let board = Self { points: raw.points };
        BoardInvariants::check_all(&board).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Rejected deserialized board");
            EngineError::invariant(descriptions)
        })?;
        Ok(board)
    }
}

impl BoardState {
    fn empty() -> Self {
        let points: Vec<Point> = PointId::all().map(Point::new).collect();
        debug_assert_eq!(points.len(), LOCATION_COUNT);
        Self { points }
    }

    fn place(&mut self, id: PointId, color: Color, count: usize) {
        let point = self.point_mut(id);
        for _ in 0..count {
            point.push(Stone::new(color));
        }
    }

    /// Creates the standard opening position.
    #[instrument]
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (progress, count) in OPENING {
            for color in [Color::Black, Color::White] {
                if let Some(id) = PointId::from_progress(color, progress) {
                    board.place(id, color, count);
                }
            }
        }
        board
    }

    /// Creates a board from `(location, colour, count)` entries.
    ///
    /// The layout must account for all 15 stones of each colour and must not
    /// mix colours on a location.
    #[instrument(skip(layout))]
    pub fn from_layout(layout: &[(PointId, Color, usize)]) -> Result<Self, EngineError> {
        let mut board = Self::empty();
        for (id, color, count) in layout {
            board.place(*id, *color, *count);
        }
        BoardInvariants::check_all(&board).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Rejected board layout");
            EngineError::invariant(descriptions)
        })?;
        Ok(board)
    }

    /// Returns the point at `id`.
    pub fn point(&self, id: PointId) -> &Point {
        &self.points[id.index()]
    }

    /// Places stones without any validation, for building broken boards.
    #[cfg(test)]
    pub(crate) fn place_unchecked(&mut self, id: PointId, color: Color, count: usize) {
        self.place(id, color, count);
    }

    fn point_mut(&mut self, id: PointId) -> &mut Point {
        &mut self.points[id.index()]
    }

    /// All points in code order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Stones of `color` waiting on its bar.
    pub fn bar_count(&self, color: Color) -> usize {
        self.point(PointId::bar(color)).len()
    }

    /// Stones of `color` already borne off.
    pub fn home_count(&self, color: Color) -> usize {
        self.point(PointId::home(color)).len()
    }

    /// Stones of `color` anywhere on the board.
    pub fn stone_count(&self, color: Color) -> usize {
        self.points.iter().map(|p| p.count_of(color)).sum()
    }

    /// Field points occupied by `color`.
    pub fn occupied_by(&self, color: Color) -> impl Iterator<Item = &Point> {
        self.points
            .iter()
            .filter(move |p| p.id().is_field() && p.color() == Some(color))
    }

    /// True if every stone of `color` still in play sits in its home quadrant.
    ///
    /// This is the precondition for bearing off.
    pub fn all_in_home_quadrant(&self, color: Color) -> bool {
        self.bar_count(color) == 0
            && self.occupied_by(color).all(|p| {
                p.id()
                    .progress(color)
                    .is_some_and(|progress| progress >= HOME_QUADRANT_START)
            })
    }

    /// True if `color` has a field stone with less progress than `progress`,
    /// i.e. one farther from home.
    pub fn has_stone_behind(&self, color: Color, progress: u8) -> bool {
        self.bar_count(color) > 0
            || self.occupied_by(color).any(|p| {
                p.id()
                    .progress(color)
                    .is_some_and(|other| other < progress)
            })
    }

    /// Moves the top stone of `from` onto `to`, hitting a lone opposing stone.
    ///
    /// Returns the location of the hit, if any. Stone counts are preserved.
    pub(crate) fn relocate(
        &mut self,
        from: PointId,
        to: PointId,
    ) -> Result<Option<PointId>, EngineError> {
        let color = self
            .point(from)
            .color()
            .ok_or_else(|| EngineError::invariant(format!("no stone on {}", from)))?;
        if !self.point(to).is_possible_end(color) {
            return Err(EngineError::invariant(format!(
                "{} is closed to {}",
                to, color
            )));
        }

        let mut hit = None;
        if let PointKind::Field(_) = to.kind() {
            let opponent = color.opponent();
            if self.point(to).is_blot_of(opponent) {
                if let Some(stone) = self.point_mut(to).pop() {
                    self.point_mut(PointId::bar(opponent)).push(stone);
                    hit = Some(to);
                }
            }
        }

        if let Some(stone) = self.point_mut(from).pop() {
            self.point_mut(to).push(stone);
        }
        Ok(hit)
    }

    /// Applies every leg of `mv`, all or nothing.
    ///
    /// Each leg pops the top stone of its origin; a lone opposing stone on the
    /// landing point is sent to its owner's bar first. Legality against the
    /// dice is the caller's concern: this only refuses legs that cannot be
    /// performed at all. Returns the points where hits happened.
    #[instrument(skip(self), fields(mv = %mv))]
    pub fn apply_move(&mut self, mv: &Move) -> Result<Vec<PointId>, EngineError> {
        let mut scratch = self.clone();
        let mut hits = Vec::new();
        for (from, to) in mv.legs() {
            match scratch.relocate(from, to) {
                Ok(Some(hit)) => hits.push(hit),
                Ok(None) => {}
                Err(err) => {
                    warn!(%err, "Move cannot be performed");
                    return Err(EngineError::IllegalMove { mv: mv.clone() });
                }
            }
        }
        debug!(?hits, "Move applied");
        *self = scratch;
        Ok(hits)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::standard()
    }
}
