//! First-class move values.
//!
//! A move is derived fresh from the board and dice every time legality is
//! computed. It holds dice by value, so it never aliases the live dice set.

use crate::dice::Die;
use crate::point::PointId;
use serde::{Deserialize, Serialize};

/// A stone travelling from `origin` to `destination`, spending one die per leg.
///
/// Compound moves visit `waypoints` between legs. Two orderings of the same
/// dice are distinct moves because they pass (and may hit) different points.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    origin: PointId,
    destination: PointId,
    dice: Vec<Die>,
    waypoints: Vec<PointId>,
}

impl Move {
    /// Creates a move from its parts.
    ///
    /// `dice` lists the dice in the order the legs are taken and
    /// `waypoints` holds one point fewer than `dice`.
    pub fn new(
        origin: PointId,
        destination: PointId,
        dice: Vec<Die>,
        waypoints: Vec<PointId>,
    ) -> Self {
        Self {
            origin,
            destination,
            dice,
            waypoints,
        }
    }

    /// Creates a single-die move.
    pub fn single(origin: PointId, destination: PointId, die: Die) -> Self {
        Self::new(origin, destination, vec![die], Vec::new())
    }

    /// Where the stone starts.
    pub fn origin(&self) -> PointId {
        self.origin
    }

    /// Where the stone ends.
    pub fn destination(&self) -> PointId {
        self.destination
    }

    /// Dice spent, in leg order.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Intermediate landing points of a compound move.
    pub fn waypoints(&self) -> &[PointId] {
        &self.waypoints
    }

    /// True if the move spends more than one die.
    pub fn is_compound(&self) -> bool {
        self.dice.len() > 1
    }

    /// True if the stone is borne off.
    pub fn is_bear_off(&self) -> bool {
        self.destination.is_home()
    }

    /// Consecutive `(from, to)` pairs, one per die.
    pub fn legs(&self) -> Vec<(PointId, PointId)> {
        let stops: Vec<PointId> = std::iter::once(self.origin)
            .chain(self.waypoints.iter().copied())
            .chain(std::iter::once(self.destination))
            .collect();
        stops.windows(2).map(|w| (w[0], w[1])).collect()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.origin)?;
        for waypoint in &self.waypoints {
            write!(f, " -> {}", waypoint)?;
        }
        let dice = self
            .dice
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, " -> {} [{}]", self.destination, dice)
    }
}
