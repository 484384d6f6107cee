//! Board locations and the stone stacks that live on them.
//!
//! Every location has a stable integer code:
//!
//! | code | location    |
//! |------|-------------|
//! | -1   | Black's bar |
//! | 0    | White's home|
//! | 1-24 | field points|
//! | 25   | Black's home|
//! | 26   | White's bar |
//!
//! Black travels upward through the codes and White downward, so each colour
//! measures its own *progress* from 0 (bar) to 25 (home).

use crate::error::EngineError;
use crate::types::{Color, Stone};
use serde::{Deserialize, Serialize};

/// Number of field points on the track.
pub const FIELD_POINTS: u8 = 24;

/// Progress of a stone sitting on its owner's bar.
pub const BAR_PROGRESS: u8 = 0;

/// Progress of a stone that has been borne off.
pub const HOME_PROGRESS: u8 = 25;

/// First progress value inside a colour's home quadrant (the last six points).
pub const HOME_QUADRANT_START: u8 = 19;

const MIN_CODE: i16 = -1;
const MAX_CODE: i16 = 26;

/// Total number of locations on the board: 24 field points, two bars, two homes.
pub const LOCATION_COUNT: usize = (MAX_CODE - MIN_CODE + 1) as usize;

/// A validated board location.
///
/// Construct through [`PointId::field`], [`PointId::bar`], [`PointId::home`]
/// or [`PointId::from_code`]; an existing `PointId` is always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct PointId(i16);

/// Structural view of a [`PointId`] for pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// A colour's bar, where hit stones wait to re-enter.
    Bar(Color),
    /// A field point numbered 1-24.
    Field(u8),
    /// A colour's home tally, where borne-off stones go.
    Home(Color),
}

impl PointId {
    /// Black's bar.
    pub const BLACK_BAR: PointId = PointId(-1);
    /// White's home.
    pub const WHITE_HOME: PointId = PointId(0);
    /// Black's home.
    pub const BLACK_HOME: PointId = PointId(25);
    /// White's bar.
    pub const WHITE_BAR: PointId = PointId(26);

    /// Returns the field point with the given number (1-24).
    pub fn field(number: u8) -> Result<Self, EngineError> {
        if (1..=FIELD_POINTS).contains(&number) {
            Ok(Self(i16::from(number)))
        } else {
            Err(EngineError::InvalidPoint {
                code: i16::from(number),
            })
        }
    }

    /// Returns the bar of the given colour.
    pub fn bar(color: Color) -> Self {
        match color {
            Color::Black => Self::BLACK_BAR,
            Color::White => Self::WHITE_BAR,
        }
    }

    /// Returns the home of the given colour.
    pub fn home(color: Color) -> Self {
        match color {
            Color::Black => Self::BLACK_HOME,
            Color::White => Self::WHITE_HOME,
        }
    }

    /// Parses an integer location code.
    pub fn from_code(code: i16) -> Result<Self, EngineError> {
        if (MIN_CODE..=MAX_CODE).contains(&code) {
            Ok(Self(code))
        } else {
            Err(EngineError::InvalidPoint { code })
        }
    }

    /// Returns the integer location code.
    pub fn code(self) -> i16 {
        self.0
    }

    /// Returns the structural kind of this location.
    pub fn kind(self) -> PointKind {
        match self {
            Self::BLACK_BAR => PointKind::Bar(Color::Black),
            Self::WHITE_BAR => PointKind::Bar(Color::White),
            Self::BLACK_HOME => PointKind::Home(Color::Black),
            Self::WHITE_HOME => PointKind::Home(Color::White),
            Self(n) => PointKind::Field(n as u8),
        }
    }

    /// True for field points 1-24.
    pub fn is_field(self) -> bool {
        matches!(self.kind(), PointKind::Field(_))
    }

    /// True for either bar.
    pub fn is_bar(self) -> bool {
        matches!(self.kind(), PointKind::Bar(_))
    }

    /// True for either home.
    pub fn is_home(self) -> bool {
        matches!(self.kind(), PointKind::Home(_))
    }

    /// Returns how far a stone of `color` on this location has travelled.
    ///
    /// `None` for the opponent's bar and home, which `color` never occupies.
    pub fn progress(self, color: Color) -> Option<u8> {
        match self.kind() {
            PointKind::Bar(owner) if owner == color => Some(BAR_PROGRESS),
            PointKind::Home(owner) if owner == color => Some(HOME_PROGRESS),
            PointKind::Field(n) => Some(match color {
                Color::Black => n,
                Color::White => HOME_PROGRESS - n,
            }),
            _ => None,
        }
    }

    /// Inverse of [`PointId::progress`].
    pub fn from_progress(color: Color, progress: u8) -> Option<Self> {
        match progress {
            BAR_PROGRESS => Some(Self::bar(color)),
            HOME_PROGRESS => Some(Self::home(color)),
            p if p < HOME_PROGRESS => Some(Self(i16::from(match color {
                Color::Black => p,
                Color::White => HOME_PROGRESS - p,
            }))),
            _ => None,
        }
    }

    /// All locations in code order.
    pub fn all() -> impl Iterator<Item = PointId> {
        (MIN_CODE..=MAX_CODE).map(PointId)
    }

    /// Field points 1-24 in code order.
    pub fn field_points() -> impl Iterator<Item = PointId> {
        (1..=i16::from(FIELD_POINTS)).map(PointId)
    }

    /// Storage slot for boards indexed by code.
    pub(crate) fn index(self) -> usize {
        (self.0 - MIN_CODE) as usize
    }
}

impl TryFrom<i16> for PointId {
    type Error = EngineError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<PointId> for i16 {
    fn from(point: PointId) -> Self {
        point.code()
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            PointKind::Bar(color) => write!(f, "bar({})", color),
            PointKind::Home(color) => write!(f, "home({})", color),
            PointKind::Field(n) => write!(f, "{}", n),
        }
    }
}

/// A board location together with its stack of stones.
///
/// The last stone in the stack is the top: the most recently placed one and
/// the next one to leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    id: PointId,
    stones: Vec<Stone>,
}

impl Point {
    /// Creates an empty point.
    pub fn new(id: PointId) -> Self {
        Self {
            id,
            stones: Vec::new(),
        }
    }

    /// Returns the location of this point.
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Returns the stones, bottom first.
    pub fn stones(&self) -> &[Stone] {
        &self.stones
    }

    /// Number of stones on the point.
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// True if no stones are on the point.
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Colour of the top stone, if any.
    pub fn color(&self) -> Option<Color> {
        self.stones.last().map(Stone::color)
    }

    /// Number of stones of `color` on the point.
    pub fn count_of(&self, color: Color) -> usize {
        self.stones.iter().filter(|s| s.color() == color).count()
    }

    /// True if the point holds exactly one stone of `color`.
    pub fn is_blot_of(&self, color: Color) -> bool {
        self.stones.len() == 1 && self.color() == Some(color)
    }

    /// Whether a stone of `color` may leave this point.
    ///
    /// Homes are terminal; a borne-off stone never moves again.
    pub fn is_possible_start(&self, color: Color) -> bool {
        !self.id.is_home() && self.color() == Some(color)
    }

    /// Whether a stone of `color` may land on this point.
    ///
    /// A field point is open when it is empty, holds `color`, or holds a single
    /// opposing stone (a hit). Bars are never landing spots; a home only takes
    /// its owner's stones.
    pub fn is_possible_end(&self, color: Color) -> bool {
        match self.id.kind() {
            PointKind::Bar(_) => false,
            PointKind::Home(owner) => owner == color,
            PointKind::Field(_) => self.stones.len() <= 1 || self.color() == Some(color),
        }
    }

    pub(crate) fn push(&mut self, stone: Stone) {
        self.stones.push(stone);
    }

    pub(crate) fn pop(&mut self) -> Option<Stone> {
        self.stones.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_codes_round_trip_through_kind() {
        assert_eq!(PointId::all().count(), LOCATION_COUNT);
        assert_eq!(PointId::BLACK_BAR.kind(), PointKind::Bar(Color::Black));
        assert_eq!(PointId::WHITE_BAR.kind(), PointKind::Bar(Color::White));
        assert_eq!(PointId::WHITE_HOME.kind(), PointKind::Home(Color::White));
        assert_eq!(PointId::BLACK_HOME.kind(), PointKind::Home(Color::Black));
        assert_eq!(PointId::field(7).unwrap().kind(), PointKind::Field(7));
    }

    #[test]
    fn test_invalid_codes_rejected() {
        assert!(PointId::field(0).is_err());
        assert!(PointId::field(25).is_err());
        assert!(PointId::from_code(-2).is_err());
        assert!(PointId::from_code(27).is_err());
    }

    #[test]
    fn test_progress_is_mirrored_between_colors() {
        let p5 = PointId::field(5).unwrap();
        assert_eq!(p5.progress(Color::Black), Some(5));
        assert_eq!(p5.progress(Color::White), Some(20));
        assert_eq!(PointId::BLACK_BAR.progress(Color::White), None);
        assert_eq!(PointId::WHITE_HOME.progress(Color::Black), None);

        for color in Color::iter() {
            for progress in 0..=HOME_PROGRESS {
                let point = PointId::from_progress(color, progress).unwrap();
                assert_eq!(point.progress(color), Some(progress));
            }
            assert_eq!(PointId::from_progress(color, 26), None);
        }
    }

    #[test]
    fn test_possible_end_rules() {
        let id = PointId::field(10).unwrap();
        let mut point = Point::new(id);
        assert!(point.is_possible_end(Color::Black));

        point.push(Stone::new(Color::White));
        assert!(point.is_possible_end(Color::Black), "single stone can be hit");
        assert!(point.is_blot_of(Color::White));

        point.push(Stone::new(Color::White));
        assert!(!point.is_possible_end(Color::Black), "two stones block");
        assert!(point.is_possible_end(Color::White));
    }

    #[test]
    fn test_bars_and_homes() {
        let mut home = Point::new(PointId::BLACK_HOME);
        home.push(Stone::new(Color::Black));
        assert!(!home.is_possible_start(Color::Black));
        assert!(home.is_possible_end(Color::Black));
        assert!(!home.is_possible_end(Color::White));

        let mut bar = Point::new(PointId::WHITE_BAR);
        assert!(!bar.is_possible_end(Color::White));
        bar.push(Stone::new(Color::White));
        assert!(bar.is_possible_start(Color::White));
    }
}
