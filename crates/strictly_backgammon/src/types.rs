//! Core domain types for backgammon.

use serde::{Deserialize, Serialize};

/// Number of stones each side owns for the whole game.
pub const STONES_PER_COLOR: usize = 15;

/// A side in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Color {
    /// Black rolls first and moves from point 1 toward point 24.
    Black,
    /// White moves from point 24 toward point 1.
    White,
}

impl Color {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Upper-case name used in turn and win messages.
    pub fn label(self) -> &'static str {
        match self {
            Color::Black => "BLACK",
            Color::White => "WHITE",
        }
    }
}

/// A single checker. Its colour is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stone {
    color: Color,
}

impl Stone {
    /// Creates a stone of the given colour.
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// Returns the stone's colour.
    pub fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opponent_is_an_involution() {
        for color in Color::iter() {
            assert_ne!(color.opponent(), color);
            assert_eq!(color.opponent().opponent(), color);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Color::Black.label(), "BLACK");
        assert_eq!(Color::White.label(), "WHITE");
        assert_eq!(Color::White.to_string(), "White");
    }
}
