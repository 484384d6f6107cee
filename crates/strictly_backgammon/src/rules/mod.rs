//! Game rules for backgammon.
//!
//! Pure functions and a borrowing move generator over [`BoardState`]. Rules
//! are kept apart from the engine so they can be composed into contracts and
//! tested against hand-built boards.
//!
//! [`BoardState`]: crate::BoardState

pub mod bear_off;
pub mod movegen;
pub mod win;

pub use bear_off::{bear_off_allowed, can_bear_off};
pub use movegen::{MoveGenerator, step_target};
pub use win::check_winner;
