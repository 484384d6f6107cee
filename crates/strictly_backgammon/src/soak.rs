//! Self-play soak runs.
//!
//! Plays whole games with uniformly random legal moves and checks the board
//! invariants after every move. Useful for shaking out rule bugs that
//! hand-built positions miss.

use crate::board::BoardState;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::game::Game;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::phases::PhaseKind;
use crate::types::Color;
use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Upper bound on engine ticks per game before the run is declared stuck.
pub const MAX_TICKS_PER_GAME: usize = 100_000;

/// Totals over a soak run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SoakReport {
    /// Games played to completion.
    games: usize,
    /// Moves applied across all games.
    moves: usize,
    /// Turns started across all games.
    turns: usize,
    /// Turns that ended with dice nobody could use.
    skipped_turns: usize,
    /// Games Black won.
    black_wins: usize,
    /// Games White won.
    white_wins: usize,
}

impl SoakReport {
    fn record_win(&mut self, winner: Color) {
        match winner {
            Color::Black => self.black_wins += 1,
            Color::White => self.white_wins += 1,
        }
    }
}

/// Plays `games` random games under `config`.
///
/// With a seed in `config` the whole run is reproducible: game `i` rolls
/// from `seed + i` and moves are picked from a generator seeded with `seed`.
#[instrument(skip(config), fields(seed = ?config.seed()))]
pub fn run_soak(config: &EngineConfig, games: usize) -> Result<SoakReport, EngineError> {
    let mut chooser = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };

    let mut report = SoakReport::default();
    for index in 0..games {
        let game_config = match config.seed() {
            Some(seed) => config.clone().with_seed(seed.wrapping_add(index as u64)),
            None => config.clone(),
        };
        let winner = play_one(&game_config, &mut chooser, &mut report)?;
        report.games += 1;
        report.record_win(winner);
        debug!(game = index, %winner, "Soak game finished");
    }

    info!(
        games = report.games,
        moves = report.moves,
        black_wins = report.black_wins,
        white_wins = report.white_wins,
        "Soak run complete"
    );
    Ok(report)
}

fn play_one(
    config: &EngineConfig,
    chooser: &mut StdRng,
    report: &mut SoakReport,
) -> Result<Color, EngineError> {
    let mut game = Game::new(BoardState::standard(), config.dice_source());

    for _ in 0..MAX_TICKS_PER_GAME {
        if let Some(winner) = game.winner() {
            return Ok(winner);
        }

        match game.phase().kind() {
            PhaseKind::Roll => {
                if !game.is_dice_committed() {
                    game.roll_dice()?;
                    report.turns += 1;
                }
            }
            PhaseKind::Move => {
                let legal = game.legal_moves()?;
                match legal.iter().choose(chooser) {
                    Some(mv) => {
                        let mv = mv.clone();
                        game.apply_move(&mv)?;
                        report.moves += 1;
                        check_board(game.board())?;
                    }
                    None => {
                        if !game.dice().is_empty() {
                            report.skipped_turns += 1;
                        }
                    }
                }
            }
            PhaseKind::End => {}
        }
        game.tick();
    }

    Err(EngineError::invariant(format!(
        "game did not finish within {} ticks",
        MAX_TICKS_PER_GAME
    )))
}

fn check_board(board: &BoardState) -> Result<(), EngineError> {
    BoardInvariants::check_all(board).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        EngineError::invariant(descriptions)
    })
}
