//! Line-oriented driver for the `play` command.
//!
//! Reads one command per line and answers each with a single JSON line.
//! Engine errors are reported as `{"error": "..."}` and never end the session.

use derive_more::{Display, Error, From};
use serde_json::{Value, json};
use std::io::{BufRead, Write};
use std::str::FromStr;
use strictly_backgammon::{EngineError, Game, Move, PointId};
use tracing::{debug, instrument, warn};

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// Roll and commit the dice.
    Roll,
    /// Advance the turn cycle one step.
    Tick,
    /// Print the board snapshot.
    Board,
    /// List every legal move.
    Moves,
    /// List legal moves starting at a location code.
    From(i16),
    /// List legal moves ending at a location code.
    To(i16),
    /// Apply a move from the last listing, by index.
    Apply(usize),
    /// End the session.
    Quit,
}

/// A line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized command: {input}")]
pub struct ParseCommandError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for PlayCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let err = || ParseCommandError {
            input: line.to_string(),
        };
        let mut words = line.split_whitespace();
        let command = match (words.next(), words.next()) {
            (Some("roll"), None) => Self::Roll,
            (Some("tick"), None) => Self::Tick,
            (Some("board"), None) => Self::Board,
            (Some("moves"), None) => Self::Moves,
            (Some("from"), Some(code)) => Self::From(code.parse().map_err(|_| err())?),
            (Some("to"), Some(code)) => Self::To(code.parse().map_err(|_| err())?),
            (Some("apply"), Some(index)) => Self::Apply(index.parse().map_err(|_| err())?),
            (Some("quit"), None) => Self::Quit,
            _ => return Err(err()),
        };
        if words.next().is_some() {
            return Err(err());
        }
        Ok(command)
    }
}

/// Why a session command failed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum PlayError {
    /// The engine refused the request.
    #[display("{_0}")]
    Engine(EngineError),

    /// `apply` named an index the last listing does not have.
    #[display("No listed move at index {index} ({listed} listed)")]
    #[from(ignore)]
    UnknownListing {
        /// Requested index.
        index: usize,
        /// Length of the last listing.
        listed: usize,
    },
}

/// A game plus the move list most recently shown to the player.
#[derive(Debug)]
pub struct PlaySession {
    game: Game,
    listed: Vec<Move>,
}

impl PlaySession {
    /// Wraps `game`.
    pub fn new(game: Game) -> Self {
        Self {
            game,
            listed: Vec::new(),
        }
    }

    /// The driven game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Executes one command and returns its JSON answer.
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: PlayCommand) -> Result<Value, PlayError> {
        match command {
            PlayCommand::Roll => {
                let faces = self.game.roll_dice()?;
                Ok(json!({ "dice": faces }))
            }
            PlayCommand::Tick => Ok(json!(self.game.tick())),
            PlayCommand::Board => Ok(json!(self.game.current_board())),
            PlayCommand::Moves => {
                let moves = self.game.legal_moves()?;
                Ok(self.list(moves))
            }
            PlayCommand::From(code) => {
                let moves = self.game.legal_moves_from(PointId::from_code(code)?)?;
                Ok(self.list(moves))
            }
            PlayCommand::To(code) => {
                let moves = self.game.legal_moves_to(PointId::from_code(code)?)?;
                Ok(self.list(moves))
            }
            PlayCommand::Apply(index) => {
                let mv = self
                    .listed
                    .get(index)
                    .cloned()
                    .ok_or(PlayError::UnknownListing {
                        index,
                        listed: self.listed.len(),
                    })?;
                let snapshot = self.game.apply_move(&mv)?;
                self.listed.clear();
                Ok(json!({ "applied": mv, "board": snapshot }))
            }
            PlayCommand::Quit => Ok(json!({ "bye": true })),
        }
    }

    fn list(&mut self, moves: impl IntoIterator<Item = Move>) -> Value {
        self.listed = moves.into_iter().collect();
        let entries: Vec<Value> = self
            .listed
            .iter()
            .enumerate()
            .map(|(index, mv)| json!({ "index": index, "move": mv, "text": mv.to_string() }))
            .collect();
        json!({ "moves": entries })
    }
}

/// Runs a session until `quit` or end of input.
#[instrument(skip_all)]
pub fn run_session<R: BufRead, W: Write>(
    session: &mut PlaySession,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let answer = match trimmed.parse::<PlayCommand>() {
            Ok(command) => {
                debug!(?command, "Executing command");
                let answer = session
                    .execute(command)
                    .unwrap_or_else(|e| json!({ "error": e.to_string() }));
                if command == PlayCommand::Quit {
                    writeln!(output, "{}", answer)?;
                    break;
                }
                answer
            }
            Err(e) => {
                warn!(input = trimmed, "Unrecognized command");
                json!({ "error": e.to_string() })
            }
        };
        writeln!(output, "{}", answer)?;
    }
    output.flush()?;
    Ok(())
}
