//! The engine facade: one board, one dice set, one turn cycle.
//!
//! The input layer drives a [`Game`] with discrete requests (roll, query,
//! move) and calls [`Game::tick`] after each one. Every mutating request is
//! gated on the active phase and fails with [`EngineError::OutOfPhase`]
//! otherwise.

use crate::action::Move;
use crate::board::BoardState;
use crate::config::EngineConfig;
use crate::contracts::{Contract, DiceSpent, GameUndecided, InMovePhase, MoveContract};
use crate::dice::{DiceSet, DiceSource, Die};
use crate::error::EngineError;
use crate::phases::{self, Phase, PhaseInfo, PhaseKind};
use crate::point::PointId;
use crate::rules::{MoveGenerator, check_winner};
use crate::snapshot::BoardSnapshot;
use crate::types::Color;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// A backgammon game in progress (or decided).
#[derive(Debug, Clone)]
pub struct Game {
    board: BoardState,
    dice: DiceSet,
    source: DiceSource,
    phase: Phase,
    /// Set once this turn's dice are rolled; rolling is disabled until the
    /// next roll phase.
    dice_committed: bool,
    message: String,
    check_invariants: bool,
}

impl Game {
    /// Creates a game on `board` rolling from `source`, starting at Black's roll.
    #[instrument(skip(board, source))]
    pub fn new(board: BoardState, source: DiceSource) -> Self {
        let mut game = Self {
            board,
            dice: DiceSet::new(),
            source,
            phase: Phase::INITIAL,
            dice_committed: false,
            message: String::new(),
            check_invariants: true,
        };
        game.prepare_phase();
        game
    }

    /// Creates a game from the opening position using `config`.
    #[instrument(skip(config))]
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut game = Self::new(BoardState::standard(), config.dice_source());
        game.check_invariants = *config.check_invariants();
        game
    }

    /// Active phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Dice still held this turn.
    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// Message for the current phase.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True once this turn's dice are rolled.
    pub fn is_dice_committed(&self) -> bool {
        self.dice_committed
    }

    /// The winner, if any.
    pub fn winner(&self) -> Option<Color> {
        check_winner(&self.board)
    }

    /// Rolls and commits this turn's dice.
    ///
    /// Only valid once per roll phase.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn roll_dice(&mut self) -> Result<Vec<Die>, EngineError> {
        GameUndecided::check(self)?;
        if self.phase.kind() != PhaseKind::Roll || self.dice_committed {
            warn!(committed = self.dice_committed, "Roll requested out of phase");
            return Err(EngineError::OutOfPhase {
                operation: "roll_dice",
                phase: self.phase,
            });
        }

        let faces = self.dice.roll(&mut self.source)?.to_vec();
        self.dice_committed = true;
        info!(color = %self.phase.color(), ?faces, "Dice committed");
        Ok(faces)
    }

    fn generator(&self) -> MoveGenerator<'_> {
        MoveGenerator::new(&self.board)
    }

    fn ensure_move_phase(&self, operation: &'static str) -> Result<(), EngineError> {
        GameUndecided::check(self)?;
        InMovePhase::check(self, operation)
    }

    /// Every move currently legal for the side to move.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn legal_moves(&self) -> Result<BTreeSet<Move>, EngineError> {
        self.ensure_move_phase("legal_moves")?;
        Ok(self.generator().legal_moves(
            self.phase.color(),
            &self.dice.distinct_usable_combinations(),
        ))
    }

    /// Legal moves that start on `origin`.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn legal_moves_from(&self, origin: PointId) -> Result<BTreeSet<Move>, EngineError> {
        self.ensure_move_phase("legal_moves_from")?;
        Ok(self.generator().legal_moves_from(
            self.phase.color(),
            &self.dice.distinct_usable_combinations(),
            origin,
        ))
    }

    /// Legal moves that end on `destination`.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn legal_moves_to(&self, destination: PointId) -> Result<BTreeSet<Move>, EngineError> {
        self.ensure_move_phase("legal_moves_to")?;
        Ok(self.generator().legal_moves_to(
            self.phase.color(),
            &self.dice.distinct_usable_combinations(),
            destination,
        ))
    }

    /// True if the side to move can use any held die.
    pub fn has_possible_moves(&self) -> bool {
        self.generator().has_possible_moves(
            self.phase.color(),
            &self.dice.distinct_usable_combinations(),
        )
    }

    /// Applies a legal move and spends its dice.
    ///
    /// All or nothing: on any error the board and dice are unchanged.
    #[instrument(skip(self, mv), fields(phase = %self.phase, mv = %mv))]
    pub fn apply_move(&mut self, mv: &Move) -> Result<BoardSnapshot, EngineError> {
        MoveContract::pre(self, mv)?;

        let mut next = self.clone();
        let hits = next.board.apply_move(mv)?;
        next.dice.consume(mv.dice())?;

        if self.check_invariants {
            MoveContract::post(self, &next)?;
            DiceSpent::check(&self.dice, &next.dice, mv.dice())?;
        }

        *self = next;
        info!(?hits, remaining = self.dice.remaining_count(), "Move applied");
        Ok(self.current_board())
    }

    /// Drives the turn cycle by at most one step.
    ///
    /// A decided game stays where it is and reports the winner on every call.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn tick(&mut self) -> PhaseInfo {
        if let Some(winner) = self.winner() {
            self.message = format!("{} WINS!!!", winner.label());
            debug!(%winner, "Game decided");
            return self.phase_info();
        }

        let next = phases::advance(self.phase, self.exit_condition_met());
        if next != self.phase {
            info!(from = %self.phase, to = %next, "Phase transition");
            self.phase = next;
            self.prepare_phase();
        }
        self.phase_info()
    }

    fn exit_condition_met(&self) -> bool {
        match self.phase.kind() {
            PhaseKind::Roll => self.dice_committed,
            PhaseKind::Move => self.dice.is_empty() || !self.has_possible_moves(),
            PhaseKind::End => true,
        }
    }

    fn prepare_phase(&mut self) {
        let color = self.phase.color();
        match self.phase.kind() {
            PhaseKind::Roll => {
                self.dice.clear();
                self.dice_committed = false;
                self.message = "ROLL DICE".to_string();
            }
            PhaseKind::Move => {
                self.message = format!("{}'S TURN", color.label());
                if !self.has_possible_moves() {
                    info!(
                        %color,
                        faces = ?self.dice.faces(),
                        "No legal move; turn will be skipped"
                    );
                }
            }
            PhaseKind::End => {
                if !self.dice.is_empty() {
                    debug!(%color, faces = ?self.dice.faces(), "Unusable dice forfeited");
                }
            }
        }
    }

    fn phase_info(&self) -> PhaseInfo {
        PhaseInfo::new(self.phase, self.message.clone(), self.winner())
    }

    /// Read-only projection for rendering.
    pub fn current_board(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.board, &self.dice, self.phase, self.winner())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
