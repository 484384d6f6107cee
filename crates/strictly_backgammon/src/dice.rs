//! Dice, dice sources, and the combinatorics of spending a roll.

use crate::error::EngineError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// A single die face, always in 1-6.
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
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Die(u8);

impl Die {
    /// Lowest face.
    pub const MIN: u8 = 1;
    /// Highest face.
    pub const MAX: u8 = 6;

    /// Creates a die showing `value`.
    pub fn new(value: u8) -> Result<Self, EngineError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(EngineError::InvalidDie { value })
        }
    }

    /// Face value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Die {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Die> for u8 {
    fn from(die: Die) -> Self {
        die.0
    }
}

/// One way of spending held dice in a single move.
///
/// A combination of more than one die is a compound move: the same stone
/// travels one leg per die.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceCombination(Vec<Die>);

impl DiceCombination {
    /// The dice in this combination.
    pub fn dice(&self) -> &[Die] {
        &self.0
    }

    /// Number of dice spent.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the combination spends no dice.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if more than one die is spent.
    pub fn is_compound(&self) -> bool {
        self.0.len() > 1
    }

    /// Total pips travelled.
    pub fn total(&self) -> u8 {
        self.0.iter().map(|d| d.value()).sum()
    }

    /// Distinct orders in which the legs can be taken.
    ///
    /// Two unequal dice can be played either way round; repeated faces have a
    /// single order.
    pub fn orderings(&self) -> Vec<Vec<Die>> {
        match self.0.as_slice() {
            [a, b] if a != b => vec![vec![*a, *b], vec![*b, *a]],
            dice => vec![dice.to_vec()],
        }
    }
}

impl std::fmt::Display for DiceCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces = self
            .0
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("+");
        write!(f, "{}", faces)
    }
}

/// Computes the distinct ways the held `faces` can be spent.
///
/// - No dice: nothing.
/// - One die: just that die.
/// - A run of one value (doubles): every count from all copies down to one.
/// - Otherwise: each distinct value alone, then all dice together.
///
/// Dice of equal value are interchangeable, so combinations are de-duplicated
/// by value.
pub fn usable_combinations(faces: &[Die]) -> Vec<DiceCombination> {
    match faces {
        [] => Vec::new(),
        [single] => vec![DiceCombination(vec![*single])],
        [first, rest @ ..] if rest.iter().all(|d| d == first) => (1..=faces.len())
            .rev()
            .map(|count| DiceCombination(vec![*first; count]))
            .collect(),
        _ => {
            let mut distinct: Vec<Die> = Vec::new();
            for die in faces {
                if !distinct.contains(die) {
                    distinct.push(*die);
                }
            }
            let mut combinations: Vec<DiceCombination> = distinct
                .into_iter()
                .map(|d| DiceCombination(vec![d]))
                .collect();
            combinations.push(DiceCombination(faces.to_vec()));
            combinations
        }
    }
}

/// The 21 unordered dice pairs, (1,1), (1,2) ... (6,6).
pub fn unordered_pairs() -> Vec<(Die, Die)> {
    (Die::MIN..=Die::MAX)
        .flat_map(|a| (a..=Die::MAX).map(move |b| (Die(a), Die(b))))
        .collect()
}

/// Where dice rolls come from.
#[derive(Debug, Clone)]
pub enum DiceSource {
    /// Uniform random rolls.
    Random(StdRng),
    /// Walks the unordered pairs in order, wrapping around.
    Sequential {
        /// Index of the next pair.
        next: usize,
    },
    /// Pre-set rolls, consumed front to back.
    Scripted(VecDeque<(Die, Die)>),
}

impl DiceSource {
    /// Random source, reproducible when a seed is given.
    pub fn random(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Random(StdRng::seed_from_u64(seed)),
            None => Self::Random(StdRng::from_os_rng()),
        }
    }

    /// Deterministic source cycling through every unordered pair.
    pub fn sequential() -> Self {
        Self::Sequential { next: 0 }
    }

    /// Source that replays the given rolls.
    pub fn scripted(rolls: impl IntoIterator<Item = (u8, u8)>) -> Result<Self, EngineError> {
        let rolls = rolls
            .into_iter()
            .map(|(a, b)| Ok((Die::new(a)?, Die::new(b)?)))
            .collect::<Result<VecDeque<_>, EngineError>>()?;
        Ok(Self::Scripted(rolls))
    }

    /// Draws the next pair of dice.
    pub fn roll_pair(&mut self) -> Result<(Die, Die), EngineError> {
        match self {
            Self::Random(rng) => Ok((
                Die(rng.random_range(Die::MIN..=Die::MAX)),
                Die(rng.random_range(Die::MIN..=Die::MAX)),
            )),
            Self::Sequential { next } => {
                let pairs = unordered_pairs();
                let pair = pairs[*next % pairs.len()];
                *next += 1;
                Ok(pair)
            }
            Self::Scripted(rolls) => rolls.pop_front().ok_or(EngineError::DiceExhausted),
        }
    }
}

/// The dice held for the current turn.
///
/// A fresh roll holds two dice, or four copies of the value on doubles.
/// Applied moves consume dice until none are left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSet {
    faces: Vec<Die>,
}

impl DiceSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding the given faces.
    pub fn from_faces(faces: &[u8]) -> Result<Self, EngineError> {
        let faces = faces
            .iter()
            .map(|v| Die::new(*v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { faces })
    }

    /// Replaces the held dice with a fresh roll from `source`.
    #[instrument(skip(self, source))]
    pub fn roll(&mut self, source: &mut DiceSource) -> Result<&[Die], EngineError> {
        let (first, second) = source.roll_pair()?;
        self.set_pair(first, second);
        debug!(faces = ?self.faces, double = self.is_double(), "Dice rolled");
        Ok(&self.faces)
    }

    /// Holds the given pair, quadrupled on doubles.
    pub fn set_pair(&mut self, first: Die, second: Die) {
        self.faces = if first == second {
            vec![first; 4]
        } else {
            vec![first, second]
        };
    }

    /// Drops all held dice.
    pub fn clear(&mut self) {
        self.faces.clear();
    }

    /// Held dice in roll order.
    pub fn faces(&self) -> &[Die] {
        &self.faces
    }

    /// Number of unconsumed dice.
    pub fn remaining_count(&self) -> usize {
        self.faces.len()
    }

    /// True once every die has been used.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// True when two or more dice are held and they all match.
    pub fn is_double(&self) -> bool {
        match self.faces.as_slice() {
            [first, rest @ ..] => !rest.is_empty() && rest.iter().all(|d| d == first),
            [] => false,
        }
    }

    /// Distinct ways the held dice can be spent this turn.
    pub fn distinct_usable_combinations(&self) -> Vec<DiceCombination> {
        usable_combinations(&self.faces)
    }

    /// Removes one held die per listed value.
    ///
    /// Either every listed die is removed or, on error, none are.
    #[instrument(skip(self), fields(held = ?self.faces))]
    pub fn consume(&mut self, dice: &[Die]) -> Result<(), EngineError> {
        let mut remaining = self.faces.clone();
        for die in dice {
            match remaining.iter().position(|held| held == die) {
                Some(index) => {
                    remaining.remove(index);
                }
                None => {
                    return Err(EngineError::InsufficientDice {
                        requested: dice.to_vec(),
                        held: self.faces.clone(),
                    });
                }
            }
        }
        self.faces = remaining;
        Ok(())
    }
}
