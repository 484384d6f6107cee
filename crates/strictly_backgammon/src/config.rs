//! Engine configuration.

use crate::dice::DiceSource;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// How the engine rolls dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiceMode {
    /// Uniform random rolls.
    #[default]
    Random,
    /// Deterministic walk over the 21 unordered pairs.
    Sequential,
}

/// Configuration for a [`Game`](crate::Game).
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Dice mode.
    #[serde(default)]
    dice: DiceMode,

    /// Seed for random dice; OS entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Whether move postconditions are verified.
    #[serde(default = "default_check_invariants")]
    check_invariants: bool,
}

fn default_check_invariants() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dice: DiceMode::default(),
            seed: None,
            check_invariants: default_check_invariants(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration.
    pub fn new(dice: DiceMode, seed: Option<u64>, check_invariants: bool) -> Self {
        Self {
            dice,
            seed,
            check_invariants,
        }
    }

    /// Returns a copy with the given seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(dice = ?config.dice, seed = ?config.seed, "Config loaded successfully");
        Ok(config)
    }

    /// Builds the dice source this configuration describes.
    pub fn dice_source(&self) -> DiceSource {
        match self.dice {
            DiceMode::Random => DiceSource::random(self.seed),
            DiceMode::Sequential => DiceSource::sequential(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(*config.check_invariants());
    }

    #[test]
    fn test_parses_all_fields() {
        let config = EngineConfig::from_toml_str(
            "dice = \"sequential\"\nseed = 7\ncheck_invariants = false\n",
        )
        .unwrap();
        assert_eq!(*config.dice(), DiceMode::Sequential);
        assert_eq!(*config.seed(), Some(7));
        assert!(!*config.check_invariants());
    }

    #[test]
    fn test_bad_toml_reports_location() {
        let err = EngineConfig::from_toml_str("dice = \"loaded\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }
}
