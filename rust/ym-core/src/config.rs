//! Configuration schema for Yahtzee Mini.
//!
//! Every field has a default, so an empty YAML document is a valid config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chance::ChanceMode;
use crate::leaderboard::DEFAULT_CAPACITY;
use crate::turn::HoldPolicy;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub chance: ChanceConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Rule variants that differ between game revisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub hold_policy: HoldPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceKind {
    #[default]
    Rng,
    Deterministic,
}

/// Dice source settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChanceConfig {
    #[serde(default)]
    pub mode: ChanceKind,
    /// Seed for the dice stream. `None` means OS randomness (rng mode only).
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ChanceConfig {
    pub fn build(&self) -> ChanceMode {
        match self.mode {
            ChanceKind::Rng => ChanceMode::rng(self.seed),
            ChanceKind::Deterministic => ChanceMode::deterministic(self.seed.unwrap_or(0)),
        }
    }
}

/// Local high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LeaderboardConfig {
    #[serde(default = "default_leaderboard_path")]
    pub path: PathBuf,
    #[serde(default = "default_leaderboard_capacity")]
    pub capacity: usize,
}

fn default_leaderboard_path() -> PathBuf {
    PathBuf::from("ym_top_scores.json")
}

fn default_leaderboard_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            path: default_leaderboard_path(),
            capacity: default_leaderboard_capacity(),
        }
    }
}

/// NDJSON event log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Append session events here. Disabled when `None`.
    #[serde(default)]
    pub events_path: Option<PathBuf>,
    /// Flush after this many lines; 0 flushes only on exit.
    #[serde(default)]
    pub flush_every_lines: u64,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document; treat it as all-defaults.
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leaderboard.capacity == 0 {
            return Err(ConfigError::Invalid(
                "leaderboard.capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
