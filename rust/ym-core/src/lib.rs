//! ym-core: Yahtzee Mini rules, scoring, turn state, sessions and configuration.

pub mod autoplay;
pub mod category;
pub mod chance;
pub mod config;
pub mod dice;
pub mod leaderboard;
pub mod scorecard;
pub mod scoring;
pub mod session;
pub mod turn;

#[cfg(test)]
mod chance_tests;
#[cfg(test)]
mod scoring_tests;

pub use category::{Category, ParseCategoryError, ALL, CAT_NAMES, NUM_CATS};
pub use chance::{ChanceMode, EventKey};
pub use config::{Config, ConfigError};
pub use dice::{DiceSet, Die, NUM_DICE};
pub use leaderboard::{
    record_score, JsonFileStore, LeaderboardEntry, MemoryStore, ScoreStore, StoreError,
};
pub use scorecard::Scorecard;
pub use scoring::{score, scores_for_dice};
pub use session::{GameSession, Phase, SessionSnapshot};
pub use turn::{suggest_best_category, suggest_holds, HoldPolicy, TurnController, MAX_ROLLS};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ruleset identifier stamped into event logs.
pub const RULESET_ID: &str = "yahtzee_mini_v1";
