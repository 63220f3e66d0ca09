//! Top-score table behind an injected store.
//!
//! The session never touches the store. Shells call `record_score` at game over and treat
//! failures as best-effort.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("leaderboard io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value persistence for the top-score list.
pub trait ScoreStore {
    /// Entries ordered by descending score.
    fn load_top_scores(&self) -> Result<Vec<LeaderboardEntry>, StoreError>;
    fn save_top_scores(&self, entries: &[LeaderboardEntry]) -> Result<(), StoreError>;
}

/// Insert `entry` into `entries` keeping descending score order and at most `capacity` rows.
///
/// Equal scores keep the earlier entry first. Returns the 0-based rank, or `None` if the
/// entry did not make the cut.
pub fn insert_ranked(
    entries: &mut Vec<LeaderboardEntry>,
    entry: LeaderboardEntry,
    capacity: usize,
) -> Option<usize> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    let rank = entries
        .iter()
        .position(|e| e.score < entry.score)
        .unwrap_or(entries.len());
    if rank >= capacity {
        entries.truncate(capacity);
        return None;
    }
    entries.insert(rank, entry);
    entries.truncate(capacity);
    Some(rank)
}

/// Load, insert, and save. Returns the new entry's rank if it made the table.
///
/// A stored table longer than `capacity` is cut back and saved even when the entry misses.
pub fn record_score(
    store: &dyn ScoreStore,
    entry: LeaderboardEntry,
    capacity: usize,
) -> Result<Option<usize>, StoreError> {
    let mut entries = store.load_top_scores()?;
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    let overflow = entries.len() > capacity;
    let rank = if qualifies(&entries, entry.score, capacity) {
        insert_ranked(&mut entries, entry, capacity)
    } else {
        entries.truncate(capacity);
        None
    };
    if rank.is_some() || overflow {
        store.save_top_scores(&entries)?;
    }
    Ok(rank)
}

/// True if `score` would enter the first `capacity` rows of `entries` (descending order).
pub fn qualifies(entries: &[LeaderboardEntry], score: u32, capacity: usize) -> bool {
    entries.len() < capacity || entries.iter().take(capacity).any(|e| e.score < score)
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<LeaderboardEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load_top_scores(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.entries.borrow().clone())
    }

    fn save_top_scores(&self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }
}

/// JSON file store. A missing file is an empty table; writes go through a tmp file + rename.
///
/// Loads return at most `capacity` rows, whatever the file holds.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    capacity: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load_top_scores(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut entries: Vec<LeaderboardEntry> = serde_json::from_slice(&bytes)?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.capacity);
        Ok(entries)
    }

    fn save_top_scores(&self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(entries)?;
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
