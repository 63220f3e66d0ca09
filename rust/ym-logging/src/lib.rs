//! ym-logging: NDJSON session events.
//!
//! Append-only, one JSON object per line, so a crashed session still leaves every
//! complete line readable.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event schema version.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// Session id built from the start time and process id.
pub fn new_session_id() -> String {
    format!("{:x}-{:x}", now_ms(), std::process::id())
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub schema_version: u32,
    pub ruleset_id: &'static str,
}

impl VersionInfoV1 {
    pub fn new(ruleset_id: &'static str) -> Self {
        Self {
            schema_version: EVENT_SCHEMA_VERSION,
            ruleset_id,
        }
    }
}

/// One player action (`roll`, `hold`, `commit`, `reset`) and the state right after it.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub session_id: String,
    pub turn: u8,
    pub roll_count: u8,
    pub dice: [u8; 5],
    pub held: [bool; 5],

    /// False when a guard refused the action.
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub die: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    pub total: u32,
}

/// Final result of a completed game.
#[derive(Debug, Clone, Serialize)]
pub struct GameOverEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub session_id: String,
    pub player: String,
    pub slots: [Option<u32>; 13],
    pub upper_bonus: u32,
    pub yahtzee_bonus: u32,
    pub total: u32,
    /// 0-based leaderboard rank, if the score made the table.
    pub rank: Option<usize>,
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for NdjsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NdjsonError::Io(e) => write!(f, "event log io error: {}", e),
            NdjsonError::Json(e) => write!(f, "event log json error: {}", e),
        }
    }
}

impl std::error::Error for NdjsonError {}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use serde_json::Value;

    fn read_ndjson_lenient(path: &Path) -> Vec<Value> {
        let s = fs::read_to_string(path).expect("read");
        let mut out = Vec::new();
        for line in s.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(v) = serde_json::from_str::<Value>(line) {
                out.push(v);
            }
        }
        out
    }

    fn roll_event(applied: bool) -> SessionEventV1 {
        SessionEventV1 {
            event: "roll",
            ts_ms: now_ms(),
            v: VersionInfoV1::new("test_rules"),
            session_id: "s".to_string(),
            turn: 0,
            roll_count: 1,
            dice: [1, 1, 1, 4, 5],
            held: [false; 5],
            applied,
            die: None,
            category: None,
            score: None,
            total: 0,
        }
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append(&path).unwrap();

        w.write_event(&roll_event(true)).unwrap();
        let mut commit = roll_event(true);
        commit.event = "commit";
        commit.category = Some("three_of_a_kind");
        commit.score = Some(12);
        w.write_event(&commit).unwrap();
        w.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["event"], "roll");
        assert_eq!(vals[0]["v"]["ruleset_id"], "test_rules");
        assert!(vals[0].get("category").is_none());
        assert_eq!(vals[1]["category"], "three_of_a_kind");
        assert_eq!(vals[1]["score"], 12);
        assert_eq!(vals[1]["dice"][3], 4);
    }

    #[test]
    fn periodic_flush_makes_lines_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append_with_flush(&path, 1).unwrap();
        w.write_event(&roll_event(false)).unwrap();
        // No explicit flush.
        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["applied"], false);
    }

    #[test]
    fn lenient_reader_tolerates_trailing_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");

        {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            w.write_event(&roll_event(true)).unwrap();
            w.flush().unwrap();
        }

        // Simulate crash: append a partial JSON line (no newline, invalid JSON).
        let mut f = OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(br#"{"event":"roll","turn":"#).unwrap();
        f.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["roll_count"], 1);
    }

    #[test]
    fn game_over_event_serializes_slots() {
        let e = GameOverEventV1 {
            event: "game_over",
            ts_ms: 1,
            v: VersionInfoV1::new("r"),
            session_id: "s".to_string(),
            player: "ada".to_string(),
            slots: [Some(3); 13],
            upper_bonus: 0,
            yahtzee_bonus: 0,
            total: 39,
            rank: None,
        };
        let v: Value = serde_json::to_value(&e).unwrap();
        assert_eq!(v["slots"].as_array().unwrap().len(), 13);
        assert!(v["rank"].is_null());
    }
}
