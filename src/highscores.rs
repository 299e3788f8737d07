//! High score persistence
//!
//! A single best score, loaded once at startup and saved when a game ends
//! above it. Failures never reach the round controller: loading falls back
//! to zero and saving only logs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reading or writing a JSON file (high score or settings)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store is unavailable")]
    Unavailable,
}

/// Where the best score lives between runs
pub trait HighScoreStore {
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// On-disk format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// JSON file store. A missing file means no high score yet.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;
        // Write beside the target, then swap in
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store for tests and hosts without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stored: u32,
    saves: usize,
    failing: bool,
}

impl MemoryStore {
    pub fn new(stored: u32) -> Self {
        Self {
            stored,
            ..Self::default()
        }
    }

    /// Store whose every operation fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn stored(&self) -> u32 {
        self.stored
    }

    /// Successful saves so far
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        Ok(self.stored)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        self.stored = score;
        self.saves += 1;
        Ok(())
    }
}

/// Load the high score, falling back to zero on any error
pub fn load_high_score<S: HighScoreStore + ?Sized>(store: &S) -> u32 {
    match store.load() {
        Ok(score) => {
            log::info!("Loaded high score {}", score);
            score
        }
        Err(err) => {
            log::warn!("Could not load high score, starting from 0: {}", err);
            0
        }
    }
}

/// Save the high score; failures are logged and otherwise ignored
pub fn save_high_score<S: HighScoreStore + ?Sized>(store: &mut S, score: u32) {
    match store.save(score) {
        Ok(()) => log::info!("New high score {} saved", score),
        Err(err) => log::warn!("Could not save high score {}: {}", score, err),
    }
}
