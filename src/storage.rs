//! High-score persistence behind a narrow get/set seam.
//!
//! The simulation reads the stored score once at session construction and
//! writes at most once per game-over, so the store never sits on the hot
//! path. A JSON file store backs the demo host; the in-memory store suits
//! hosts that don't persist.

use std::fs;
use std::path::PathBuf;

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StorageError;

/// Persistence seam for the best score across sessions.
pub trait HighScoreStore: Send + Sync {
    /// Best score on record. Implementations with nothing stored yet return
    /// 0 rather than an error.
    fn get(&self) -> Result<u32, StorageError>;

    /// Replaces the record.
    fn set(&mut self, score: u32) -> Result<(), StorageError>;
}

/// The store handle a session owns.
#[derive(Resource)]
pub struct StorageResource(pub Box<dyn HighScoreStore>);

/// Volatile store for hosts that don't persist scores.
#[derive(Debug, Default)]
pub struct MemoryStore {
    score: u32,
}

impl MemoryStore {
    /// Store pre-seeded with a best score.
    pub fn with_score(score: u32) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> Result<u32, StorageError> {
        Ok(self.score)
    }

    fn set(&mut self, score: u32) -> Result<(), StorageError> {
        self.score = score;
        Ok(())
    }
}

/// On-disk store holding a single JSON document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct ScoreFile {
    high_score: u32,
}

impl JsonFileStore {
    /// Store backed by `path`. The file is created on first write; a
    /// missing file reads as 0.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn get(&self) -> Result<u32, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No high score file yet");
            return Ok(0);
        }

        let raw = fs::read_to_string(&self.path)?;
        let file: ScoreFile = serde_json::from_str(&raw)?;
        Ok(file.high_score)
    }

    fn set(&mut self, score: u32) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&ScoreFile { high_score: score })?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), score, "High score persisted");
        Ok(())
    }
}
