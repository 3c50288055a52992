//! JSON file store for native builds
//!
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crash mid-write leaves the previous high score intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::HighScoreStore;
use crate::error::PersistError;

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

/// High score kept in a small JSON document
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
    fn load(&self) -> Result<u64, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord =
            serde_json::from_str(&json).map_err(|e| PersistError::Corrupt(e.to_string()))?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })
            .map_err(|e| PersistError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}
