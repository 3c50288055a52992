//! High score persistence
//!
//! The engine reads the stored high score once at construction and writes it
//! only when a game ends on a new best. Stores report failures; the engine
//! logs them and carries on.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::PersistError;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// A single high score slot
pub trait HighScoreStore {
    /// Stored high score; `Ok(0)` when nothing has been saved yet
    fn load(&self) -> Result<u64, PersistError>;
    fn save(&mut self, score: u64) -> Result<(), PersistError>;
}

/// In-memory slot; clones share the same value
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<Cell<Option<u64>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with a score
    pub fn with_score(score: u64) -> Self {
        Self {
            slot: Rc::new(Cell::new(Some(score))),
        }
    }

    /// Last saved value, if any
    pub fn stored(&self) -> Option<u64> {
        self.slot.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, PersistError> {
        Ok(self.slot.get().unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        self.slot.set(Some(score));
        Ok(())
    }
}
