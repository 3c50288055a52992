//! LocalStorage store for the browser build

use super::HighScoreStore;
use crate::error::PersistError;

/// High score kept as integer text under a LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "colorMatchRush_highScore";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable("localStorage"))
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<u64, PersistError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(text)) => text
                .trim()
                .parse()
                .map_err(|_| PersistError::Corrupt(text)),
            Ok(None) => Ok(0),
            Err(_) => Err(PersistError::Unavailable("localStorage read")),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &score.to_string())
            .map_err(|_| PersistError::Unavailable("localStorage write"))?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}
