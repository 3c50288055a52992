//! Error types
//!
//! Configuration errors are returned to the caller at construction.
//! Persistence errors are returned by stores but swallowed by the engine,
//! since a missing high score never stops a game.

use std::fmt;

/// Invalid engine construction input
#[derive(Debug)]
pub enum ConfigError {
    /// Playfield dimensions must be finite and positive
    InvalidPlayfield { width: f32, height: f32 },
    /// A tuning value is outside its usable range
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },
    /// A color string is not `#RRGGBB`
    InvalidColor(String),
    /// Tuning JSON could not be parsed
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPlayfield { width, height } => {
                write!(f, "invalid playfield size {}x{}", width, height)
            }
            ConfigError::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value '{}': {}", field, reason)
            }
            ConfigError::InvalidColor(s) => write!(f, "invalid color '{}', expected #RRGGBB", s),
            ConfigError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// High score storage failure
#[derive(Debug)]
pub enum PersistError {
    /// Backing storage does not exist in this environment
    Unavailable(&'static str),
    /// Reading or writing the backing file failed
    Io(std::io::Error),
    /// Stored value could not be decoded
    Corrupt(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Unavailable(what) => write!(f, "storage unavailable: {}", what),
            PersistError::Io(e) => write!(f, "storage i/o error: {}", e),
            PersistError::Corrupt(s) => write!(f, "stored high score is corrupt: {}", s),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}
