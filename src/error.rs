//! Error types for configuration loading.
//!
//! Gameplay itself is infallible: a frame is a deterministic pass over
//! in-memory state. Only reading and validating [`crate::config::GameConfig`]
//! can fail.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// The configuration file could not be read.
    ConfigRead {
        path: PathBuf,
        source: io::Error,
    },

    /// The configuration text is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        /// `None` when parsing an in-memory string.
        path: Option<PathBuf>,
        message: String,
    },

    /// A configuration value is outside the range the game can run with.
    InvalidConfig {
        /// Dotted field name, e.g. `enemy.spawn_interval`.
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path.display(), source)
            }
            GameError::ConfigParse {
                path: Some(path),
                message,
            } => write!(f, "failed to parse config '{}': {}", path.display(), message),
            GameError::ConfigParse {
                path: None,
                message,
            } => write!(f, "failed to parse config: {}", message),
            GameError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "config value '{}' = {} is invalid: {}", field, value, reason),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
