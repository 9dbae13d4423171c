//! Error.rs
//!
//! Errors only arise at the configuration boundary. Gameplay updates are
//! plain arithmetic and never fail.

use thiserror::Error;

/// GameError enum
///
/// Returned by config loading and validation. Callers log it and fall back
/// to the compiled defaults.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("setting '{name}' = {value} is invalid, expected {expected}")]
    InvalidSetting {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("theme table is empty; at least one theme is required")]
    EmptyThemeTable,
}

pub type GameResult<T> = Result<T, GameError>;
