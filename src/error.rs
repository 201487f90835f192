//! Error types for breathbox.

use thiserror::Error;

/// All errors produced by breathbox.
#[derive(Debug, Error)]
pub enum BreathError {
    /// A pattern that cannot be sequenced (every phase is zero).
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// A duration that is out of range (e.g. a zero-length session).
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// A named item does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// A named item already exists (names are compared case-insensitively).
    #[error("{0} already exists")]
    NameConflict(String),

    /// Configuration or settings problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `SQLite` failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization or parsing failure.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal setup or drawing failure.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Fuzzy picker failure.
    #[error("Picker error: {0}")]
    Picker(String),

    /// Filesystem I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BreathError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for BreathError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for BreathError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl BreathError {
    /// Whether the caller can recover by changing its input (e.g. prompting
    /// to overwrite on a name conflict).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidPattern(_)
                | Self::InvalidDuration(_)
                | Self::NotFound(_)
                | Self::NameConflict(_)
        )
    }
}
