//! Error types for the threes-td crate

use thiserror::Error;

/// Main error type for the threes-td crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position {position} is out of bounds (must be 0-15)")]
    PositionOutOfRange { position: usize },

    #[error("invalid value '{value}' for option '{key}': {reason}")]
    InvalidOption {
        key: String,
        value: String,
        reason: String,
    },

    #[error("option '{key}' requires a value")]
    MissingOptionValue { key: String },

    #[error("invalid tuple pattern count {count} (must be 1-{max})")]
    InvalidPatternCount { count: usize, max: usize },

    #[error("malformed weight file: {reason}")]
    MalformedWeights { reason: String },

    #[error("no weights stored at '{path}'")]
    MissingWeights { path: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
