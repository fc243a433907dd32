//! Error types for assembly statistics

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for asmstats operations
pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Debug, Error)]
pub enum StatsError {
    /// Input directory is missing or cannot be listed
    #[error("Input not found: {path}: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A FASTA file is empty, unparsable or has no usable sequence
    #[error("Invalid assembly {path}: {msg}")]
    Data { path: PathBuf, msg: String },

    /// Program-wide misconfiguration, reported before any processing
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StatsError {
    pub fn data(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        StatsError::Data {
            path: path.into(),
            msg: msg.into(),
        }
    }

    /// Whether this error aborts a whole batch rather than a single file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, StatsError::Data { .. })
    }
}
