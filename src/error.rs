//! Error types for hwrng-stats

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hwrng-stats operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Entropy source unavailable ({}): {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Entropy source exhausted: needed {needed} bytes, only {available} available")]
    SourceExhausted { needed: usize, available: usize },

    #[error("Degenerate sample: {0}")]
    DegenerateSample(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for hwrng-stats operations
pub type Result<T> = std::result::Result<T, Error>;
