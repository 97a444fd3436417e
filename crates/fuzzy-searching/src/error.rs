//! Error types

use thiserror::Error;

/// Errors raised while configuring a search.
///
/// An empty pattern or a candidate that does not match are not errors: they
/// surface as `None` from single-string calls and as omissions from the
/// aggregate calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuseError {
    /// Threshold is NaN or outside `[0, 1]`
    #[error("threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Chunked dispatch needs at least one item per chunk
    #[error("chunk size must be at least 1")]
    InvalidChunkSize,

    /// Pattern does not fit in the engine's bitmask word
    #[error("pattern of {len} characters exceeds the {max}-character limit")]
    PatternTooLong { len: usize, max: usize },

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Worker pool could not be started
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}

impl From<serde_json::Error> for FuseError {
    fn from(err: serde_json::Error) -> Self {
        FuseError::Config(err.to_string())
    }
}

/// Result type for fallible search setup
pub type Result<T> = std::result::Result<T, FuseError>;
