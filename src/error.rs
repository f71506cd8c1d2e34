//! Error types for the curator.

use curator_sources::SourceError;

/// Top-level error type for a catalog update.
#[derive(Debug, thiserror::Error)]
pub enum CuratorError {
    /// The catalog store could not be read or written.
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Catalog (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A source failed outside the collector.
    #[error("source error: {0}")]
    Source(SourceError),
}

impl From<SourceError> for CuratorError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Config(msg) => Self::Config(msg),
            other => Self::Source(other),
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CuratorError>;
