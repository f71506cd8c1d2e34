//! Error types for the curator-sources crate.
//!
//! Every variant carries a human-readable message. These errors never
//! escape [`crate::collect::collect_all`]; they are turned into
//! [`crate::collect::SourceReport::Failed`] entries instead.

/// Errors that can occur while fetching or normalising a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// An HTTP request failed, timed out at the transport level, or
    /// returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// A browser wait exceeded its deadline.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The headless browser could not be launched or driven.
    #[error("browser error: {0}")]
    Browser(String),

    /// Invalid source configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for curator-sources results.
pub type Result<T> = std::result::Result<T, SourceError>;
