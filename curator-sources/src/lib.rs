//! # curator-sources
//!
//! Source adapters for the AI tool catalog curator.
//!
//! Each adapter fetches one external listing (an HTML page, a JSON API,
//! or a headless-browser crawl) and normalises it into [`ToolRecord`]s.
//! Adapters know nothing about each other or about the catalog file.
//!
//! ## Design
//!
//! - One [`ToolSource`] implementation per site, dispatched by [`SourceKind`]
//! - Sources run sequentially in configured order
//! - Every request carries the same fixed User-Agent
//! - Failures are contained per source and reported, never raised past
//!   [`collect_all`]

pub mod collect;
pub mod config;
pub mod error;
pub mod http;
pub mod source;
pub mod sources;
pub mod types;

pub use collect::{collect_all, Collected, SourceReport};
pub use config::{CrawlConfig, FuturepediaConfig, SourcesConfig, ToolifyConfig, USER_AGENT};
pub use error::{Result, SourceError};
pub use source::ToolSource;
pub use types::{SourceKind, ToolRecord};

/// Run every source enabled in `config`, in order.
///
/// Convenience wrapper around [`collect_all`] using `config.enabled`.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = curator_sources::SourcesConfig::default();
/// let collected = curator_sources::collect(&config).await;
/// for report in &collected.reports {
///     println!("{report:?}");
/// }
/// # }
/// ```
pub async fn collect(config: &SourcesConfig) -> Collected {
    collect_all(&config.enabled, config).await
}
