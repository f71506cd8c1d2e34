//! Trait definition for pluggable tool sources.
//!
//! Each adapter (toolify, futurepedia, crawl) implements [`ToolSource`]
//! so the collector can run them uniformly, one after another.

use crate::config::SourcesConfig;
use crate::error::SourceError;
use crate::types::ToolRecord;

/// A source of AI tool listings.
///
/// Implementors fetch one external site or API and normalise what they
/// find into [`ToolRecord`]s. Each implementation handles its own:
///
/// - request construction
/// - response parsing and per-item skipping of malformed entries
/// - stamping `source` and `lastUpdated` on every record
///
/// Implementations return errors instead of empty lists so the caller
/// can tell "nothing listed" apart from "fetch failed". The collector
/// contains those errors; they never abort a run.
pub trait ToolSource: Send + Sync {
    /// Fetch and normalise this source's current listings.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails or the response does
    /// not have the expected overall shape.
    fn fetch(
        &self,
        config: &SourcesConfig,
    ) -> impl std::future::Future<Output = Result<Vec<ToolRecord>, SourceError>> + Send;

    /// Provenance tag for records and reports from this source.
    fn name(&self) -> &str;
}
