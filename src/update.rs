//! The catalog update pass: load, collect, merge, rank, save.
//!
//! One linear pass per invocation:
//!
//! 1. Load the persisted catalog (unreadable content counts as empty)
//! 2. Run every source in order, logging each source's report
//! 3. Merge fetched records by lower-cased name with shallow overlay
//! 4. Sort by composite score and assign dense ranks
//! 5. Save the full catalog
//!
//! Only a failed save aborts the pass.

use curator_sources::{collect_all, SourceReport, SourcesConfig, ToolRecord, ToolSource};

use crate::error::Result;
use crate::merge::{Catalog, MergeStats};
use crate::ranking::{rank_records, Scorer};
use crate::store::ToolStore;

/// What an update pass did.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSummary {
    /// Tools in the saved catalog.
    pub total: usize,
    /// Tools seen for the first time.
    pub inserted: usize,
    /// Fetched records merged onto an existing tool.
    pub updated: usize,
    /// One report per source, in run order.
    pub reports: Vec<SourceReport>,
}

impl UpdateSummary {
    /// Number of sources that failed this run.
    pub fn failed_sources(&self) -> usize {
        self.reports.iter().filter(|r| r.is_failure()).count()
    }
}

/// Merge `incoming` into `existing` and rank the result.
///
/// Pure core of the update pass; no I/O.
pub fn merge_and_rank(
    existing: Vec<ToolRecord>,
    incoming: Vec<ToolRecord>,
    scorer: &dyn Scorer,
) -> (Vec<ToolRecord>, MergeStats) {
    let mut catalog = Catalog::from_records(existing);
    let stats = catalog.merge_all(incoming);
    let mut records = catalog.into_records();
    rank_records(&mut records, scorer);
    (records, stats)
}

/// Run one full update pass against `store`.
///
/// # Errors
///
/// Returns an error only if the ranked catalog cannot be saved. Source
/// failures and unreadable stored content are logged and tolerated.
pub async fn run_update<St, So>(
    store: &St,
    sources: &[So],
    sources_config: &SourcesConfig,
    scorer: &dyn Scorer,
) -> Result<UpdateSummary>
where
    St: ToolStore + ?Sized,
    So: ToolSource,
{
    let existing = match store.load() {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(error = %err, "stored catalog unreadable, starting empty");
            Vec::new()
        }
    };
    tracing::debug!(count = existing.len(), "stored catalog loaded");

    let collected = collect_all(sources, sources_config).await;
    for report in &collected.reports {
        match report {
            SourceReport::Succeeded { source, count } => {
                tracing::info!(%source, count, "source fetched");
            }
            SourceReport::Failed { source, reason } => {
                tracing::warn!(%source, %reason, "source failed");
            }
        }
    }

    let (records, stats) = merge_and_rank(existing, collected.records, scorer);
    store.save(&records)?;

    let summary = UpdateSummary {
        total: records.len(),
        inserted: stats.inserted,
        updated: stats.updated,
        reports: collected.reports,
    };
    tracing::info!(
        total = summary.total,
        inserted = summary.inserted,
        updated = summary.updated,
        failed_sources = summary.failed_sources(),
        "catalog updated"
    );
    Ok(summary)
}
