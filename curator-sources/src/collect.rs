//! Sequential source collection with per-source outcome reports.
//!
//! Sources run one after another in the configured order. A failing
//! source contributes no records and never stops the ones after it; its
//! error is returned to the caller as a [`SourceReport::Failed`].

use crate::config::SourcesConfig;
use crate::source::ToolSource;
use crate::types::ToolRecord;

/// Outcome of running one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceReport {
    /// The source answered; `count` records were kept.
    Succeeded {
        /// Source provenance tag.
        source: String,
        /// Number of records contributed.
        count: usize,
    },
    /// The source failed and contributed nothing.
    Failed {
        /// Source provenance tag.
        source: String,
        /// Human-readable failure reason.
        reason: String,
    },
}

impl SourceReport {
    /// Source provenance tag.
    pub fn source(&self) -> &str {
        match self {
            Self::Succeeded { source, .. } | Self::Failed { source, .. } => source,
        }
    }

    /// Returns `true` for [`SourceReport::Failed`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Records gathered from all sources, in arrival order, plus one report
/// per source in run order.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    /// Every record contributed, source by source.
    pub records: Vec<ToolRecord>,
    /// One report per source.
    pub reports: Vec<SourceReport>,
}

/// Run `sources` in order and gather their records.
///
/// Records with a blank `tool` name are dropped, since they cannot be
/// keyed.
pub async fn collect_all<S: ToolSource>(sources: &[S], config: &SourcesConfig) -> Collected {
    let mut collected = Collected::default();

    for source in sources {
        let name = source.name().to_owned();
        match source.fetch(config).await {
            Ok(records) => {
                let before = records.len();
                let kept: Vec<ToolRecord> = records
                    .into_iter()
                    .filter(|r| !r.tool.trim().is_empty())
                    .collect();
                if kept.len() < before {
                    tracing::debug!(source = %name, dropped = before - kept.len(), "unnamed records dropped");
                }
                collected.reports.push(SourceReport::Succeeded {
                    source: name,
                    count: kept.len(),
                });
                collected.records.extend(kept);
            }
            Err(err) => {
                collected.reports.push(SourceReport::Failed {
                    source: name,
                    reason: err.to_string(),
                });
            }
        }
    }

    collected
}
