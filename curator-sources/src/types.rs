//! Core types: the normalised tool record and source identification.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Largest magnitude at which every whole `f64` is exactly an `i64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single AI tool listing, normalised from any source.
///
/// Every field except `tool` is optional, and an absent field is kept
/// distinct from an empty one: when records are merged, only the fields
/// that are present on the incoming record overwrite the stored ones.
/// Keys the curator does not know about (for example fields added to the
/// catalog file by hand) are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    /// Display name. Compared case-insensitively when deduplicating.
    pub tool: String,
    /// Canonical link to the tool or its listing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-text category. Each source applies its own default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Ordered keywords, truncated to the source's limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Ranking signal. Treated as `0.0` when absent. Whole numbers are
    /// written back without a fractional part.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_score"
    )]
    pub score: Option<f64>,
    /// Provenance tag of the source that last contributed this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// When the contributing source fetched this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// 1-based catalog position. Assigned by the merge step only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    /// Any other keys found in the catalog file.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ToolRecord {
    /// Create a record with only the display name set.
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            ..Default::default()
        }
    }

    /// The deduplication key: the lower-cased display name.
    pub fn key(&self) -> String {
        self.tool.to_lowercase()
    }

    /// The stored score, or `0.0` when none was ever recorded.
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

fn serialize_score<S: Serializer>(score: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *score {
        Some(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_some(&(value as i64))
        }
        other => other.serialize(serializer),
    }
}

/// The sources the curator knows how to fetch, in no particular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// toolify.ai "best AI tools" listing page (HTML scrape).
    Toolify,
    /// futurepedia.io popular-tools JSON API.
    Futurepedia,
    /// Headless-browser crawl over a configured list of pages.
    Crawl,
}

impl SourceKind {
    /// Returns the provenance tag stamped on records from this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Toolify => "toolify",
            Self::Futurepedia => "futurepedia",
            Self::Crawl => "crawl",
        }
    }

}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current UTC time as an RFC 3339 string, used for `lastUpdated`.
pub fn fetch_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
