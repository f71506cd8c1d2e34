//! futurepedia.io popular-tools JSON API.
//!
//! The endpoint answers `{"tools": [...]}`. A body without that array is a
//! parse failure; individual items that lack a name or URL, or have fields
//! of the wrong type, are skipped.

use serde::Deserialize;

use crate::config::{FuturepediaConfig, SourcesConfig};
use crate::error::SourceError;
use crate::http;
use crate::source::ToolSource;
use crate::types::{fetch_timestamp, SourceKind, ToolRecord};

/// futurepedia.io API client.
pub struct FuturepediaSource;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    tools: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ApiTool {
    name: Option<String>,
    url: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    rating: Option<f64>,
}

impl ToolSource for FuturepediaSource {
    async fn fetch(&self, config: &SourcesConfig) -> Result<Vec<ToolRecord>, SourceError> {
        tracing::trace!(url = %config.futurepedia.url, "futurepedia fetch");

        let client = http::build_client(config)?;
        let body = http::get_text(&client, &config.futurepedia.url, self.name()).await?;

        parse_futurepedia_json(&body, &config.futurepedia, &fetch_timestamp())
    }

    fn name(&self) -> &str {
        SourceKind::Futurepedia.name()
    }
}

/// Parse a futurepedia API response body into tool records.
pub(crate) fn parse_futurepedia_json(
    body: &str,
    config: &FuturepediaConfig,
    fetched_at: &str,
) -> Result<Vec<ToolRecord>, SourceError> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("futurepedia response: {e}")))?;

    let mut records = Vec::new();

    for (index, item) in response.tools.into_iter().enumerate() {
        let tool: ApiTool = match serde_json::from_value(item) {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(index, error = %e, "futurepedia item skipped");
                continue;
            }
        };

        let (Some(name), Some(url)) = (non_blank(tool.name), non_blank(tool.url)) else {
            tracing::debug!(index, "futurepedia item missing name or url");
            continue;
        };

        let mut keywords = tool.tags;
        keywords.truncate(config.max_keywords);

        records.push(ToolRecord {
            url: Some(url),
            description: Some(tool.description.unwrap_or_default()),
            category: Some(
                non_blank(tool.category).unwrap_or_else(|| config.default_category.clone()),
            ),
            keywords: (!keywords.is_empty()).then_some(keywords),
            score: tool.rating.filter(|r| r.is_finite()),
            source: Some(SourceKind::Futurepedia.name().to_owned()),
            last_updated: Some(fetched_at.to_owned()),
            ..ToolRecord::new(name)
        });

        if records.len() >= config.max_results {
            break;
        }
    }

    tracing::debug!(count = records.len(), "futurepedia tools parsed");
    Ok(records)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
