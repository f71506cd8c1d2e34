//! toolify.ai "best AI tools" listing page.
//!
//! Scrapes the server-rendered listing with CSS selectors. Cards that are
//! missing a name or link are skipped; the rest are kept in page order.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::{SourcesConfig, ToolifyConfig};
use crate::error::SourceError;
use crate::http;
use crate::source::ToolSource;
use crate::types::{fetch_timestamp, SourceKind, ToolRecord};

/// toolify.ai listing scraper.
pub struct ToolifySource;

impl ToolSource for ToolifySource {
    async fn fetch(&self, config: &SourcesConfig) -> Result<Vec<ToolRecord>, SourceError> {
        tracing::trace!(url = %config.toolify.url, "toolify fetch");

        let client = http::build_client(config)?;
        let html = http::get_text(&client, &config.toolify.url, self.name()).await?;

        parse_toolify_html(&html, &config.toolify, &fetch_timestamp())
    }

    fn name(&self) -> &str {
        SourceKind::Toolify.name()
    }
}

/// Parse a toolify listing page into tool records.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_toolify_html(
    html: &str,
    config: &ToolifyConfig,
    fetched_at: &str,
) -> Result<Vec<ToolRecord>, SourceError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| SourceError::Config(format!("invalid toolify base_url: {e}")))?;
    let document = Html::parse_document(html);

    let card_sel = selector(".tool-card")?;
    let name_sel = selector(".tool-name")?;
    let link_sel = selector("a")?;
    let desc_sel = selector(".tool-desc")?;
    let category_sel = selector(".tool-category")?;

    let mut records = Vec::new();

    for card in document.select(&card_sel) {
        let Some(name) = first_text(card, &name_sel) else {
            continue;
        };

        let href = match card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            Some(h) if !h.trim().is_empty() => h.trim(),
            _ => continue,
        };

        let url = match base.join(href) {
            Ok(u) => u.to_string(),
            Err(e) => {
                tracing::debug!(href, error = %e, "toolify card link unusable");
                continue;
            }
        };

        let description = first_text(card, &desc_sel).unwrap_or_default();
        let category = first_text(card, &category_sel)
            .map(|label| {
                config
                    .category_map
                    .get(&label)
                    .cloned()
                    .unwrap_or(label)
            })
            .unwrap_or_else(|| config.default_category.clone());

        records.push(ToolRecord {
            url: Some(url),
            description: Some(description),
            category: Some(category),
            source: Some(SourceKind::Toolify.name().to_owned()),
            last_updated: Some(fetched_at.to_owned()),
            ..ToolRecord::new(name)
        });

        if records.len() >= config.max_results {
            break;
        }
    }

    tracing::debug!(count = records.len(), "toolify cards parsed");
    Ok(records)
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("invalid selector {css}: {e:?}")))
}

/// Trimmed text of the first match, or `None` if missing or blank.
fn first_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope
        .select(sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2025-06-01T00:00:00Z";

    const MOCK_TOOLIFY_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="tool-list">
  <div class="tool-card">
    <a href="/tool/chatgpt"><span class="tool-name"> ChatGPT </span></a>
    <p class="tool-desc">Conversational assistant.</p>
    <span class="tool-category">LLM Platform</span>
  </div>
  <div class="tool-card">
    <a href="https://midjourney.com/"><span class="tool-name">Midjourney</span></a>
    <p class="tool-desc">Image generation from prompts.</p>
    <span class="tool-category">Generative Art</span>
  </div>
  <div class="tool-card">
    <a href="/tool/no-name"></a>
    <p class="tool-desc">Card without a name.</p>
  </div>
  <div class="tool-card">
    <span class="tool-name">No Link</span>
  </div>
  <div class="tool-card">
    <a href="/tool/bare"><span class="tool-name">Bare</span></a>
  </div>
</div>
</body>
</html>"#;

    #[test]
    fn parse_mock_html_returns_complete_cards() {
        let records =
            parse_toolify_html(MOCK_TOOLIFY_HTML, &ToolifyConfig::default(), TS).expect("parse");
        let names: Vec<&str> = records.iter().map(|r| r.tool.as_str()).collect();
        assert_eq!(names, vec!["ChatGPT", "Midjourney", "Bare"]);
    }

    #[test]
    fn relative_links_joined_onto_origin() {
        let records =
            parse_toolify_html(MOCK_TOOLIFY_HTML, &ToolifyConfig::default(), TS).expect("parse");
        assert_eq!(
            records[0].url.as_deref(),
            Some("https://www.toolify.ai/tool/chatgpt")
        );
        assert_eq!(records[1].url.as_deref(), Some("https://midjourney.com/"));
    }

    #[test]
    fn category_mapped_or_defaulted() {
        let records =
            parse_toolify_html(MOCK_TOOLIFY_HTML, &ToolifyConfig::default(), TS).expect("parse");
        assert_eq!(records[0].category.as_deref(), Some("Chatbot"));
        assert_eq!(records[1].category.as_deref(), Some("Generative Art"));
        assert_eq!(records[2].category.as_deref(), Some("AI Tool"));
    }

    #[test]
    fn missing_description_is_empty_not_absent() {
        let records =
            parse_toolify_html(MOCK_TOOLIFY_HTML, &ToolifyConfig::default(), TS).expect("parse");
        assert_eq!(records[2].description.as_deref(), Some(""));
    }

    #[test]
    fn records_stamped_with_source_and_time() {
        let records =
            parse_toolify_html(MOCK_TOOLIFY_HTML, &ToolifyConfig::default(), TS).expect("parse");
        for r in &records {
            assert_eq!(r.source.as_deref(), Some("toolify"));
            assert_eq!(r.last_updated.as_deref(), Some(TS));
            assert!(r.rank.is_none());
            assert!(r.score.is_none());
        }
    }

    #[test]
    fn parse_respects_max_results() {
        let config = ToolifyConfig {
            max_results: 2,
            ..Default::default()
        };
        let records = parse_toolify_html(MOCK_TOOLIFY_HTML, &config, TS).expect("parse");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let records = parse_toolify_html("<html><body></body></html>", &ToolifyConfig::default(), TS)
            .expect("parse");
        assert!(records.is_empty());
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let config = ToolifyConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        let err = parse_toolify_html(MOCK_TOOLIFY_HTML, &config, TS).unwrap_err();
        assert!(matches!(err, SourceError::Config(_)));
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ToolifySource>();
    }

    #[tokio::test]
    #[ignore] // Live network test, run with `cargo test -- --ignored`
    async fn live_toolify_fetch() {
        let records = ToolifySource
            .fetch(&SourcesConfig::default())
            .await
            .expect("live fetch should work");
        for r in &records {
            assert!(!r.tool.is_empty());
        }
    }
}
