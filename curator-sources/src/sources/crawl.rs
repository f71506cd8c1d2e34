//! Headless-browser crawl over JavaScript-rendered listing pages.
//!
//! Pages are visited strictly in order with a polite pause between them.
//! Each page gets one long wait for the first card to render, then short
//! per-element reads; a card whose name cannot be read is skipped. The
//! browser driver needs the `browser` feature; without it the source
//! reports a config error and contributes nothing.

use std::future::Future;
use std::time::Duration;

use url::Url;

use crate::config::{CrawlConfig, SourcesConfig};
use crate::error::SourceError;
use crate::source::ToolSource;
use crate::types::{SourceKind, ToolRecord};

/// Browser-automation crawl source.
pub struct CrawlSource;

impl ToolSource for CrawlSource {
    #[cfg(feature = "browser")]
    async fn fetch(&self, config: &SourcesConfig) -> Result<Vec<ToolRecord>, SourceError> {
        tracing::trace!(pages = config.crawl.pages.len(), "crawl fetch");
        driver::crawl(&config.crawl, &config.user_agent).await
    }

    #[cfg(not(feature = "browser"))]
    async fn fetch(&self, _config: &SourcesConfig) -> Result<Vec<ToolRecord>, SourceError> {
        Err(SourceError::Config(
            "crawl source requires the `browser` feature".into(),
        ))
    }

    fn name(&self) -> &str {
        SourceKind::Crawl.name()
    }
}

/// Visit `pages` in order, pausing `delay` between successive pages.
///
/// Stops early once `max_results` records have been gathered. The first
/// page error aborts the crawl.
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
pub(crate) async fn visit_pages<F, Fut>(
    pages: &[String],
    delay: Duration,
    max_results: usize,
    mut visit: F,
) -> Result<Vec<ToolRecord>, SourceError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<ToolRecord>, SourceError>>,
{
    let mut records = Vec::new();

    for (index, page) in pages.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let found = visit(page.clone()).await?;
        tracing::debug!(page = %page, count = found.len(), "crawl page visited");
        records.extend(found);

        if records.len() >= max_results {
            records.truncate(max_results);
            break;
        }
    }

    Ok(records)
}

/// Normalise the raw strings read from one card.
///
/// Returns `None` when the card has no usable name. Relative links are
/// resolved against the page they were found on.
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
pub(crate) fn card_to_record(
    name: Option<String>,
    href: Option<String>,
    description: Option<String>,
    page_url: &str,
    config: &CrawlConfig,
    fetched_at: &str,
) -> Option<ToolRecord> {
    let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())?;

    let url = href
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .and_then(|h| match Url::parse(page_url).and_then(|base| base.join(&h)) {
            Ok(u) => Some(u.to_string()),
            Err(_) => Url::parse(&h).ok().map(|u| u.to_string()),
        });

    Some(ToolRecord {
        url,
        description: Some(description.map(|d| d.trim().to_string()).unwrap_or_default()),
        category: Some(config.default_category.clone()),
        source: Some(SourceKind::Crawl.name().to_owned()),
        last_updated: Some(fetched_at.to_owned()),
        ..ToolRecord::new(name)
    })
}

#[cfg(feature = "browser")]
mod driver {
    use std::time::Duration;

    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::element::Element;
    use chromiumoxide::page::Page;
    use futures::StreamExt;

    use super::{card_to_record, visit_pages};
    use crate::config::CrawlConfig;
    use crate::error::SourceError;
    use crate::types::{fetch_timestamp, ToolRecord};

    const POLL_INTERVAL: Duration = Duration::from_millis(250);

    pub(super) async fn crawl(
        config: &CrawlConfig,
        user_agent: &str,
    ) -> Result<Vec<ToolRecord>, SourceError> {
        let browser_config = BrowserConfig::builder()
            .arg(format!("--user-agent={user_agent}"))
            .build()
            .map_err(|e| SourceError::Browser(format!("invalid browser config: {e}")))?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| SourceError::Browser(format!("failed to launch browser: {e}")))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let browser_ref = &browser;
        let outcome = visit_pages(
            &config.pages,
            Duration::from_secs(config.page_delay_secs),
            config.max_results,
            move |page_url| crawl_page(browser_ref, config, page_url),
        )
        .await;

        if let Err(e) = browser.close().await {
            tracing::debug!(error = %e, "browser close failed");
        }
        let _ = browser.wait().await;
        let _ = handler_task.await;

        outcome
    }

    async fn crawl_page(
        browser: &Browser,
        config: &CrawlConfig,
        page_url: String,
    ) -> Result<Vec<ToolRecord>, SourceError> {
        let page = browser
            .new_page(page_url.as_str())
            .await
            .map_err(|e| SourceError::Browser(format!("failed to open {page_url}: {e}")))?;

        let outcome = read_cards(&page, config, &page_url).await;

        if let Err(e) = page.close().await {
            tracing::debug!(page = %page_url, error = %e, "page close failed");
        }
        outcome
    }

    async fn read_cards(
        page: &Page,
        config: &CrawlConfig,
        page_url: &str,
    ) -> Result<Vec<ToolRecord>, SourceError> {
        let initial_wait = Duration::from_secs(config.initial_wait_secs);
        let cards = tokio::time::timeout(initial_wait, wait_for_cards(page, &config.card_selector))
            .await
            .map_err(|_| {
                SourceError::Timeout(format!(
                    "no {} on {page_url} after {}s",
                    config.card_selector, config.initial_wait_secs
                ))
            })?;

        let element_wait = Duration::from_secs(config.element_wait_secs);
        let fetched_at = fetch_timestamp();
        let mut records = Vec::new();

        for card in &cards {
            let name = read_text(card, &config.name_selector, element_wait).await;
            let href = read_href(card, &config.link_selector, element_wait).await;
            let description = read_text(card, &config.description_selector, element_wait).await;

            match card_to_record(name, href, description, page_url, config, &fetched_at) {
                Some(record) => records.push(record),
                None => tracing::debug!(page = %page_url, "crawl card without a name skipped"),
            }
        }

        Ok(records)
    }

    async fn wait_for_cards(page: &Page, selector: &str) -> Vec<Element> {
        loop {
            match page.find_elements(selector).await {
                Ok(found) if !found.is_empty() => return found,
                _ => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }
    }

    async fn read_text(card: &Element, selector: &str, wait: Duration) -> Option<String> {
        let read = async {
            let el = card.find_element(selector).await.ok()?;
            el.inner_text().await.ok().flatten()
        };
        tokio::time::timeout(wait, read).await.ok().flatten()
    }

    async fn read_href(card: &Element, selector: &str, wait: Duration) -> Option<String> {
        let read = async {
            let el = card.find_element(selector).await.ok()?;
            el.attribute("href").await.ok().flatten()
        };
        tokio::time::timeout(wait, read).await.ok().flatten()
    }
}
