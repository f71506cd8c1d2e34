//! Source configuration with sensible defaults.
//!
//! [`SourcesConfig`] controls which sources run, in what order, and how
//! each one reaches its site. The defaults reproduce the built-in source
//! set and are tuned for polite, low-volume fetching.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::types::SourceKind;

/// Fixed identifying User-Agent sent on every outbound request.
pub const USER_AGENT: &str = "AI-Tools-Curator/1.0 (+https://github.com/ai-tools-curator)";

/// Configuration shared by all sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Sources to run, in this order.
    pub enabled: Vec<SourceKind>,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent header for HTTP requests and the browser session.
    pub user_agent: String,
    /// toolify.ai listing scrape.
    pub toolify: ToolifyConfig,
    /// futurepedia.io JSON API.
    pub futurepedia: FuturepediaConfig,
    /// Headless-browser crawl.
    pub crawl: CrawlConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        let mut enabled = vec![SourceKind::Toolify, SourceKind::Futurepedia];
        if cfg!(feature = "browser") {
            enabled.push(SourceKind::Crawl);
        }
        Self {
            enabled,
            timeout_seconds: 30,
            user_agent: USER_AGENT.to_owned(),
            toolify: ToolifyConfig::default(),
            futurepedia: FuturepediaConfig::default(),
            crawl: CrawlConfig::default(),
        }
    }
}

/// Settings for the toolify.ai listing scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolifyConfig {
    /// Listing page to scrape.
    pub url: String,
    /// Origin that relative tool links are resolved against.
    pub base_url: String,
    /// Maximum number of cards kept, in page order.
    pub max_results: usize,
    /// Category used when a card has none.
    pub default_category: String,
    /// Renames applied to the site's own category labels.
    pub category_map: BTreeMap<String, String>,
}

impl Default for ToolifyConfig {
    fn default() -> Self {
        Self {
            url: "https://www.toolify.ai/best-ai-tools".to_owned(),
            base_url: "https://www.toolify.ai".to_owned(),
            max_results: 30,
            default_category: "AI Tool".to_owned(),
            category_map: BTreeMap::from([("LLM Platform".to_owned(), "Chatbot".to_owned())]),
        }
    }
}

/// Settings for the futurepedia.io JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuturepediaConfig {
    /// API endpoint returning `{"tools": [...]}`.
    pub url: String,
    /// Maximum number of tools kept, in response order.
    pub max_results: usize,
    /// Maximum number of tags kept as keywords per tool.
    pub max_keywords: usize,
    /// Category used when an item has none.
    pub default_category: String,
}

impl Default for FuturepediaConfig {
    fn default() -> Self {
        Self {
            url: "https://www.futurepedia.io/api/tools?limit=50&sort=popular".to_owned(),
            max_results: 30,
            max_keywords: 5,
            default_category: "AI Tool".to_owned(),
        }
    }
}

/// Settings for the headless-browser crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Pages visited in order.
    pub pages: Vec<String>,
    /// Selector matching one tool card.
    pub card_selector: String,
    /// Selector for the tool name, inside a card.
    pub name_selector: String,
    /// Selector for the tool link, inside a card.
    pub link_selector: String,
    /// Selector for the description, inside a card.
    pub description_selector: String,
    /// How long to wait for the first card to appear on a page.
    pub initial_wait_secs: u64,
    /// How long to wait for each per-card element read.
    pub element_wait_secs: u64,
    /// Pause between successive pages.
    pub page_delay_secs: u64,
    /// Maximum number of cards kept across all pages.
    pub max_results: usize,
    /// Category stamped on crawled tools.
    pub default_category: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            pages: vec![
                "https://theresanaiforthat.com/trending/".to_owned(),
                "https://theresanaiforthat.com/new/".to_owned(),
            ],
            card_selector: ".tool-item".to_owned(),
            name_selector: ".tool-item-name".to_owned(),
            link_selector: "a.tool-item-link".to_owned(),
            description_selector: ".tool-item-desc".to_owned(),
            initial_wait_secs: 30,
            element_wait_secs: 5,
            page_delay_secs: 5,
            max_results: 50,
            default_category: "AI Agents".to_owned(),
        }
    }
}

impl SourcesConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `enabled` must not be empty
    /// - `timeout_seconds` must be greater than 0
    /// - `user_agent` must not be blank
    /// - per-source `max_results` must be greater than 0
    /// - crawl waits must be greater than 0
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.enabled.is_empty() {
            return Err(SourceError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SourceError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SourceError::Config("user_agent must not be empty".into()));
        }
        if self.toolify.max_results == 0 {
            return Err(SourceError::Config(
                "toolify.max_results must be greater than 0".into(),
            ));
        }
        if self.futurepedia.max_results == 0 {
            return Err(SourceError::Config(
                "futurepedia.max_results must be greater than 0".into(),
            ));
        }
        if self.crawl.max_results == 0 {
            return Err(SourceError::Config(
                "crawl.max_results must be greater than 0".into(),
            ));
        }
        if self.crawl.initial_wait_secs == 0 || self.crawl.element_wait_secs == 0 {
            return Err(SourceError::Config(
                "crawl wait timeouts must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
