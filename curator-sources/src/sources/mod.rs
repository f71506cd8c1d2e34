//! Source adapter implementations.
//!
//! Each module provides a struct implementing [`crate::source::ToolSource`]
//! for one external site. [`SourceKind`] dispatches to them so configured
//! source lists can be run directly.

pub mod crawl;
pub mod futurepedia;
pub mod toolify;

pub use crawl::CrawlSource;
pub use futurepedia::FuturepediaSource;
pub use toolify::ToolifySource;

use crate::config::SourcesConfig;
use crate::error::SourceError;
use crate::source::ToolSource;
use crate::types::{SourceKind, ToolRecord};

impl ToolSource for SourceKind {
    async fn fetch(&self, config: &SourcesConfig) -> Result<Vec<ToolRecord>, SourceError> {
        match self {
            SourceKind::Toolify => ToolifySource.fetch(config).await,
            SourceKind::Futurepedia => FuturepediaSource.fetch(config).await,
            SourceKind::Crawl => CrawlSource.fetch(config).await,
        }
    }

    fn name(&self) -> &str {
        SourceKind::name(self)
    }
}
