//! # curator
//!
//! Aggregates third-party AI tool listings into one merged, ranked
//! catalog file.
//!
//! Source adapters live in the [`curator_sources`] crate. This crate owns
//! the catalog: loading it through a [`ToolStore`], folding fetched
//! records in by lower-cased tool name, ranking with a pluggable
//! [`Scorer`], and saving the result.

pub mod config;
pub mod error;
pub mod merge;
pub mod ranking;
pub mod store;
pub mod update;

pub use config::{CuratorConfig, ScoringConfig, ScoringStrategy, StoreConfig};
pub use error::{CuratorError, Result};
pub use merge::{overlay, Catalog, MergeOutcome, MergeStats};
pub use ranking::{rank_records, KeywordBonus, PlainScore, Scorer};
pub use store::{JsonFileStore, MemoryStore, ToolStore};
pub use update::{merge_and_rank, run_update, UpdateSummary};

pub use curator_sources::{SourceKind, SourceReport, ToolRecord};
