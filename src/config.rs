//! Configuration types for the curator.
//!
//! Every section has defaults, so running without a config file performs
//! the standard update against `ai-tools.json` in the working directory.
//! A TOML file may override any subset of fields.

use std::path::{Path, PathBuf};

use curator_sources::SourcesConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CuratorError, Result};

/// Top-level curator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    /// Catalog file location.
    pub store: StoreConfig,
    /// Which sources run and how they are reached.
    pub sources: SourcesConfig,
    /// How merged records are ranked.
    pub scoring: ScoringConfig,
}

/// Catalog store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON catalog file.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ai-tools.json"),
        }
    }
}

/// Ranking strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Rank by `score` alone.
    Plain,
    /// Rank by `score` plus a bonus for matching category or keywords.
    #[default]
    KeywordBonus,
}

/// Ranking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Which scorer to use.
    pub strategy: ScoringStrategy,
    /// Case-insensitive substrings that earn the bonus.
    pub terms: Vec<String>,
    /// Amount added to `score` when any term matches.
    pub bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strategy: ScoringStrategy::KeywordBonus,
            terms: vec!["agents".to_owned(), "generative".to_owned()],
            bonus: 1.0,
        }
    }
}

impl CuratorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CuratorError::Config(e.to_string()))
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError::Config`] if the store path is empty, the
    /// bonus is negative or not finite, or the sources section is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.store.path.as_os_str().is_empty() {
            return Err(CuratorError::Config("store.path must not be empty".into()));
        }
        if !self.scoring.bonus.is_finite() || self.scoring.bonus < 0.0 {
            return Err(CuratorError::Config(
                "scoring.bonus must be a finite, non-negative number".into(),
            ));
        }
        self.sources.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_sources::SourceKind;

    #[test]
    fn default_config_is_valid() {
        let config = CuratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.path, PathBuf::from("ai-tools.json"));
        assert_eq!(config.scoring.strategy, ScoringStrategy::KeywordBonus);
        assert_eq!(config.scoring.terms, vec!["agents", "generative"]);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: CuratorConfig = toml::from_str(
            r#"
            [store]
            path = "/tmp/catalog.json"

            [sources]
            enabled = ["futurepedia"]

            [scoring]
            strategy = "plain"
            "#,
        )
        .expect("parse");
        assert_eq!(config.store.path, PathBuf::from("/tmp/catalog.json"));
        assert_eq!(config.sources.enabled, vec![SourceKind::Futurepedia]);
        assert_eq!(config.sources.timeout_seconds, 30);
        assert_eq!(config.scoring.strategy, ScoringStrategy::Plain);
        assert!((config.scoring.bonus - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_toml_is_default() {
        let config: CuratorConfig = toml::from_str("").expect("parse");
        assert_eq!(config, CuratorConfig::default());
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = CuratorConfig::from_file(Path::new("/nonexistent/path/curator.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").expect("write");

        let err = CuratorConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CuratorError::Config(_)));
    }

    #[test]
    fn from_file_reads_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("curator.toml");
        std::fs::write(&path, "[scoring]\nbonus = 2.5\n").expect("write");

        let config = CuratorConfig::from_file(&path).expect("load");
        assert!((config.scoring.bonus - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_bonus_rejected() {
        let mut config = CuratorConfig::default();
        config.scoring.bonus = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bonus"));
    }

    #[test]
    fn empty_store_path_rejected() {
        let mut config = CuratorConfig::default();
        config.store.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_sources_rejected() {
        let mut config = CuratorConfig::default();
        config.sources.enabled.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = CuratorConfig::default();
        let text = toml::to_string_pretty(&config).expect("serialize");
        let back: CuratorConfig = toml::from_str(&text).expect("parse");
        assert_eq!(back, config);
    }
}
