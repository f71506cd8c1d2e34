//! Composite scoring and dense re-ranking.
//!
//! A [`Scorer`] turns a record into its composite ranking key. Records
//! are stably sorted by that key, highest first, and numbered 1..N.
//!
//! # Scoring Formula
//!
//! ```text
//! key = score + (bonus if category or any keyword contains a term)
//! ```
//!
//! Term matching is a case-insensitive substring test. A missing
//! `score` counts as `0.0`; a non-finite key also counts as `0.0`.

use std::cmp::Ordering;

use curator_sources::ToolRecord;

use crate::config::{ScoringConfig, ScoringStrategy};

/// Computes the composite ranking key for a record.
pub trait Scorer: Send + Sync {
    /// Higher keys rank first.
    fn score(&self, record: &ToolRecord) -> f64;
}

/// Ranks by the record's own `score` only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainScore;

impl Scorer for PlainScore {
    fn score(&self, record: &ToolRecord) -> f64 {
        record.score_or_zero()
    }
}

/// Adds a fixed bonus when category or keywords mention a term.
#[derive(Debug, Clone)]
pub struct KeywordBonus {
    terms: Vec<String>,
    bonus: f64,
}

impl KeywordBonus {
    /// Create a scorer awarding `bonus` for any of `terms`.
    ///
    /// Blank terms are ignored.
    pub fn new<I, S>(terms: I, bonus: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms, bonus }
    }

    /// Returns `true` if the record's category or keywords mention a term.
    pub fn matches(&self, record: &ToolRecord) -> bool {
        let category = record.category.iter();
        let keywords = record.keywords.iter().flatten();
        category.chain(keywords).any(|text| {
            let text = text.to_lowercase();
            self.terms.iter().any(|term| text.contains(term.as_str()))
        })
    }
}

impl Scorer for KeywordBonus {
    fn score(&self, record: &ToolRecord) -> f64 {
        let base = record.score_or_zero();
        if self.matches(record) {
            base + self.bonus
        } else {
            base
        }
    }
}

impl ScoringConfig {
    /// Build the scorer this configuration describes.
    pub fn build_scorer(&self) -> Box<dyn Scorer> {
        match self.strategy {
            ScoringStrategy::Plain => Box::new(PlainScore),
            ScoringStrategy::KeywordBonus => Box::new(KeywordBonus::new(&self.terms, self.bonus)),
        }
    }
}

/// Sort `records` by composite key, highest first, and assign dense ranks.
///
/// The sort is stable: equal keys keep their current relative order.
/// Any previous `rank` is overwritten.
pub fn rank_records(records: &mut Vec<ToolRecord>, scorer: &dyn Scorer) {
    let mut keyed: Vec<(f64, ToolRecord)> = records
        .drain(..)
        .map(|record| (finite_or_zero(scorer.score(&record)), record))
        .collect();

    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    records.extend(keyed.into_iter().enumerate().map(|(position, (_, mut record))| {
        record.rank = Some(position as u32 + 1);
        record
    }));
}

fn finite_or_zero(key: f64) -> f64 {
    if key.is_finite() {
        key
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tool: &str, score: Option<f64>) -> ToolRecord {
        ToolRecord {
            score,
            ..ToolRecord::new(tool)
        }
    }

    fn names(records: &[ToolRecord]) -> Vec<&str> {
        records.iter().map(|r| r.tool.as_str()).collect()
    }

    fn ranks(records: &[ToolRecord]) -> Vec<u32> {
        records.iter().filter_map(|r| r.rank).collect()
    }

    #[test]
    fn higher_score_ranks_first() {
        let mut records = vec![record("Foo", Some(8.0)), record("Bar", Some(9.0))];
        rank_records(&mut records, &PlainScore);
        assert_eq!(names(&records), vec!["Bar", "Foo"]);
        assert_eq!(ranks(&records), vec![1, 2]);
    }

    #[test]
    fn ties_keep_original_order() {
        let mut records = vec![
            record("First", Some(1.0)),
            record("Top", Some(5.0)),
            record("Second", Some(1.0)),
            record("Third", Some(1.0)),
        ];
        rank_records(&mut records, &PlainScore);
        assert_eq!(names(&records), vec!["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn missing_score_sorts_as_zero() {
        let mut records = vec![
            record("None", None),
            record("Negative", Some(-1.0)),
            record("Positive", Some(0.5)),
        ];
        rank_records(&mut records, &PlainScore);
        assert_eq!(names(&records), vec!["Positive", "None", "Negative"]);
    }

    #[test]
    fn non_finite_score_sorts_as_zero() {
        let mut records = vec![
            record("Nan", Some(f64::NAN)),
            record("One", Some(1.0)),
            record("Inf", Some(f64::INFINITY)),
        ];
        rank_records(&mut records, &PlainScore);
        assert_eq!(names(&records), vec!["One", "Nan", "Inf"]);
    }

    #[test]
    fn ranks_are_dense_and_overwrite_previous() {
        let mut records: Vec<ToolRecord> = (0..5)
            .map(|i| ToolRecord {
                rank: Some(99),
                ..record(&format!("T{i}"), Some(i as f64))
            })
            .collect();
        rank_records(&mut records, &PlainScore);
        assert_eq!(ranks(&records), vec![1, 2, 3, 4, 5]);
        assert_eq!(records[0].tool, "T4");
    }

    #[test]
    fn ranking_twice_is_idempotent() {
        let mut records = vec![
            record("A", Some(2.0)),
            record("B", Some(2.0)),
            record("C", Some(3.0)),
            record("D", None),
        ];
        rank_records(&mut records, &PlainScore);
        let once = records.clone();
        rank_records(&mut records, &PlainScore);
        assert_eq!(records, once);
    }

    #[test]
    fn empty_input_stays_empty() {
        let mut records = Vec::new();
        rank_records(&mut records, &PlainScore);
        assert!(records.is_empty());
    }

    #[test]
    fn category_match_earns_bonus() {
        let scorer = KeywordBonus::new(["agents", "generative"], 1.0);
        let r = ToolRecord {
            category: Some("AI Agents".into()),
            ..record("A", Some(2.0))
        };
        assert!((scorer.score(&r) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        let scorer = KeywordBonus::new(["Generative"], 0.5);
        let r = ToolRecord {
            keywords: Some(vec!["images".into(), "GenerativeAI".into()]),
            ..record("A", None)
        };
        assert!(scorer.matches(&r));
        assert!((scorer.score(&r) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn bonus_applied_once_for_multiple_matches() {
        let scorer = KeywordBonus::new(["agents", "generative"], 1.0);
        let r = ToolRecord {
            category: Some("Generative".into()),
            keywords: Some(vec!["agents".into()]),
            ..record("A", Some(1.0))
        };
        assert!((scorer.score(&r) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn description_does_not_count() {
        let scorer = KeywordBonus::new(["agents"], 1.0);
        let r = ToolRecord {
            description: Some("Build agents fast".into()),
            ..record("A", Some(1.0))
        };
        assert!(!scorer.matches(&r));
    }

    #[test]
    fn blank_terms_ignored() {
        let scorer = KeywordBonus::new(["", "  "], 1.0);
        let r = ToolRecord {
            category: Some("anything".into()),
            ..record("A", Some(1.0))
        };
        assert!(!scorer.matches(&r));
    }

    #[test]
    fn bonus_can_reorder_records() {
        let scorer = KeywordBonus::new(["agents"], 1.0);
        let mut records = vec![
            record("Plain", Some(8.5)),
            ToolRecord {
                category: Some("Agents".into()),
                ..record("Agentic", Some(8.0))
            },
        ];
        rank_records(&mut records, &scorer);
        assert_eq!(names(&records), vec!["Agentic", "Plain"]);
    }

    #[test]
    fn config_builds_matching_scorer() {
        let agentic = ToolRecord {
            category: Some("AI Agents".into()),
            ..record("A", Some(1.0))
        };

        let plain = ScoringConfig {
            strategy: ScoringStrategy::Plain,
            ..Default::default()
        }
        .build_scorer();
        assert!((plain.score(&agentic) - 1.0).abs() < f64::EPSILON);

        let bonus = ScoringConfig::default().build_scorer();
        assert!((bonus.score(&agentic) - 2.0).abs() < f64::EPSILON);
    }
}
