//! Catalog merge: case-insensitive dedup with shallow field overlay.
//!
//! Records are keyed by lower-cased `tool` name. Merging a record whose
//! key already exists overwrites only the fields the incoming record
//! carries; everything else on the stored record is kept. New keys are
//! appended after the existing entries.

use std::collections::HashMap;

use curator_sources::ToolRecord;

/// What [`Catalog::merge`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The key was new; the record was appended.
    Inserted,
    /// The key existed; present fields were overlaid.
    Updated,
}

/// Counts from [`Catalog::merge_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Records whose key was new.
    pub inserted: usize,
    /// Records overlaid onto an existing entry.
    pub updated: usize,
}

/// Key-indexed, insertion-ordered collection of tool records.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ToolRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from previously persisted records.
    ///
    /// A later record with an already-seen key replaces the earlier one
    /// but keeps the earlier one's position.
    pub fn from_records(records: Vec<ToolRecord>) -> Self {
        let mut catalog = Self::default();
        for record in records {
            match catalog.index.get(&record.key()) {
                Some(&pos) => catalog.records[pos] = record,
                None => catalog.push(record),
            }
        }
        catalog
    }

    /// Fold one incoming record into the catalog.
    pub fn merge(&mut self, record: ToolRecord) -> MergeOutcome {
        match self.index.get(&record.key()) {
            Some(&pos) => {
                overlay(&mut self.records[pos], record);
                MergeOutcome::Updated
            }
            None => {
                self.push(record);
                MergeOutcome::Inserted
            }
        }
    }

    /// Fold every record in arrival order.
    pub fn merge_all(&mut self, records: impl IntoIterator<Item = ToolRecord>) -> MergeStats {
        let mut stats = MergeStats::default();
        for record in records {
            match self.merge(record) {
                MergeOutcome::Inserted => stats.inserted += 1,
                MergeOutcome::Updated => stats.updated += 1,
            }
        }
        stats
    }

    /// Look up a record by name, case-insensitively.
    pub fn get(&self, tool: &str) -> Option<&ToolRecord> {
        self.index
            .get(&tool.to_lowercase())
            .map(|&pos| &self.records[pos])
    }

    /// Number of distinct tools.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the catalog holds no tools.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[ToolRecord] {
        &self.records
    }

    /// Consume the catalog, yielding records in insertion order.
    pub fn into_records(self) -> Vec<ToolRecord> {
        self.records
    }

    fn push(&mut self, record: ToolRecord) {
        self.index.insert(record.key(), self.records.len());
        self.records.push(record);
    }
}

/// Overwrite every field of `existing` that is present on `incoming`.
///
/// `tool` is always present, so the display name takes the incoming
/// spelling. Unknown keys are overlaid one by one.
pub fn overlay(existing: &mut ToolRecord, incoming: ToolRecord) {
    let ToolRecord {
        tool,
        url,
        description,
        category,
        keywords,
        score,
        source,
        last_updated,
        rank,
        extra,
    } = incoming;

    existing.tool = tool;
    overlay_field(&mut existing.url, url);
    overlay_field(&mut existing.description, description);
    overlay_field(&mut existing.category, category);
    overlay_field(&mut existing.keywords, keywords);
    overlay_field(&mut existing.score, score);
    overlay_field(&mut existing.source, source);
    overlay_field(&mut existing.last_updated, last_updated);
    overlay_field(&mut existing.rank, rank);
    existing.extra.extend(extra);
}

fn overlay_field<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
