//! Catalog persistence behind the [`ToolStore`] abstraction.
//!
//! The production store is a single pretty-printed JSON array on disk.
//! Writes overwrite the file in place; there is no locking, so only one
//! curator process may run against a given file at a time.
//!
//! Loading is lenient per record. A field whose value has the wrong type
//! is dropped from its record, and an element that has no string `tool`
//! cannot be keyed and is dropped. Everything else in the file survives.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use curator_sources::ToolRecord;
use serde_json::{Map, Value};

use crate::error::{CuratorError, Result};

/// Load/save access to the persisted catalog.
pub trait ToolStore {
    /// Read the persisted catalog.
    ///
    /// A store that has never been written returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if existing content cannot be read or parsed.
    fn load(&self) -> Result<Vec<ToolRecord>>;

    /// Replace the persisted catalog with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written.
    fn save(&self, records: &[ToolRecord]) -> Result<()>;
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The catalog file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ToolStore for JsonFileStore {
    fn load(&self) -> Result<Vec<ToolRecord>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CuratorError::Store(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )))
            }
        };

        let elements: Vec<Value> = serde_json::from_slice(&bytes).map_err(|e| {
            CuratorError::Store(format!("cannot parse {}: {e}", self.path.display()))
        })?;

        Ok(elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| decode_record(index, element))
            .collect())
    }

    fn save(&self, records: &[ToolRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json).map_err(|e| {
            CuratorError::Store(format!("cannot write {}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "catalog saved");
        Ok(())
    }
}

/// Decode one catalog element, dropping fields that do not fit.
fn decode_record(index: usize, element: Value) -> Option<ToolRecord> {
    let Value::Object(mut fields) = element else {
        tracing::warn!(index, "catalog entry is not an object, dropped");
        return None;
    };

    let Some(tool) = fields.get("tool").and_then(Value::as_str).map(str::to_owned) else {
        tracing::warn!(index, "catalog entry has no tool name, dropped");
        return None;
    };

    match serde_json::from_value(Value::Object(fields.clone())) {
        Ok(record) => return Some(record),
        Err(e) => tracing::warn!(index, %tool, error = %e, "catalog entry has invalid fields"),
    }

    fields.retain(|key, value| {
        if key == "tool" || field_fits(&tool, key, value) {
            return true;
        }
        tracing::warn!(index, %tool, field = %key, "invalid catalog field dropped");
        false
    });

    match serde_json::from_value(Value::Object(fields)) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(index, %tool, error = %e, "catalog entry dropped");
            None
        }
    }
}

/// Whether `key: value` decodes on a record that carries only a name.
fn field_fits(tool: &str, key: &str, value: &Value) -> bool {
    let mut single = Map::new();
    single.insert("tool".to_owned(), Value::String(tool.to_owned()));
    single.insert(key.to_owned(), value.clone());
    serde_json::from_value::<ToolRecord>(Value::Object(single)).is_ok()
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ToolRecord>>,
}

impl MemoryStore {
    /// Create a store pre-loaded with `records`.
    pub fn with_records(records: Vec<ToolRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Snapshot of the current contents.
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError::Store`] if the lock was poisoned.
    pub fn records(&self) -> Result<Vec<ToolRecord>> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| CuratorError::Store(format!("memory store poisoned: {e}")))
    }
}

impl ToolStore for MemoryStore {
    fn load(&self) -> Result<Vec<ToolRecord>> {
        self.records()
    }

    fn save(&self, records: &[ToolRecord]) -> Result<()> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| CuratorError::Store(format!("memory store poisoned: {e}")))?;
        *guard = records.to_vec();
        Ok(())
    }
}
