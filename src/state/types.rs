//! Checkpoint context types
//!
//! These types are serialized to JSON and persisted between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key suffix for the number of records a reader has consumed
pub const READ_COUNT: &str = "read.count";

/// Key suffix for an externally supplied upper bound on the read count
pub const READ_COUNT_MAX: &str = "read.count.max";

/// Checkpoint key holding the read count of reader `name`
pub fn read_count_key(name: &str) -> String {
    format!("{name}.{READ_COUNT}")
}

/// Checkpoint key holding the max-count override of reader `name`
pub fn max_count_key(name: &str) -> String {
    format!("{name}.{READ_COUNT_MAX}")
}

/// Key/value context that outlives individual reader instances
///
/// Scoped by the caller to one job execution. Readers prefix their keys
/// with their name so several readers can share one context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Counters by key
    #[serde(default)]
    entries: BTreeMap<String, u64>,

    /// When the context was last persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl ExecutionContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a counter
    pub fn get_count(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    /// Set a counter
    pub fn put_count(&mut self, key: impl Into<String>, value: u64) {
        self.entries.insert(key.into(), value);
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a counter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<u64> {
        self.entries.remove(key)
    }

    /// Remove every key owned by reader `name`, returning how many were removed
    pub fn remove_prefix(&mut self, name: &str) -> usize {
        let prefix = format!("{name}.");
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(&prefix));
        before - self.entries.len()
    }

    /// Iterate over all entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last persistence time
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Stamp the context with the current time
    pub(crate) fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
