//! Reader configuration

use crate::error::{Error, Result};
use crate::types::ValidationMode;
use serde::{Deserialize, Serialize};

/// Settings fixed for one open/close cycle of a reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Stable identifier used as checkpoint key prefix
    pub name: String,

    /// Header lines discarded on every open
    #[serde(default)]
    pub lines_to_skip: usize,

    /// Records to skip on open when the context holds no count
    #[serde(default)]
    pub current_item_count: usize,

    /// Upper bound on the read count
    #[serde(default = "default_max_item_count")]
    pub max_item_count: usize,

    /// Treatment of a missing source at open
    #[serde(default)]
    pub mode: ValidationMode,

    /// Whether the read count is read from and written to the context
    #[serde(default = "default_save_state")]
    pub save_state: bool,

    /// Lines starting with one of these prefixes are ignored
    #[serde(default)]
    pub comment_prefixes: Vec<String>,
}

fn default_max_item_count() -> usize {
    usize::MAX
}

fn default_save_state() -> bool {
    true
}

impl ReaderConfig {
    /// Create a config with defaults for the given reader name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines_to_skip: 0,
            current_item_count: 0,
            max_item_count: default_max_item_count(),
            mode: ValidationMode::default(),
            save_state: default_save_state(),
            comment_prefixes: Vec::new(),
        }
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.save_state && self.name.trim().is_empty() {
            return Err(Error::invalid_value(
                "name",
                "a reader name is required when save_state is enabled",
            ));
        }
        if self.comment_prefixes.iter().any(String::is_empty) {
            return Err(Error::invalid_value(
                "comment_prefixes",
                "comment prefixes cannot be empty",
            ));
        }
        Ok(())
    }
}
