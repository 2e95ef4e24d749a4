//! Mapper implementations

use super::types::{LineMapper, Mapped};
use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;

// ============================================================================
// Pass-Through Mapper
// ============================================================================

/// Returns the record text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughLineMapper;

impl PassThroughLineMapper {
    /// Create a new pass-through mapper
    pub fn new() -> Self {
        Self
    }
}

impl LineMapper<String> for PassThroughLineMapper {
    fn map_line(&self, record: &str, _line_number: usize) -> Result<Mapped<String>> {
        Ok(Mapped::Item(record.to_string()))
    }
}

// ============================================================================
// JSON Mapper
// ============================================================================

/// Parses each record as a JSON value
#[derive(Debug, Clone, Copy)]
pub struct JsonLineMapper {
    skip_blank: bool,
}

impl Default for JsonLineMapper {
    fn default() -> Self {
        Self { skip_blank: true }
    }
}

impl JsonLineMapper {
    /// Create a JSON mapper. Blank records are skipped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat blank records as parse errors instead of skipping them
    #[must_use]
    pub fn strict_blank(mut self) -> Self {
        self.skip_blank = false;
        self
    }
}

impl LineMapper<Value> for JsonLineMapper {
    fn map_line(&self, record: &str, line_number: usize) -> Result<Mapped<Value>> {
        let trimmed = record.trim();
        if trimmed.is_empty() && self.skip_blank {
            return Ok(Mapped::Skip);
        }

        serde_json::from_str(trimmed)
            .map(Mapped::Item)
            .map_err(|e| Error::parse(line_number, record, format!("Failed to parse JSON: {e}")))
    }
}

// ============================================================================
// Pattern Skip Mapper
// ============================================================================

/// Skips records matching a regex and delegates the rest
pub struct PatternSkipMapper<M> {
    pattern: Regex,
    inner: M,
}

impl<M> PatternSkipMapper<M> {
    /// Create a mapper skipping records that match `pattern`
    pub fn new(pattern: &str, inner: M) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::invalid_value("skip_pattern", format!("{pattern}: {e}")))?;
        Ok(Self { pattern, inner })
    }

    /// The compiled skip pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl<T, M: LineMapper<T>> LineMapper<T> for PatternSkipMapper<M> {
    fn map_line(&self, record: &str, line_number: usize) -> Result<Mapped<T>> {
        if self.pattern.is_match(record) {
            tracing::trace!(line = line_number, "Skipping record matching pattern");
            return Ok(Mapped::Skip);
        }
        self.inner.map_line(record, line_number)
    }
}

impl<M> std::fmt::Debug for PatternSkipMapper<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternSkipMapper")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}
