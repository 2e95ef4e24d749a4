//! Mapper types and traits

use super::mappers::{JsonLineMapper, PatternSkipMapper};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of mapping one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapped<T> {
    /// A data item to hand to the caller
    Item(T),
    /// Not a data record (an embedded header, a trailer); read the next one
    Skip,
}

impl<T> Mapped<T> {
    /// Returns the item, if any
    pub fn into_item(self) -> Option<T> {
        match self {
            Mapped::Item(item) => Some(item),
            Mapped::Skip => None,
        }
    }

    /// Map the contained item
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mapped<U> {
        match self {
            Mapped::Item(item) => Mapped::Item(f(item)),
            Mapped::Skip => Mapped::Skip,
        }
    }
}

/// Trait for converting a record into an item
///
/// `line_number` is the raw line number of the last line of the record and is
/// meant for error messages. Errors are returned to the caller of `read()`
/// unchanged.
pub trait LineMapper<T>: Send + Sync {
    /// Map one record
    fn map_line(&self, record: &str, line_number: usize) -> Result<Mapped<T>>;
}

impl<T, F> LineMapper<T> for F
where
    F: Fn(&str, usize) -> Result<Mapped<T>> + Send + Sync,
{
    fn map_line(&self, record: &str, line_number: usize) -> Result<Mapped<T>> {
        self(record, line_number)
    }
}

/// Kind of mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapperKind {
    /// The record text as a JSON string (default)
    #[default]
    Passthrough,
    /// The record parsed as JSON
    Json,
}

/// Declarative mapper configuration, as found in job definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Mapper kind
    #[serde(rename = "type", default)]
    pub kind: MapperKind,
    /// Records matching this regex are skipped
    #[serde(default)]
    pub skip_pattern: Option<String>,
}

impl MapperConfig {
    /// Pass records through as strings
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Parse records as JSON
    pub fn json() -> Self {
        Self {
            kind: MapperKind::Json,
            ..Default::default()
        }
    }

    /// Skip records matching a pattern
    #[must_use]
    pub fn with_skip_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.skip_pattern = Some(pattern.into());
        self
    }

    /// Build a mapper producing JSON values
    pub fn build(&self) -> Result<Box<dyn LineMapper<Value>>> {
        let mapper: Box<dyn LineMapper<Value>> = match (self.kind, self.skip_pattern.as_deref()) {
            (MapperKind::Passthrough, None) => Box::new(string_value),
            (MapperKind::Passthrough, Some(pattern)) => {
                Box::new(PatternSkipMapper::new(pattern, string_value)?)
            }
            (MapperKind::Json, None) => Box::new(JsonLineMapper::new()),
            (MapperKind::Json, Some(pattern)) => {
                Box::new(PatternSkipMapper::new(pattern, JsonLineMapper::new())?)
            }
        };
        Ok(mapper)
    }
}

fn string_value(record: &str, _line_number: usize) -> Result<Mapped<Value>> {
    Ok(Mapped::Item(Value::String(record.to_string())))
}
