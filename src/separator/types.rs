//! Separator types and traits
//!
//! Defines the record boundary abstraction.

use super::policies::{JsonObjectPolicy, QuoteContinuationPolicy, SingleLinePolicy, SuffixPolicy};
use serde::{Deserialize, Serialize};

/// Decides whether the text accumulated so far forms a complete record
///
/// The accumulator calls [`is_end_of_record`](Self::is_end_of_record) with the
/// record built so far, joins the next line onto
/// [`pre_process`](Self::pre_process) of that record, and applies
/// [`post_process`](Self::post_process) once the record is complete.
///
/// Policies that keep their own state must rebuild it in
/// [`reset`](Self::reset). Readers call it on every open, so after a restart
/// boundaries only line up if they depend on line position from the start of
/// the input and nothing else.
pub trait RecordSeparatorPolicy: Send {
    /// Whether `record` is a complete record
    fn is_end_of_record(&mut self, record: &str) -> bool;

    /// Transform an incomplete record before the next line is appended
    fn pre_process(&mut self, record: &str) -> String {
        record.to_string()
    }

    /// Transform a complete record before it is handed to the mapper
    fn post_process(&mut self, record: &str) -> String {
        record.to_string()
    }

    /// Drop any internal state
    fn reset(&mut self) {}
}

impl<P: RecordSeparatorPolicy + ?Sized> RecordSeparatorPolicy for Box<P> {
    fn is_end_of_record(&mut self, record: &str) -> bool {
        (**self).is_end_of_record(record)
    }

    fn pre_process(&mut self, record: &str) -> String {
        (**self).pre_process(record)
    }

    fn post_process(&mut self, record: &str) -> String {
        (**self).post_process(record)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Kind of separator policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorKind {
    /// Every line is a record (default)
    #[default]
    Line,
    /// Quoted newlines and continuation markers join lines
    Quoted,
    /// Records end with a suffix
    Suffix,
    /// Records are JSON objects
    Json,
}

/// Declarative separator configuration, as found in job definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorConfig {
    /// Policy kind
    #[serde(rename = "type", default)]
    pub kind: SeparatorKind,
    /// Suffix for `suffix` (default `;`)
    #[serde(default)]
    pub suffix: Option<String>,
    /// Continuation marker for `quoted` (default `\`)
    #[serde(default)]
    pub continuation: Option<String>,
    /// Whether trailing whitespace is ignored when matching a suffix
    #[serde(default = "default_true")]
    pub ignore_whitespace: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            kind: SeparatorKind::Line,
            suffix: None,
            continuation: None,
            ignore_whitespace: true,
        }
    }
}

impl SeparatorConfig {
    /// One line per record
    pub fn line() -> Self {
        Self::default()
    }

    /// Quote-aware with continuation markers
    pub fn quoted() -> Self {
        Self {
            kind: SeparatorKind::Quoted,
            ..Self::line()
        }
    }

    /// Suffix-terminated records
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self {
            kind: SeparatorKind::Suffix,
            suffix: Some(suffix.into()),
            ..Self::line()
        }
    }

    /// JSON object records
    pub fn json() -> Self {
        Self {
            kind: SeparatorKind::Json,
            ..Self::line()
        }
    }

    /// Build the configured policy
    pub fn build(&self) -> Box<dyn RecordSeparatorPolicy> {
        match self.kind {
            SeparatorKind::Line => Box::new(SingleLinePolicy),
            SeparatorKind::Quoted => {
                let policy = match &self.continuation {
                    Some(marker) => QuoteContinuationPolicy::with_continuation(marker),
                    None => QuoteContinuationPolicy::new(),
                };
                Box::new(policy)
            }
            SeparatorKind::Suffix => {
                let policy = match &self.suffix {
                    Some(suffix) => SuffixPolicy::with_suffix(suffix),
                    None => SuffixPolicy::new(),
                };
                Box::new(policy.ignore_whitespace(self.ignore_whitespace))
            }
            SeparatorKind::Json => Box::new(JsonObjectPolicy),
        }
    }
}
