//! Separator policy implementations
//!
//! None of these keep state between records, so they are safe to use across
//! restarts without any special handling.

use super::types::RecordSeparatorPolicy;

const QUOTE: char = '"';
const DEFAULT_CONTINUATION: &str = "\\";
const DEFAULT_SUFFIX: &str = ";";

// ============================================================================
// Single Line Policy
// ============================================================================

/// Every line is a complete record
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleLinePolicy;

impl RecordSeparatorPolicy for SingleLinePolicy {
    fn is_end_of_record(&mut self, _record: &str) -> bool {
        true
    }
}

// ============================================================================
// Quote / Continuation Policy
// ============================================================================

/// Joins lines while a double quote is left open or a line ends with a
/// continuation marker
///
/// Inside an open quote the newline is kept. A trailing continuation marker
/// is removed before the next line is appended.
#[derive(Debug, Clone)]
pub struct QuoteContinuationPolicy {
    continuation: String,
}

impl Default for QuoteContinuationPolicy {
    fn default() -> Self {
        Self {
            continuation: DEFAULT_CONTINUATION.to_string(),
        }
    }
}

impl QuoteContinuationPolicy {
    /// Create a policy using `\` as continuation marker
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy with a custom continuation marker
    pub fn with_continuation(marker: impl Into<String>) -> Self {
        Self {
            continuation: marker.into(),
        }
    }

    fn is_quote_unterminated(record: &str) -> bool {
        record.chars().filter(|c| *c == QUOTE).count() % 2 == 1
    }

    fn is_continued(&self, record: &str) -> bool {
        !self.continuation.is_empty() && record.trim().ends_with(self.continuation.as_str())
    }
}

impl RecordSeparatorPolicy for QuoteContinuationPolicy {
    fn is_end_of_record(&mut self, record: &str) -> bool {
        !Self::is_quote_unterminated(record) && !self.is_continued(record)
    }

    fn pre_process(&mut self, record: &str) -> String {
        if Self::is_quote_unterminated(record) {
            return format!("{record}\n");
        }
        if self.is_continued(record) {
            if let Some(idx) = record.rfind(self.continuation.as_str()) {
                return record[..idx].to_string();
            }
        }
        record.to_string()
    }
}

// ============================================================================
// Suffix Policy
// ============================================================================

/// A record ends at the first line ending with a suffix, which is stripped
#[derive(Debug, Clone)]
pub struct SuffixPolicy {
    suffix: String,
    ignore_whitespace: bool,
}

impl Default for SuffixPolicy {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            ignore_whitespace: true,
        }
    }
}

impl SuffixPolicy {
    /// Create a policy terminating records with `;`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy with a custom suffix
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ..Self::default()
        }
    }

    /// Whether surrounding whitespace is ignored (default true)
    #[must_use]
    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    fn normalize<'a>(&self, record: &'a str) -> &'a str {
        if self.ignore_whitespace {
            record.trim()
        } else {
            record
        }
    }
}

impl RecordSeparatorPolicy for SuffixPolicy {
    fn is_end_of_record(&mut self, record: &str) -> bool {
        self.normalize(record).ends_with(self.suffix.as_str())
    }

    fn post_process(&mut self, record: &str) -> String {
        let record = self.normalize(record);
        // A last record cut off by end of input has no suffix to strip
        record
            .strip_suffix(self.suffix.as_str())
            .unwrap_or(record)
            .to_string()
    }
}

// ============================================================================
// JSON Object Policy
// ============================================================================

/// A record ends once braces balance and the text ends with `}`
///
/// Braces inside string values are counted too.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObjectPolicy;

impl RecordSeparatorPolicy for JsonObjectPolicy {
    fn is_end_of_record(&mut self, record: &str) -> bool {
        let open = record.matches('{').count();
        let close = record.matches('}').count();
        open == close && record.trim_end().ends_with('}')
    }
}
