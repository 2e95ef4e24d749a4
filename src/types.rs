//! Common types used throughout Solidafy Flatfile
//!
//! This module contains shared type definitions and small enums
//! used across the reader, configuration and CLI.

use serde::{Deserialize, Serialize};

// ============================================================================
// Validation Mode
// ============================================================================

/// How a missing input source is treated when a reader is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// A missing source behaves like an empty one
    Lenient,
    /// A missing source fails `open()`
    #[default]
    Strict,
}

impl ValidationMode {
    /// Returns true for [`ValidationMode::Strict`]
    pub fn is_strict(self) -> bool {
        self == ValidationMode::Strict
    }
}

impl From<bool> for ValidationMode {
    fn from(strict: bool) -> Self {
        if strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_mode_default() {
        assert_eq!(ValidationMode::default(), ValidationMode::Strict);
        assert!(ValidationMode::default().is_strict());
    }

    #[test]
    fn test_validation_mode_from_bool() {
        assert_eq!(ValidationMode::from(true), ValidationMode::Strict);
        assert_eq!(ValidationMode::from(false), ValidationMode::Lenient);
    }

    #[test]
    fn test_validation_mode_serde() {
        let mode: ValidationMode = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(mode, ValidationMode::Lenient);

        let json = serde_json::to_string(&ValidationMode::Strict).unwrap();
        assert_eq!(json, "\"strict\"");
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(LogLevel::default()), tracing::Level::INFO);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }
}
