//! Record separator module
//!
//! Decides where one logical record ends when it may span several lines.
//!
//! # Overview
//!
//! The separator module provides:
//! - `RecordSeparatorPolicy` - The boundary contract
//! - `SingleLinePolicy` - One line per record (default)
//! - `QuoteContinuationPolicy` - Quoted newlines and `\` continuations
//! - `SuffixPolicy` - Records terminated by a suffix such as `;`
//! - `JsonObjectPolicy` - One JSON object per record
//! - `SeparatorConfig` - Declarative selection of a policy

mod policies;
mod types;

pub use policies::{JsonObjectPolicy, QuoteContinuationPolicy, SingleLinePolicy, SuffixPolicy};
pub use types::{RecordSeparatorPolicy, SeparatorConfig, SeparatorKind};

#[cfg(test)]
mod tests;
