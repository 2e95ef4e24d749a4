// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Solidafy Flatfile
//!
//! A restartable, line-oriented record reader.
//! Read records from flat files, stop anywhere, resume exactly where you left off.
//!
//! ## Features
//!
//! - **Multi-line Records**: Pluggable separator policies (quotes, suffixes, JSON objects)
//! - **Checkpointing**: Read counts published into a shared context and saved as JSON
//! - **Restart**: Header skipping, fast-forward, and bounded reading windows
//! - **Late Binding**: Lenient or strict handling of sources that do not exist yet
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_flatfile::{ExecutionContext, FileSource, FlatFileReader, PassThroughLineMapper};
//!
//! fn main() -> solidafy_flatfile::Result<()> {
//!     let mut reader = FlatFileReader::new("orders", PassThroughLineMapper)
//!         .with_source(FileSource::new("orders.txt"))
//!         .with_lines_to_skip(1);
//!
//!     let mut context = ExecutionContext::new();
//!     reader.open(&context)?;
//!     while let Some(line) = reader.read()? {
//!         println!("{line}");
//!         reader.update(&mut context)?;
//!     }
//!     reader.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FlatFileReader                        │
//! │  open(ctx) → skip headers → fast-forward → read() → update() │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────┬────────────────┴───┬──────────────┬────────────┐
//! │   Source    │ RecordAccumulator  │  LineMapper  │   State    │
//! ├─────────────┼────────────────────┼──────────────┼────────────┤
//! │ File        │ LineCursor         │ PassThrough  │ Context    │
//! │ Bytes       │ Separator policies │ JSON         │ Store      │
//! │             │                    │ Pattern skip │            │
//! └─────────────┴────────────────────┴──────────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Input sources
pub mod source;

/// Record separator policies
pub mod separator;

/// Record to item mapping
pub mod mapping;

/// Checkpoint context and persistence
pub mod state;

/// Restartable reader
pub mod reader;

/// YAML job definitions
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_job, load_job_from_str, JobDefinition};
pub use mapping::{JsonLineMapper, LineMapper, Mapped, PassThroughLineMapper};
pub use reader::{FlatFileReader, ReaderConfig};
pub use separator::RecordSeparatorPolicy;
pub use source::{BytesSource, FileSource, Source};
pub use state::{CheckpointStore, ExecutionContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
