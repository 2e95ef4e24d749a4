//! Restartable reader module
//!
//! Reads logical records from a [`Source`](crate::source::Source), maps them
//! to items and keeps a read count that can be checkpointed and resumed.
//!
//! # Overview
//!
//! The reader module provides:
//! - `FlatFileReader` - The checkpointable reader
//! - `ReaderConfig` - Skip/fast-forward/bound settings
//! - `LineCursor` - Raw line access over a byte stream
//! - `RecordAccumulator` - Joins lines into records through a separator policy
//!
//! # Restart contract
//!
//! `update()` publishes the read count under `<name>.read.count`. On the next
//! `open()` with the same context, that many records are skipped after the
//! header lines, so reading resumes after the last record read before the
//! last `update()`.

mod accumulator;
mod cursor;
mod reader;
mod types;

pub use accumulator::RecordAccumulator;
pub use cursor::LineCursor;
pub use reader::{FlatFileReader, SkippedLinesHandler};
pub use types::ReaderConfig;
