//! Input source module
//!
//! Byte-producing resources a reader can bind to.
//!
//! # Overview
//!
//! The source module provides:
//! - `Source` - The resource contract (existence, description, stream)
//! - `FileSource` - A file on the local filesystem
//! - `BytesSource` - An in-memory buffer

mod sources;
mod types;

pub use sources::{BytesSource, FileSource};
pub use types::{ByteStream, Source};
