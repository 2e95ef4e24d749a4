//! Source types and traits
//!
//! Defines the resource abstraction readers consume.

use crate::error::Result;
use std::io::Read;

/// A readable byte stream handed out by a [`Source`]
pub type ByteStream = Box<dyn Read + Send>;

/// A byte-producing resource
///
/// A source may not exist yet when a reader is configured. Existence is
/// queried each time the reader is opened, and a fresh stream is requested
/// for every open.
pub trait Source: Send {
    /// Whether the underlying resource currently exists
    fn exists(&self) -> bool;

    /// Human-readable description used in logs and errors
    fn describe(&self) -> String;

    /// Open a new stream positioned at the start of the resource
    fn open_stream(&self) -> Result<ByteStream>;
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn open_stream(&self) -> Result<ByteStream> {
        (**self).open_stream()
    }
}
