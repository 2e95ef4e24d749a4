//! Source implementations

use super::types::{ByteStream, Source};
use crate::error::{Error, Result};
use bytes::Bytes;
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};

// ============================================================================
// File Source
// ============================================================================

/// A file on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path. The file need not exist yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FileSource {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn describe(&self) -> String {
        format!("file [{}]", self.path.display())
    }

    fn open_stream(&self) -> Result<ByteStream> {
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                Error::SourceOpen {
                    description: self.describe(),
                    message: e.to_string(),
                }
            }
        })?;
        Ok(Box::new(file))
    }
}

// ============================================================================
// Bytes Source
// ============================================================================

/// An in-memory buffer. Always exists.
#[derive(Debug, Clone)]
pub struct BytesSource {
    data: Bytes,
    description: String,
}

impl BytesSource {
    /// Create a source over the given bytes
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            description: "in-memory bytes".to_string(),
        }
    }

    /// Create a source over a UTF-8 string
    pub fn from_text(text: &str) -> Self {
        Self::new(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Set the description used in diagnostics
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Number of bytes held
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Source for BytesSource {
    fn exists(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("{} ({} bytes)", self.description, self.data.len())
    }

    fn open_stream(&self) -> Result<ByteStream> {
        // Bytes clones share the buffer
        Ok(Box::new(Cursor::new(self.data.clone())))
    }
}
