//! Line cursor over a source's byte stream

use crate::error::{Error, Result};
use crate::source::Source;
use crate::types::ValidationMode;
use std::io::{BufRead, BufReader};
use tracing::{debug, warn};

/// Raw line access over one opened source
///
/// A cursor opened over a missing source in lenient mode has no stream and
/// reports end of input straight away.
pub struct LineCursor {
    reader: Option<Box<dyn BufRead + Send>>,
    description: String,
    line_number: usize,
    comment_prefixes: Vec<String>,
}

impl LineCursor {
    /// Bind to `source`, checking that it exists according to `mode`
    pub fn open(source: &dyn Source, mode: ValidationMode) -> Result<Self> {
        let description = source.describe();

        if !source.exists() {
            if mode.is_strict() {
                return Err(Error::SourceNotFound { description });
            }
            warn!(
                "Input source {} does not exist, reading it as empty",
                description
            );
            return Ok(Self::unbound(description));
        }

        let stream = source.open_stream()?;
        debug!("Opened input source {}", description);
        Ok(Self {
            reader: Some(Box::new(BufReader::new(stream))),
            description,
            line_number: 0,
            comment_prefixes: Vec::new(),
        })
    }

    fn unbound(description: String) -> Self {
        Self {
            reader: None,
            description,
            line_number: 0,
            comment_prefixes: Vec::new(),
        }
    }

    /// Ignore lines starting with any of `prefixes`
    #[must_use]
    pub fn with_comment_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.comment_prefixes = prefixes;
        self
    }

    /// Next non-comment line without its terminator, or `None` at end of input
    pub fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            let Some(line) = self.next_raw_line()? else {
                return Ok(None);
            };
            if !self.is_comment(&line) {
                return Ok(Some(line));
            }
        }
    }

    fn next_raw_line(&mut self) -> Result<Option<String>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut buf = String::new();
        let read = match reader.read_line(&mut buf) {
            Ok(read) => read,
            Err(e) => {
                // The offending line is consumed either way
                self.line_number += 1;
                return Err(Error::read(self.line_number, e.to_string()));
            }
        };
        if read == 0 {
            return Ok(None);
        }

        self.line_number += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }

    fn is_comment(&self, line: &str) -> bool {
        self.comment_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }

    /// Number of raw lines read so far, comments included
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether a stream is bound
    pub fn is_bound(&self) -> bool {
        self.reader.is_some()
    }

    /// Description of the source
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Release the stream. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            debug!(
                "Closed input source {} after {} lines",
                self.description, self.line_number
            );
        }
    }
}

impl std::fmt::Debug for LineCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineCursor")
            .field("description", &self.description)
            .field("line_number", &self.line_number)
            .field("bound", &self.is_bound())
            .finish_non_exhaustive()
    }
}
