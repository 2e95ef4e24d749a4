//! Checkpointable flat file reader

use super::accumulator::RecordAccumulator;
use super::cursor::LineCursor;
use super::types::ReaderConfig;
use crate::error::{Error, Result};
use crate::mapping::{LineMapper, Mapped};
use crate::separator::{RecordSeparatorPolicy, SingleLinePolicy};
use crate::source::Source;
use crate::state::{max_count_key, read_count_key, ExecutionContext};
use crate::types::ValidationMode;
use tracing::{debug, info, trace};

/// Callback receiving each header line discarded on open
pub type SkippedLinesHandler = Box<dyn FnMut(&str) + Send>;

/// Restartable reader of logical records
///
/// The reader is configured once and may then be opened and closed many
/// times. Every `open()` binds to the current source, discards the header
/// lines and fast-forwards past the records counted in the checkpoint
/// context (or `current_item_count` when the context has none).
///
/// ```rust,ignore
/// let mut reader = FlatFileReader::new("orders", PassThroughLineMapper)
///     .with_source(FileSource::new("orders.txt"))
///     .with_lines_to_skip(1);
///
/// let mut context = ExecutionContext::new();
/// reader.open(&context)?;
/// while let Some(line) = reader.read()? {
///     // ...
///     reader.update(&mut context)?;
/// }
/// reader.close();
/// ```
pub struct FlatFileReader<T> {
    config: ReaderConfig,
    source: Option<Box<dyn Source>>,
    policy: Box<dyn RecordSeparatorPolicy>,
    mapper: Box<dyn LineMapper<T>>,
    skipped_lines: Option<SkippedLinesHandler>,
    /// Present while open
    cursor: Option<LineCursor>,
    read_count: usize,
    /// Effective bound for the current cycle
    max_item_count: usize,
}

impl<T> FlatFileReader<T> {
    /// Create a reader named `name` with default settings and no source
    pub fn new(name: impl Into<String>, mapper: impl LineMapper<T> + 'static) -> Self {
        Self::from_config(ReaderConfig::new(name), mapper)
    }

    /// Create a reader from a full configuration
    pub fn from_config(config: ReaderConfig, mapper: impl LineMapper<T> + 'static) -> Self {
        Self::from_boxed(config, Box::new(mapper))
    }

    /// Create a reader from a configuration and an already boxed mapper
    pub fn from_boxed(config: ReaderConfig, mapper: Box<dyn LineMapper<T>>) -> Self {
        let max_item_count = config.max_item_count;
        Self {
            config,
            source: None,
            policy: Box::new(SingleLinePolicy),
            mapper,
            skipped_lines: None,
            cursor: None,
            read_count: 0,
            max_item_count,
        }
    }

    /// Set the input source
    #[must_use]
    pub fn with_source(mut self, source: impl Source + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Set the record separator policy
    #[must_use]
    pub fn with_separator_policy(mut self, policy: impl RecordSeparatorPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Discard `lines` header lines on every open
    #[must_use]
    pub fn with_lines_to_skip(mut self, lines: usize) -> Self {
        self.config.lines_to_skip = lines;
        self
    }

    /// Skip `count` records on open when the context holds no read count
    #[must_use]
    pub fn with_current_item_count(mut self, count: usize) -> Self {
        self.config.current_item_count = count;
        self
    }

    /// Stop returning items once the read count reaches `count`
    #[must_use]
    pub fn with_max_item_count(mut self, count: usize) -> Self {
        self.config.max_item_count = count;
        self.max_item_count = count;
        self
    }

    /// Set how a missing source is treated on open
    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Shorthand for [`with_mode`](Self::with_mode)
    #[must_use]
    pub fn strict(self, strict: bool) -> Self {
        self.with_mode(ValidationMode::from(strict))
    }

    /// Enable or disable reading and writing the checkpoint context
    #[must_use]
    pub fn with_save_state(mut self, save_state: bool) -> Self {
        self.config.save_state = save_state;
        self
    }

    /// Ignore lines starting with any of `prefixes`
    #[must_use]
    pub fn with_comment_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.comment_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Receive each discarded header line
    #[must_use]
    pub fn with_skipped_lines_handler(mut self, handler: impl FnMut(&str) + Send + 'static) -> Self {
        self.skipped_lines = Some(Box::new(handler));
        self
    }

    /// Replace the source. Takes effect on the next open.
    pub fn set_source(&mut self, source: impl Source + 'static) {
        self.source = Some(Box::new(source));
    }

    /// Check the reader can be opened
    ///
    /// Only the presence of a source is checked here. Whether it exists is
    /// decided at open time, so a source may appear in between.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        if self.source.is_none() {
            return Err(Error::missing_field("source"));
        }
        Ok(())
    }

    /// Open the reader, restoring its position from `context`
    pub fn open(&mut self, context: &ExecutionContext) -> Result<()> {
        if self.cursor.is_some() {
            return Err(Error::illegal_state(format!(
                "reader '{}' is already open",
                self.config.name
            )));
        }
        self.validate()?;

        let source = self
            .source
            .as_deref()
            .ok_or_else(|| Error::missing_field("source"))?;
        let mut cursor = LineCursor::open(source, self.config.mode)?
            .with_comment_prefixes(self.config.comment_prefixes.clone());

        self.policy.reset();

        for _ in 0..self.config.lines_to_skip {
            let Some(line) = cursor.next_line()? else {
                break;
            };
            if let Some(handler) = self.skipped_lines.as_mut() {
                handler(&line);
            }
        }

        let (read_count, max_item_count) = self.restore(context);
        self.read_count = read_count;
        self.max_item_count = max_item_count;

        let mut skipped = 0;
        while skipped < read_count {
            let mut accumulator = RecordAccumulator::new(&mut cursor, self.policy.as_mut());
            if accumulator.next_record()?.is_none() {
                break;
            }
            skipped += 1;
        }
        if read_count > 0 {
            debug!(
                "Reader '{}' fast-forwarded {} of {} records",
                self.config.name, skipped, read_count
            );
        }

        info!(
            "Opened reader '{}' on {} (read count {}, line {})",
            self.config.name,
            cursor.description(),
            self.read_count,
            cursor.line_number()
        );
        self.cursor = Some(cursor);
        Ok(())
    }

    /// Baseline read count and effective max for the next cycle
    fn restore(&self, context: &ExecutionContext) -> (usize, usize) {
        if !self.config.save_state {
            return (self.config.current_item_count, self.config.max_item_count);
        }

        let read_count = context
            .get_count(&read_count_key(&self.config.name))
            .map_or(self.config.current_item_count, count_to_usize);
        let max_item_count = context
            .get_count(&max_count_key(&self.config.name))
            .map_or(self.config.max_item_count, count_to_usize);
        (read_count, max_item_count)
    }

    /// Read the next item, or `None` at the end of the data
    ///
    /// Every record taken from the source is counted before it is mapped, so
    /// records the mapper skips or fails on are not delivered again after a
    /// restart. Mapper errors are returned as they are.
    pub fn read(&mut self) -> Result<Option<T>> {
        let cursor = self
            .cursor
            .as_mut()
            .ok_or_else(|| Error::illegal_state("read() called on a reader that is not open"))?;

        loop {
            if self.read_count >= self.max_item_count {
                return Ok(None);
            }

            let Some(record) =
                RecordAccumulator::new(cursor, self.policy.as_mut()).next_record()?
            else {
                return Ok(None);
            };

            self.read_count += 1;
            match self.mapper.map_line(&record, cursor.line_number())? {
                Mapped::Item(item) => return Ok(Some(item)),
                Mapped::Skip => trace!(
                    "Reader '{}' skipped record ending at line {}",
                    self.config.name,
                    cursor.line_number()
                ),
            }
        }
    }

    /// Publish the read count into `context`
    ///
    /// The max-count key is never written.
    pub fn update(&self, context: &mut ExecutionContext) -> Result<()> {
        if self.cursor.is_none() {
            return Err(Error::illegal_state(
                "update() called on a reader that is not open",
            ));
        }
        if self.config.save_state {
            context.put_count(read_count_key(&self.config.name), self.read_count as u64);
            debug!(
                "Reader '{}' checkpointed read count {}",
                self.config.name, self.read_count
            );
        }
        Ok(())
    }

    /// Release the source. Safe to call in any state.
    pub fn close(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            cursor.close();
        }
    }

    /// Whether the reader is open
    pub fn is_open(&self) -> bool {
        self.cursor.is_some()
    }

    /// Records consumed so far, including the fast-forward baseline
    pub fn read_count(&self) -> usize {
        self.read_count
    }

    /// Bound in effect for the current cycle
    pub fn max_item_count(&self) -> usize {
        self.max_item_count
    }

    /// Raw line number of the last line read, 0 when closed
    pub fn line_number(&self) -> usize {
        self.cursor.as_ref().map_or(0, LineCursor::line_number)
    }

    /// Reader name, used as checkpoint key prefix
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Current configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

/// Yields nothing while the reader is closed
impl<T> Iterator for FlatFileReader<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.is_open() {
            return None;
        }
        self.read().transpose()
    }
}

impl<T> std::fmt::Debug for FlatFileReader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatFileReader")
            .field("config", &self.config)
            .field("source", &self.source.as_ref().map(|s| s.describe()))
            .field("cursor", &self.cursor)
            .field("read_count", &self.read_count)
            .field("max_item_count", &self.max_item_count)
            .finish_non_exhaustive()
    }
}

fn count_to_usize(count: u64) -> usize {
    usize::try_from(count).unwrap_or(usize::MAX)
}
