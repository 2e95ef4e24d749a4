//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::load_job;
use crate::error::{Error, Result, ResultExt};
use crate::reader::FlatFileReader;
use crate::state::{CheckpointStore, ExecutionContext};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

/// Items read in one commit interval, with the reader and context handed back
struct Chunk {
    reader: FlatFileReader<Value>,
    context: ExecutionContext,
    items: Vec<Value>,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Read {
                job,
                limit,
                commit_interval,
            } => self.read(job, *limit, *commit_interval).await,
            Commands::State => self.state().await,
            Commands::Reset { name, all } => self.reset(name.as_deref(), *all).await,
            Commands::Validate { job } => self.validate(job),
        }
    }

    /// Load the checkpoint store
    fn load_store(&self) -> Result<CheckpointStore> {
        // Inline state takes precedence
        if let Some(state_json) = &self.cli.state_json {
            CheckpointStore::from_json(state_json)
        } else if let Some(path) = &self.cli.state {
            CheckpointStore::from_file(path)
        } else {
            Ok(CheckpointStore::in_memory())
        }
    }

    /// Read a job, checkpointing after every commit interval
    async fn read(
        &self,
        job_path: &Path,
        limit: Option<usize>,
        commit_interval: Option<usize>,
    ) -> Result<()> {
        let started = Instant::now();
        let job = load_job(job_path).with_context(|| {
            format!("Failed to load job definition '{}'", job_path.display())
        })?;
        let interval = commit_interval.unwrap_or(job.commit_interval).max(1);
        let reader = job.build_reader(job_path.parent())?;
        let store = self.load_store()?;
        let context = store.context().await;

        info!(
            "Starting read of '{}' (commit interval {}, limit {:?})",
            job.name, interval, limit
        );

        let (mut reader, mut context) = run_blocking(move || {
            let mut reader = reader;
            reader.open(&context)?;
            Ok((reader, context))
        })
        .await?;
        let resumed_from = reader.read_count();

        let mut total = 0usize;
        let mut exhausted = false;
        loop {
            let wanted = limit.map_or(interval, |l| interval.min(l.saturating_sub(total)));
            if wanted == 0 {
                break;
            }

            let chunk = run_blocking(move || read_chunk(reader, context, wanted)).await?;
            reader = chunk.reader;
            context = chunk.context;
            total += chunk.items.len();

            for item in &chunk.items {
                self.output_message(&json!({
                    "type": "RECORD",
                    "reader": job.name,
                    "record": item
                }));
            }

            store.commit(context.clone()).await?;
            debug!(
                "Checkpoint committed at read count {} ({})",
                reader.read_count(),
                if store.is_in_memory() {
                    "in memory".to_string()
                } else {
                    store.path().display().to_string()
                }
            );

            if chunk.items.len() < wanted {
                exhausted = true;
                break;
            }
        }

        let read_count = reader.read_count();
        reader.close();

        let state = store.to_json().await?;
        self.output_message(&json!({
            "type": "STATE",
            "state": serde_json::from_str::<Value>(&state)?
        }));

        let duration_ms = started.elapsed().as_millis() as u64;
        self.output_message(&json!({
            "type": "READ_SUMMARY",
            "summary": {
                "reader": job.name,
                "source": job.source.display().to_string(),
                "records": total,
                "resumed_from": resumed_from,
                "read_count": read_count,
                "exhausted": exhausted,
                "duration_ms": duration_ms,
                "state_file": self.cli.state.as_ref().map(|p| p.display().to_string())
            }
        }));

        info!(
            "Read {} records from '{}' in {}ms",
            total, job.name, duration_ms
        );
        Ok(())
    }

    /// Show the stored checkpoint
    async fn state(&self) -> Result<()> {
        let store = self.load_store()?;
        let state = store.to_json().await?;
        self.output_message(&json!({
            "type": "STATE",
            "state": serde_json::from_str::<Value>(&state)?
        }));
        Ok(())
    }

    /// Remove checkpoint entries from the state file
    async fn reset(&self, name: Option<&str>, all: bool) -> Result<()> {
        let store = self.load_store()?;
        if store.is_in_memory() {
            return Err(Error::config("reset requires a state file (--state)"));
        }

        let removed = if all {
            store.clear().await?
        } else {
            let name = name.ok_or_else(|| Error::missing_field("name"))?;
            store.clear_reader(name).await?
        };

        self.output_message(&json!({
            "type": "RESET",
            "reader": name,
            "removed": removed
        }));
        Ok(())
    }

    /// Validate a job definition
    fn validate(&self, job_path: &Path) -> Result<()> {
        let job = load_job(job_path)?;
        let config = job.reader_config();

        self.output_message(&json!({
            "type": "VALID",
            "job": {
                "name": job.name,
                "description": job.description(),
                "source": job.source.display().to_string(),
                "lines_to_skip": config.lines_to_skip,
                "mode": config.mode,
                "separator": job.separator,
                "mapper": job.mapper,
                "commit_interval": job.commit_interval
            }
        }));
        Ok(())
    }

    /// Output a message in the configured format
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Read up to `wanted` items, then publish the read count into `context`
fn read_chunk(
    mut reader: FlatFileReader<Value>,
    mut context: ExecutionContext,
    wanted: usize,
) -> Result<Chunk> {
    let mut items = Vec::with_capacity(wanted);
    while items.len() < wanted {
        match reader.read()? {
            Some(item) => items.push(item),
            None => break,
        }
    }
    reader.update(&mut context)?;
    Ok(Chunk {
        reader,
        context,
        items,
    })
}

/// Run blocking reader work off the async runtime
async fn run_blocking<R, F>(f: F) -> Result<R>
where
    R: Send + 'static,
    F: FnOnce() -> Result<R> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Other(format!("Reader task failed: {e}")))?
}
