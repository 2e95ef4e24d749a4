//! Checkpoint store implementation
//!
//! Provides file-based persistence of an [`ExecutionContext`] with atomic writes.

use super::types::ExecutionContext;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// Store for persisting and loading checkpoint contexts
///
/// A store without a path keeps its context in memory only.
#[derive(Debug)]
pub struct CheckpointStore {
    /// Path to the state file, empty when in memory
    path: PathBuf,
    /// Current context (cached)
    context: RwLock<ExecutionContext>,
}

impl CheckpointStore {
    /// Create an in-memory store (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            context: RwLock::new(ExecutionContext::new()),
        }
    }

    /// Create a store from a file, loading the existing context if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let context = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::state(format!("Failed to read state file: {e}")))?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::state(format!("Failed to parse state file: {e}")))?
        } else {
            ExecutionContext::new()
        };

        Ok(Self {
            path,
            context: RwLock::new(context),
        })
    }

    /// Create an in-memory store from an inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let context: ExecutionContext = serde_json::from_str(json)
            .map_err(|e| Error::state(format!("Failed to parse state JSON: {e}")))?;

        Ok(Self {
            path: PathBuf::new(),
            context: RwLock::new(context),
        })
    }

    /// Save the current context to file
    async fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let contents = {
            let mut context = self.context.write().await;
            context.touch();
            serde_json::to_string_pretty(&*context)
                .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))?
        };

        write_atomic(&self.path, &contents).await?;
        debug!("Saved checkpoint to {}", self.path.display());
        Ok(())
    }

    /// Snapshot of the current context
    pub async fn context(&self) -> ExecutionContext {
        self.context.read().await.clone()
    }

    /// Replace the stored context with `context` and persist it
    pub async fn commit(&self, context: ExecutionContext) -> Result<()> {
        {
            let mut current = self.context.write().await;
            *current = context;
        }
        self.save().await
    }

    /// Export the context as JSON string
    pub async fn to_json(&self) -> Result<String> {
        let context = self.context.read().await;
        serde_json::to_string(&*context)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))
    }

    /// Get a stored count
    pub async fn get_count(&self, key: &str) -> Option<u64> {
        self.context.read().await.get_count(key)
    }

    /// Clear all state, returning how many entries were removed
    pub async fn clear(&self) -> Result<usize> {
        let removed = {
            let mut context = self.context.write().await;
            let removed = context.len();
            *context = ExecutionContext::new();
            removed
        };
        self.save().await?;
        Ok(removed)
    }

    /// Clear the keys of one reader, returning how many were removed
    pub async fn clear_reader(&self, name: &str) -> Result<usize> {
        let removed = {
            let mut context = self.context.write().await;
            context.remove_prefix(name)
        };
        self.save().await?;
        Ok(removed)
    }

    /// Get the state file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

/// Write to a temp file first, then rename over the target
async fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, contents)
        .await
        .map_err(|e| Error::checkpoint(format!("Failed to write state file: {e}")))?;

    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| Error::checkpoint(format!("Failed to rename state file: {e}")))?;

    Ok(())
}
