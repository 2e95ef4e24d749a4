//! State management module
//!
//! Holds reader checkpoints and persists them between runs.
//!
//! # Overview
//!
//! The state module provides:
//! - `ExecutionContext` - String-keyed counters shared by readers of one job
//! - `CheckpointStore` - File-based persistence with atomic writes
//! - Key helpers for the `<name>.read.count` convention

mod manager;
mod types;

pub use manager::CheckpointStore;
pub use types::{max_count_key, read_count_key, ExecutionContext, READ_COUNT, READ_COUNT_MAX};
