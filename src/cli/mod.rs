//! CLI module
//!
//! Command-line interface for running restartable reads.
//!
//! # Commands
//!
//! - `read` - Read a job's input, checkpointing as it goes
//! - `state` - Show the stored checkpoint
//! - `reset` - Forget the checkpoint of one reader
//! - `validate` - Validate a job definition

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
