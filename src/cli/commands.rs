//! CLI commands and argument parsing

use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Flatfile CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-flatfile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// State file (JSON)
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Inline state JSON
    #[arg(long, global = true)]
    pub state_json: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output (same as `--log-level debug`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level for messages on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level, `--verbose` taking precedence
    pub fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read records, resuming from the stored checkpoint
    Read {
        /// Job definition file (YAML)
        #[arg(short, long)]
        job: PathBuf,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,

        /// Items between checkpoints (overrides the job definition)
        #[arg(long)]
        commit_interval: Option<usize>,
    },

    /// Show the stored checkpoint
    State,

    /// Remove checkpoint entries
    Reset {
        /// Reader whose entries are removed
        #[arg(long, required_unless_present = "all")]
        name: Option<String>,

        /// Remove every entry
        #[arg(long, conflicts_with = "name")]
        all: bool,
    },

    /// Validate a job definition
    Validate {
        /// Job definition file (YAML)
        #[arg(short, long)]
        job: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
