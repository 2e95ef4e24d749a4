//! Job definitions
//!
//! A job definition describes one reader in YAML: where the input lives, how
//! records are separated and mapped, and how often the CLI checkpoints.
//!
//! ```yaml
//! name: orders
//! source: data/orders.txt
//! lines_to_skip: 1
//! mode: strict
//! comment_prefixes: ["#"]
//! separator:
//!   type: quoted
//! mapper:
//!   type: json
//!   skip_pattern: "^\\s*$"
//! commit_interval: 100
//! ```

use crate::error::{Error, Result};
use crate::mapping::MapperConfig;
use crate::reader::{FlatFileReader, ReaderConfig};
use crate::separator::{SeparatorConfig, SeparatorKind};
use crate::source::FileSource;
use crate::types::{OptionStringExt, ValidationMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Job Definition
// ============================================================================

/// Complete job definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDefinition {
    /// Reader name, used as checkpoint key prefix
    pub name: String,

    /// Input file
    pub source: PathBuf,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Header lines discarded on every open
    #[serde(default)]
    pub lines_to_skip: usize,

    /// Records skipped on a first run
    #[serde(default)]
    pub current_item_count: usize,

    /// Upper bound on the read count (unbounded when absent)
    #[serde(default)]
    pub max_item_count: Option<usize>,

    /// Missing input handling
    #[serde(default)]
    pub mode: ValidationMode,

    /// Whether checkpoints are read and written
    #[serde(default = "default_true")]
    pub save_state: bool,

    /// Comment line prefixes
    #[serde(default)]
    pub comment_prefixes: Vec<String>,

    /// Record separator
    #[serde(default)]
    pub separator: SeparatorConfig,

    /// Record mapper
    #[serde(default)]
    pub mapper: MapperConfig,

    /// Items read between two checkpoints
    #[serde(default = "default_commit_interval")]
    pub commit_interval: usize,
}

fn default_true() -> bool {
    true
}

fn default_commit_interval() -> usize {
    10
}

impl JobDefinition {
    /// Reader settings for this job
    pub fn reader_config(&self) -> ReaderConfig {
        let mut config = ReaderConfig::new(&self.name);
        config.lines_to_skip = self.lines_to_skip;
        config.current_item_count = self.current_item_count;
        if let Some(max) = self.max_item_count {
            config.max_item_count = max;
        }
        config.mode = self.mode;
        config.save_state = self.save_state;
        config.comment_prefixes.clone_from(&self.comment_prefixes);
        config
    }

    /// Build a reader producing JSON values
    ///
    /// A relative `source` is resolved against `base_dir` when given.
    pub fn build_reader(&self, base_dir: Option<&Path>) -> Result<FlatFileReader<Value>> {
        let path = match base_dir {
            Some(dir) if self.source.is_relative() => dir.join(&self.source),
            _ => self.source.clone(),
        };

        let mapper = self.mapper.build()?;
        let reader = FlatFileReader::from_boxed(self.reader_config(), mapper)
            .with_source(FileSource::new(path))
            .with_separator_policy(self.separator.build());
        reader.validate()?;
        Ok(reader)
    }

    /// Description, if set and non-empty
    pub fn description(&self) -> Option<String> {
        self.description.clone().none_if_empty()
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a job definition from a YAML file
pub fn load_job(path: impl AsRef<Path>) -> Result<JobDefinition> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read job file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_job_from_str(&content)
}

/// Load a job definition from a YAML string
pub fn load_job_from_str(yaml: &str) -> Result<JobDefinition> {
    let def: JobDefinition = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse job YAML: {e}")))?;

    validate_job(&def)?;
    Ok(def)
}

/// Validate a job definition
fn validate_job(def: &JobDefinition) -> Result<()> {
    def.reader_config().validate()?;

    if def.source.as_os_str().is_empty() {
        return Err(Error::missing_field("source"));
    }

    if def.commit_interval == 0 {
        return Err(Error::invalid_value(
            "commit_interval",
            "must be greater than zero",
        ));
    }

    if def.separator.kind == SeparatorKind::Suffix
        && def.separator.suffix.as_deref().is_some_and(str::is_empty)
    {
        return Err(Error::invalid_value("separator.suffix", "cannot be empty"));
    }

    // Compiles the skip pattern, if any
    def.mapper.build()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MapperKind;
    use crate::state::ExecutionContext;
    use serde_json::json;
    use tempfile::tempdir;

    const FULL_JOB: &str = r##"
name: orders
source: orders.jsonl
description: Nightly order export
lines_to_skip: 1
current_item_count: 2
max_item_count: 100
mode: lenient
save_state: true
comment_prefixes: ["#"]
separator:
  type: json
mapper:
  type: json
  skip_pattern: "^\\s*$"
commit_interval: 5
"##;

    #[test]
    fn test_load_full_job() {
        let job = load_job_from_str(FULL_JOB).unwrap();
        assert_eq!(job.name, "orders");
        assert_eq!(job.source, PathBuf::from("orders.jsonl"));
        assert_eq!(job.description().as_deref(), Some("Nightly order export"));
        assert_eq!(job.lines_to_skip, 1);
        assert_eq!(job.current_item_count, 2);
        assert_eq!(job.max_item_count, Some(100));
        assert_eq!(job.mode, ValidationMode::Lenient);
        assert_eq!(job.separator.kind, SeparatorKind::Json);
        assert_eq!(job.mapper.kind, MapperKind::Json);
        assert_eq!(job.commit_interval, 5);

        let config = job.reader_config();
        assert_eq!(config.name, "orders");
        assert_eq!(config.max_item_count, 100);
        assert_eq!(config.comment_prefixes, vec!["#"]);
    }

    #[test]
    fn test_load_minimal_job_defaults() {
        let job = load_job_from_str("name: users\nsource: users.txt").unwrap();
        assert_eq!(job.mode, ValidationMode::Strict);
        assert!(job.save_state);
        assert_eq!(job.commit_interval, 10);
        assert!(job.description().is_none());

        let config = job.reader_config();
        assert_eq!(config.max_item_count, usize::MAX);
        assert_eq!(config.lines_to_skip, 0);
    }

    #[test]
    fn test_rejects_zero_commit_interval() {
        let err = load_job_from_str("name: a\nsource: a.txt\ncommit_interval: 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "commit_interval"));
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = load_job_from_str("name: ''\nsource: a.txt").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_rejects_bad_skip_pattern() {
        let yaml = "name: a\nsource: a.txt\nmapper:\n  skip_pattern: '(['";
        assert!(load_job_from_str(yaml).is_err());
    }

    #[test]
    fn test_rejects_invalid_yaml() {
        let err = load_job_from_str("name: [unterminated").unwrap_err();
        assert!(err.to_string().contains("Failed to parse job YAML"));
    }

    #[test]
    fn test_load_job_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_job(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_build_reader_resolves_relative_source() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("orders.jsonl"),
            "skipped header\n{\"id\": 1}\n{\"id\": 2}\n{\"id\": 3}\n{\"id\": 4}\n",
        )
        .unwrap();
        let job_path = dir.path().join("job.yaml");
        fs::write(&job_path, FULL_JOB).unwrap();

        let job = load_job(&job_path).unwrap();
        let mut reader = job.build_reader(Some(dir.path())).unwrap();
        reader.open(&ExecutionContext::new()).unwrap();

        // current_item_count 2 skips the first two objects
        assert_eq!(reader.read().unwrap(), Some(json!({"id": 3})));
        assert_eq!(reader.read().unwrap(), Some(json!({"id": 4})));
        assert_eq!(reader.read().unwrap(), None);
    }

    #[test]
    fn test_build_reader_passthrough_strings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, "a\nb").unwrap();

        let yaml = format!("name: plain\nsource: {}", path.display());
        let job = load_job_from_str(&yaml).unwrap();
        let mut reader = job.build_reader(None).unwrap();
        reader.open(&ExecutionContext::new()).unwrap();

        assert_eq!(reader.read().unwrap(), Some(json!("a")));
        assert_eq!(reader.read().unwrap(), Some(json!("b")));
    }
}
