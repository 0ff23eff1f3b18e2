//! Run configuration.
//!
//! Loaded from an optional TOML file; every key has a default, and the
//! command line overrides whatever the file sets.
//!
//! ```toml
//! policy = "static"
//! out_dir = "out"
//! debug = false
//! workers = 4
//! ```

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dispatching::Policy;
use crate::error::ConfigError;

/// Settings for a batch of scheduling runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Scoring policy.
    pub policy: Policy,
    /// Directory receiving one output file per input.
    pub out_dir: PathBuf,
    /// Verbose logging.
    pub debug: bool,
    /// Worker threads; `None` uses the available parallelism.
    pub workers: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            out_dir: PathBuf::from("out"),
            debug: false,
            workers: None,
        }
    }
}

impl RunConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Number of worker threads for `jobs` instances (at least 1 when `jobs > 0`).
    pub fn worker_count(&self, jobs: usize) -> usize {
        let wanted = self.workers.filter(|&w| w > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        });
        wanted.min(jobs)
    }
}
