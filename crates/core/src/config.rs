//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core
//! services. Request handlers never read process-wide environment
//! variables, which keeps behaviour consistent across multi-threaded
//! runtimes and test harnesses.

use std::path::{Path, PathBuf};

/// Default base directory for persisted discovery responses.
pub const DEFAULT_RESPONSE_DATA_DIR: &str = "/response_data";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    response_data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig` rooted at the given data directory.
    pub fn new(response_data_dir: PathBuf) -> Self {
        Self { response_data_dir }
    }

    /// Resolve the data directory from an optional environment value
    /// (`RESPONSE_DATA_DIR`), falling back to the default when unset or
    /// blank.
    pub fn from_env_value(value: Option<String>) -> Self {
        let dir = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_RESPONSE_DATA_DIR.to_string());
        Self::new(PathBuf::from(dir))
    }

    pub fn response_data_dir(&self) -> &Path {
        &self.response_data_dir
    }

    /// Directory holding the sharded per-record JSON files.
    pub fn responses_dir(&self) -> PathBuf {
        self.response_data_dir.join("responses")
    }
}
