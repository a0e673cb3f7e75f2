//! Artifact storage configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Artifact store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files in a local directory
    #[default]
    Filesystem,
    /// Process memory, lost on restart
    Memory,
}

/// Artifact storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding artifacts (filesystem backend)
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Age in seconds after which artifacts are purged (0 = keep forever)
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,

    /// Seconds between purge runs
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

fn default_directory() -> PathBuf {
    PathBuf::from("./audio")
}

const fn default_retention_secs() -> u64 {
    24 * 60 * 60
}

const fn default_cleanup_interval_secs() -> u64 {
    60 * 60
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            directory: default_directory(),
            retention_secs: default_retention_secs(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl StorageConfig {
    /// Retention period, or `None` when artifacts are kept forever
    #[must_use]
    pub const fn retention(&self) -> Option<Duration> {
        if self.retention_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.retention_secs))
        }
    }

    /// Interval between purge runs (at least one second)
    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}
