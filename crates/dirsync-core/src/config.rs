//! Sync configuration
//!
//! Loaded from a `.toml`, `.json` or `.yaml` file through
//! [`dirsync_fs::ConfigStore`]. Every field has a default, so an empty file
//! (or no file at all) is a valid configuration.

use std::path::Path;

use dirsync_fs::{ConfigStore, DEFAULT_BLOCK_SIZE, SnapshotOptions};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Settings for a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Bytes read per block while hashing
    pub block_size: usize,
    /// Hash files in parallel
    pub parallel: bool,
    /// Plan only; never modify the destination
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            parallel: false,
            dry_run: false,
        }
    }
}

impl SyncConfig {
    /// Load configuration from `path`, picking the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Save configuration to `path` atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }

    pub fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            block_size: self.block_size,
            parallel: self.parallel,
        }
    }
}
