//! SyncEngine implementation
//!
//! The engine binds a [`SyncConfig`] to the real filesystem: it snapshots with
//! the configured hashing options and either applies the diff or, in dry-run
//! mode, only reports it.

use std::path::Path;

use dirsync_fs::{Snapshot, Snapshotter};

use crate::{Action, LocalFileSystem, Result, SyncConfig, SyncReport, diff, synchronise};

/// Configured entry point for planning and running syncs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncEngine {
    config: SyncConfig,
    snapshotter: Snapshotter,
}

impl SyncEngine {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            snapshotter: Snapshotter::new(config.snapshot_options()),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Snapshot a single directory with the configured options.
    pub fn snapshot(&self, root: &Path) -> Result<Snapshot> {
        Ok(self.snapshotter.snapshot(root)?)
    }

    /// Compute the actions a sync would apply, without changing anything.
    pub fn plan(&self, source: &Path, dest: &Path) -> Result<Vec<Action>> {
        let source_snapshot = self.snapshot(source)?;
        let dest_snapshot = self.snapshot(dest)?;
        Ok(diff(&source_snapshot, &dest_snapshot, source, dest).collect())
    }

    /// Synchronise `dest` with `source`, honouring `dry_run`.
    pub fn sync(&self, source: &Path, dest: &Path) -> Result<SyncReport> {
        if self.config.dry_run {
            let actions = self.plan(source, dest)?;
            tracing::info!(planned = actions.len(), "dry run, destination left untouched");
            return Ok(SyncReport::planned(actions));
        }

        let fs = LocalFileSystem;
        synchronise(
            |root: &Path| self.snapshotter.snapshot(root),
            &fs,
            &fs,
            &fs,
            source,
            dest,
        )
    }
}
