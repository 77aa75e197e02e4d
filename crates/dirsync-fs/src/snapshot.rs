//! Content-addressed directory snapshots
//!
//! A [`Snapshot`] maps each content [`Digest`] found under a root to the base
//! name of the file holding it. Directories only drive traversal and never
//! appear in the result.
//!
//! Two files with identical content under the same root collapse into one
//! entry. Traversal is sorted by file name, so the file visited last wins and
//! the outcome is stable between runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::checksum::{DEFAULT_BLOCK_SIZE, Digest, hash_file_with_block_size};
use crate::{Error, Result};

/// Digest to filename mapping for one root directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<Digest, String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `filename` as the holder of `digest`.
    ///
    /// Returns the filename previously recorded for the same digest, if any.
    pub fn insert(&mut self, digest: impl Into<Digest>, filename: impl Into<String>) -> Option<String> {
        self.entries.insert(digest.into(), filename.into())
    }

    pub fn get(&self, digest: &Digest) -> Option<&str> {
        self.entries.get(digest).map(String::as_str)
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.entries.contains_key(digest)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in digest order.
    pub fn iter(&self) -> impl Iterator<Item = (&Digest, &str)> {
        self.entries.iter().map(|(d, f)| (d, f.as_str()))
    }
}

impl<D, F> FromIterator<(D, F)> for Snapshot
where
    D: Into<Digest>,
    F: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (D, F)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (digest, filename) in iter {
            snapshot.insert(digest, filename);
        }
        snapshot
    }
}

/// Tuning knobs for building snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotOptions {
    /// Bytes read per block while hashing.
    pub block_size: usize,
    /// Hash files on the rayon thread pool instead of the calling thread.
    pub parallel: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            parallel: false,
        }
    }
}

/// Builds [`Snapshot`]s from real directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snapshotter {
    options: SnapshotOptions,
}

impl Snapshotter {
    pub fn new(options: SnapshotOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SnapshotOptions {
        self.options
    }

    /// Hash every regular file under `root`.
    ///
    /// # Errors
    ///
    /// Fails if `root` is missing or not a directory, or on the first file
    /// that cannot be walked or read. No partial snapshot is returned.
    pub fn snapshot(&self, root: &Path) -> Result<Snapshot> {
        if self.options.block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        let metadata = std::fs::metadata(root).map_err(|e| Error::io(root, e))?;
        if !metadata.is_dir() {
            return Err(Error::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let files = collect_files(root)?;
        let block_size = self.options.block_size;

        // Hashing may run in parallel, but entries are merged here in walk order
        let hashed: Vec<(Digest, &PathBuf)> = if self.options.parallel {
            files
                .par_iter()
                .map(|path| hash_file_with_block_size(path, block_size).map(|d| (d, path)))
                .collect::<Result<_>>()?
        } else {
            files
                .iter()
                .map(|path| hash_file_with_block_size(path, block_size).map(|d| (d, path)))
                .collect::<Result<_>>()?
        };

        let mut snapshot = Snapshot::new();
        for (digest, path) in hashed {
            let filename = base_name(path);
            if let Some(previous) = snapshot.insert(digest.clone(), filename.clone()) {
                tracing::debug!(
                    %digest,
                    kept = %filename,
                    dropped = %previous,
                    "duplicate content under one root"
                );
            }
        }

        tracing::debug!(
            root = %root.display(),
            files = files.len(),
            entries = snapshot.len(),
            "snapshot complete"
        );
        Ok(snapshot)
    }
}

/// Snapshot `root` with default options.
///
/// # Errors
///
/// See [`Snapshotter::snapshot`].
pub fn snapshot(root: &Path) -> Result<Snapshot> {
    Snapshotter::default().snapshot(root)
}

fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
