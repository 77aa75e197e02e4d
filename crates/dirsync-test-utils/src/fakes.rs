//! Filesystem fakes implementing [`CopyFile`], [`MoveFile`] and [`RemoveFile`].
//!
//! Choose [`RecordingFs`] to assert on the exact calls made, and [`MemoryFs`]
//! to assert on the resulting tree contents without touching disk.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};

use dirsync_core::{Action, CopyFile, MoveFile, RemoveFile};
use dirsync_fs::{Snapshot, compute_content_checksum};

/// Records every capability call as the [`Action`] it represents.
///
/// Never fails and never touches the filesystem.
#[derive(Debug, Default)]
pub struct RecordingFs {
    calls: RefCell<Vec<Action>>,
}

impl RecordingFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<Action> {
        self.calls.borrow().clone()
    }
}

impl CopyFile for RecordingFs {
    fn copy_file(&self, source: &Path, dest: &Path) -> dirsync_fs::Result<()> {
        self.calls.borrow_mut().push(Action::copy(source, dest));
        Ok(())
    }
}

impl MoveFile for RecordingFs {
    fn move_file(&self, from: &Path, to: &Path) -> dirsync_fs::Result<()> {
        self.calls.borrow_mut().push(Action::moved(from, to));
        Ok(())
    }
}

impl RemoveFile for RecordingFs {
    fn remove_file(&self, path: &Path) -> dirsync_fs::Result<()> {
        self.calls.borrow_mut().push(Action::delete(path));
        Ok(())
    }
}

/// A flat map of path to bytes behaving like a filesystem.
///
/// Copying or moving from a missing path and removing a missing path fail
/// with `NotFound`, as they would on disk. Writes overwrite silently.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) {
        self.files
            .borrow_mut()
            .insert(path.into(), content.as_ref().to_vec());
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.files.borrow().contains_key(path.as_ref())
    }

    /// Files under `root` as `(relative path, content)` pairs, sorted.
    pub fn files_under(&self, root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        self.files
            .borrow()
            .iter()
            .filter_map(|(path, content)| {
                path.strip_prefix(root)
                    .ok()
                    .map(|rel| (rel.to_path_buf(), content.clone()))
            })
            .collect()
    }

    /// Snapshot reader over this in-memory tree.
    ///
    /// Mirrors the real snapshotter: base names only, later paths win on
    /// duplicate content.
    pub fn snapshot(&self, root: &Path) -> dirsync_fs::Result<Snapshot> {
        Ok(self
            .files_under(root)
            .into_iter()
            .map(|(rel, content)| {
                let name = rel
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (compute_content_checksum(content), name)
            })
            .collect())
    }

    fn take(&self, path: &Path) -> dirsync_fs::Result<Vec<u8>> {
        self.files
            .borrow_mut()
            .remove(path)
            .ok_or_else(|| not_found(path))
    }
}

fn not_found(path: &Path) -> dirsync_fs::Error {
    dirsync_fs::Error::io(path, IoError::new(ErrorKind::NotFound, "no such file"))
}

impl CopyFile for MemoryFs {
    fn copy_file(&self, source: &Path, dest: &Path) -> dirsync_fs::Result<()> {
        let content = self.read(source).ok_or_else(|| not_found(source))?;
        self.write(dest, content);
        Ok(())
    }
}

impl MoveFile for MemoryFs {
    fn move_file(&self, from: &Path, to: &Path) -> dirsync_fs::Result<()> {
        let content = self.take(from)?;
        self.write(to, content);
        Ok(())
    }
}

impl RemoveFile for MemoryFs {
    fn remove_file(&self, path: &Path) -> dirsync_fs::Result<()> {
        self.take(path).map(|_| ())
    }
}
