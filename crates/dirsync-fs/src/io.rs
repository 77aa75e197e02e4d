//! Filesystem mutations used when applying sync actions
//!
//! Writes go to a locked temp file in the target directory and are renamed
//! into place, so a failed copy never leaves a truncated destination file.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Copy `source` to `dest` atomically, replacing any existing file at `dest`.
///
/// Missing parent directories of `dest` are created.
pub fn copy_atomic(source: &Path, dest: &Path) -> Result<()> {
    let mut input = File::open(source).map_err(|e| Error::io(source, e))?;
    write_via_temp(dest, |temp, temp_path| {
        std::io::copy(&mut input, temp).map_err(|e| Error::io(temp_path, e))?;
        Ok(())
    })
}

/// Write content atomically to a file with locking.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    write_via_temp(path, |temp, temp_path| {
        temp.write_all(content).map_err(|e| Error::io(temp_path, e))
    })
}

/// Rename `from` to `to`, creating missing parent directories of `to`.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    ensure_parent(to)?;
    fs::rename(from, to).map_err(|e| Error::io(from, e))
}

/// Remove a single file.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        }
        _ => Ok(()),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}

fn write_via_temp<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File, &Path) -> Result<()>,
{
    ensure_parent(path)?;

    // Same directory as the target, so the final rename stays on one filesystem
    let temp_path = temp_path_for(path);
    let result = fill_and_rename(path, &temp_path, fill);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn fill_and_rename<F>(path: &Path, temp_path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File, &Path) -> Result<()>,
{
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fill(&mut temp_file, temp_path)?;

    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fs::rename(temp_path, path).map_err(|e| Error::io(path, e))
}
