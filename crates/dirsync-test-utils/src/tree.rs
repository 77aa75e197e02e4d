//! [`TestTree`] builder for source/destination scenarios on real disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary source root and destination root, removed on drop.
///
/// # Example
///
/// ```rust,no_run
/// use dirsync_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write_source("my-file", "I am a very useful file");
/// dirsync_core::sync(tree.source(), tree.dest()).unwrap();
/// tree.assert_dest_file("my-file", "I am a very useful file");
/// ```
pub struct TestTree {
    source: TempDir,
    dest: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create two empty temporary directories.
    pub fn new() -> Self {
        Self {
            source: TempDir::new().unwrap(),
            dest: TempDir::new().unwrap(),
        }
    }

    /// Populate both roots from a fixture directory holding `source/` and `dest/`.
    ///
    /// # Panics
    /// Panics if the fixture cannot be read.
    pub fn from_fixture(fixture: &Path) -> Self {
        let tree = Self::new();
        for (rel, content) in read_tree(&fixture.join("source")) {
            tree.write_source(&rel, content);
        }
        for (rel, content) in read_tree(&fixture.join("dest")) {
            tree.write_dest(&rel, content);
        }
        tree
    }

    pub fn source(&self) -> &Path {
        self.source.path()
    }

    pub fn dest(&self) -> &Path {
        self.dest.path()
    }

    pub fn source_path(&self, rel: &str) -> PathBuf {
        self.source().join(rel)
    }

    pub fn dest_path(&self, rel: &str) -> PathBuf {
        self.dest().join(rel)
    }

    /// Write a file under the source root, creating parent directories.
    pub fn write_source(&self, rel: &str, content: impl AsRef<[u8]>) {
        write_file(&self.source_path(rel), content.as_ref());
    }

    /// Write a file under the destination root, creating parent directories.
    pub fn write_dest(&self, rel: &str, content: impl AsRef<[u8]>) {
        write_file(&self.dest_path(rel), content.as_ref());
    }

    /// Every file under the destination root, keyed by `/`-separated relative path.
    pub fn dest_contents(&self) -> BTreeMap<String, Vec<u8>> {
        read_tree(self.dest())
    }

    /// Every file under the source root, keyed by `/`-separated relative path.
    pub fn source_contents(&self) -> BTreeMap<String, Vec<u8>> {
        read_tree(self.source())
    }

    /// Assert that a destination file exists with the given text content.
    pub fn assert_dest_file(&self, rel: &str, expected: &str) {
        let path = self.dest_path(rel);
        let content = fs::read_to_string(&path).unwrap_or_else(|e| {
            panic!("expected {} to exist: {e}", path.display())
        });
        assert_eq!(content, expected, "content mismatch for {}", path.display());
    }

    /// Assert that a destination file does not exist.
    pub fn assert_dest_missing(&self, rel: &str) {
        let path = self.dest_path(rel);
        assert!(!path.exists(), "expected {} to be absent", path.display());
    }
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("failed to create {}: {e}", parent.display()));
    }
    fs::write(path, content).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}

fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut out = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let rel = path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                out.insert(rel, fs::read(&path).unwrap());
            }
        }
    }
    out
}
