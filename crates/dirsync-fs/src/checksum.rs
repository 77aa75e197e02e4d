//! SHA-256 content digests
//!
//! Every digest uses the canonical format `sha256:<hex>`. Files are hashed in
//! fixed-size blocks so arbitrarily large files never sit in memory whole.

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::{Error, Result};

/// Prefix for all digests produced by this module
const PREFIX: &str = "sha256:";

/// Block size used when reading files for hashing (64 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Identity of a file's content, independent of its name or location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Wrap an existing digest string.
    ///
    /// No format validation is done, which lets tests build snapshots from
    /// short placeholder digests.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Digest {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Digest {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Compute the digest of in-memory content.
pub fn compute_content_checksum(content: impl AsRef<[u8]>) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(content.as_ref());
    Digest(format!("{}{:x}", PREFIX, hasher.finalize()))
}

/// Compute the digest of everything readable from `reader`, one block at a time.
pub fn hash_reader<R: Read>(mut reader: R, block_size: usize) -> std::io::Result<Digest> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; block_size];
    loop {
        let read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..read]);
    }
    Ok(Digest(format!("{}{:x}", PREFIX, hasher.finalize())))
}

/// Compute the digest of a file's contents using [`DEFAULT_BLOCK_SIZE`] reads.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn hash_file(path: &Path) -> Result<Digest> {
    hash_file_with_block_size(path, DEFAULT_BLOCK_SIZE)
}

/// Compute the digest of a file's contents, reading `block_size` bytes at a time.
///
/// # Errors
///
/// Returns [`Error::InvalidBlockSize`] for a zero block size, or an I/O error
/// if the file cannot be opened or read.
pub fn hash_file_with_block_size(path: &Path, block_size: usize) -> Result<Digest> {
    if block_size == 0 {
        return Err(Error::InvalidBlockSize);
    }
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let digest = hash_reader(file, block_size).map_err(|e| Error::io(path, e))?;
    tracing::trace!(path = %path.display(), %digest, "hashed file");
    Ok(digest)
}
