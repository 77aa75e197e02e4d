//! Filesystem layer for dirsync
//!
//! Provides content hashing, directory snapshots keyed by content digest,
//! and the safe I/O primitives the executor drives.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod snapshot;

pub use checksum::{
    DEFAULT_BLOCK_SIZE, Digest, compute_content_checksum, hash_file, hash_file_with_block_size,
};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use snapshot::{Snapshot, SnapshotOptions, Snapshotter, snapshot};
