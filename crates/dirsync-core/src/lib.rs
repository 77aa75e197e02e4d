//! Core synchronization logic for dirsync
//!
//! Split into a functional core and an imperative shell:
//!
//! - **diff**: pure function turning two [`Snapshot`]s into an ordered stream
//!   of [`Action`]s, with no I/O
//! - **executor**: applies actions through injected capabilities
//!   ([`CopyFile`], [`MoveFile`], [`RemoveFile`]) so the decision logic can be
//!   exercised without a real filesystem
//! - **engine**: [`SyncEngine`] wires configuration, snapshotting and
//!   execution together, including dry runs
//!
//! ```text
//!            dirsync-cli
//!                 |
//!           dirsync-core   (diff, executor, engine)
//!                 |
//!            dirsync-fs    (hash, snapshot, io, config store)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! fn mirror() -> dirsync_core::Result<()> {
//!     let report = dirsync_core::sync(Path::new("photos"), Path::new("/mnt/backup/photos"))?;
//!     println!("{} actions applied", report.len());
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod executor;
pub mod report;

pub use action::{Action, ActionKind};
pub use config::SyncConfig;
pub use diff::diff;
pub use engine::SyncEngine;
pub use error::{Error, Result};
pub use executor::{CopyFile, LocalFileSystem, MoveFile, RemoveFile, apply, sync, synchronise};
pub use report::SyncReport;

pub use dirsync_fs::{Digest, Snapshot, SnapshotOptions, Snapshotter};
