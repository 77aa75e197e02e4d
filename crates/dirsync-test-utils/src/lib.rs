//! Shared test utilities for the dirsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fakes`]: in-memory stand-ins for the executor's capabilities
//! - [`tree`]: [`TestTree`] pair of real temporary source/destination roots

pub mod fakes;
pub mod tree;

pub use fakes::{MemoryFs, RecordingFs};
pub use tree::TestTree;
