//! Command implementations for dirsync-cli

pub mod diff;
pub mod snapshot;
pub mod sync;

pub use diff::run_diff;
pub use snapshot::run_snapshot;
pub use sync::run_sync;
