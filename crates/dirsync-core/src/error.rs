//! Error types for dirsync-core

use crate::Action;

/// Result type for dirsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dirsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Snapshotting, config loading or another filesystem-layer failure
    #[error(transparent)]
    Fs(#[from] dirsync_fs::Error),

    /// An action failed; earlier actions in the same run stay applied
    #[error("Failed to apply {action}: {source}")]
    Apply {
        action: Action,
        #[source]
        source: dirsync_fs::Error,
    },
}

impl Error {
    /// The action that failed, if the error came from the executor.
    pub fn failed_action(&self) -> Option<&Action> {
        match self {
            Self::Apply { action, .. } => Some(action),
            Self::Fs(_) => None,
        }
    }
}
