//! Filesystem actions produced by the differ

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One unit of work needed to bring the destination in line with the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Content is missing from the destination entirely.
    Copy { source: PathBuf, dest: PathBuf },
    /// Content already exists in the destination under a stale name.
    Move { from: PathBuf, to: PathBuf },
    /// Destination holds content the source no longer has.
    Delete { path: PathBuf },
}

/// Discriminant of an [`Action`], used for counting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Copy,
    Move,
    Delete,
}

impl Action {
    pub fn copy(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self::Copy {
            source: source.into(),
            dest: dest.into(),
        }
    }

    pub fn moved(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self::Move {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn delete(path: impl Into<PathBuf>) -> Self {
        Self::Delete { path: path.into() }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Copy { .. } => ActionKind::Copy,
            Self::Move { .. } => ActionKind::Move,
            Self::Delete { .. } => ActionKind::Delete,
        }
    }

    /// The destination path this action writes or removes.
    pub fn target(&self) -> &Path {
        match self {
            Self::Copy { dest, .. } => dest,
            Self::Move { to, .. } => to,
            Self::Delete { path } => path,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Copy => "COPY",
            Self::Move => "MOVE",
            Self::Delete => "DELETE",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy { source, dest } => {
                write!(f, "COPY {} -> {}", source.display(), dest.display())
            }
            Self::Move { from, to } => write!(f, "MOVE {} -> {}", from.display(), to.display()),
            Self::Delete { path } => write!(f, "DELETE {}", path.display()),
        }
    }
}
