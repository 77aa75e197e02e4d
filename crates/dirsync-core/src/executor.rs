//! Action execution
//!
//! The executor is the imperative shell around [`diff`](crate::diff): it
//! interprets nothing, it just dispatches each action to the matching
//! capability in order and stops at the first failure.
//!
//! Each capability is its own trait so tests can swap any of them for a fake.

use std::path::Path;

use dirsync_fs::Snapshot;

use crate::{Action, Error, Result, SyncReport, diff};

/// Copies file content to a new destination path.
pub trait CopyFile {
    fn copy_file(&self, source: &Path, dest: &Path) -> dirsync_fs::Result<()>;
}

/// Renames a file within the destination tree.
pub trait MoveFile {
    fn move_file(&self, from: &Path, to: &Path) -> dirsync_fs::Result<()>;
}

/// Removes a file from the destination tree.
pub trait RemoveFile {
    fn remove_file(&self, path: &Path) -> dirsync_fs::Result<()>;
}

/// Capabilities backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl CopyFile for LocalFileSystem {
    fn copy_file(&self, source: &Path, dest: &Path) -> dirsync_fs::Result<()> {
        dirsync_fs::io::copy_atomic(source, dest)
    }
}

impl MoveFile for LocalFileSystem {
    fn move_file(&self, from: &Path, to: &Path) -> dirsync_fs::Result<()> {
        dirsync_fs::io::move_file(from, to)
    }
}

impl RemoveFile for LocalFileSystem {
    fn remove_file(&self, path: &Path) -> dirsync_fs::Result<()> {
        dirsync_fs::io::remove_file(path)
    }
}

/// Apply `actions` in order.
///
/// # Errors
///
/// Returns [`Error::Apply`] for the first action that fails. Actions before it
/// stay applied and actions after it are not attempted.
pub fn apply<I, C, M, R>(actions: I, copier: &C, mover: &M, remover: &R) -> Result<SyncReport>
where
    I: IntoIterator<Item = Action>,
    C: CopyFile + ?Sized,
    M: MoveFile + ?Sized,
    R: RemoveFile + ?Sized,
{
    let mut report = SyncReport::applied();
    for action in actions {
        tracing::debug!(%action, "applying");
        let outcome = match &action {
            Action::Copy { source, dest } => copier.copy_file(source, dest),
            Action::Move { from, to } => mover.move_file(from, to),
            Action::Delete { path } => remover.remove_file(path),
        };
        if let Err(source) = outcome {
            tracing::warn!(
                %action,
                applied = report.len(),
                "action failed, leaving destination partially synced"
            );
            return Err(Error::Apply { action, source });
        }
        report.push(action);
    }
    Ok(report)
}

/// Synchronise `dest_root` with `source_root` using injected dependencies.
///
/// `reader` produces the snapshot for a root; the three capabilities perform
/// the resulting actions. Nothing here touches the filesystem directly.
pub fn synchronise<F, C, M, R>(
    mut reader: F,
    copier: &C,
    mover: &M,
    remover: &R,
    source_root: &Path,
    dest_root: &Path,
) -> Result<SyncReport>
where
    F: FnMut(&Path) -> dirsync_fs::Result<Snapshot>,
    C: CopyFile + ?Sized,
    M: MoveFile + ?Sized,
    R: RemoveFile + ?Sized,
{
    let source = reader(source_root)?;
    let dest = reader(dest_root)?;
    tracing::debug!(
        source = %source_root.display(),
        dest = %dest_root.display(),
        source_entries = source.len(),
        dest_entries = dest.len(),
        "snapshots taken"
    );

    let report = apply(
        diff(&source, &dest, source_root, dest_root),
        copier,
        mover,
        remover,
    )?;

    tracing::info!(
        source = %source_root.display(),
        dest = %dest_root.display(),
        copied = report.copied(),
        moved = report.moved(),
        deleted = report.deleted(),
        "sync complete"
    );
    Ok(report)
}

/// Make `dest` hold the same file contents as `source`, on the real filesystem.
///
/// # Errors
///
/// Fails on the first unreadable file while snapshotting (before anything is
/// changed), or on the first action that cannot be applied.
pub fn sync(source: &Path, dest: &Path) -> Result<SyncReport> {
    let fs = LocalFileSystem;
    synchronise(dirsync_fs::snapshot, &fs, &fs, &fs, source, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Records each call as the action it represents.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<Action>>,
        fail_on: Option<PathBuf>,
    }

    impl Recorder {
        fn failing_on(path: &str) -> Self {
            Self {
                fail_on: Some(PathBuf::from(path)),
                ..Self::default()
            }
        }

        fn record(&self, action: Action) -> dirsync_fs::Result<()> {
            if self.fail_on.as_deref() == Some(action.target()) {
                return Err(dirsync_fs::Error::io(
                    action.target(),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ));
            }
            self.calls.borrow_mut().push(action);
            Ok(())
        }

        fn calls(&self) -> Vec<Action> {
            self.calls.borrow().clone()
        }
    }

    impl CopyFile for Recorder {
        fn copy_file(&self, source: &Path, dest: &Path) -> dirsync_fs::Result<()> {
            self.record(Action::copy(source, dest))
        }
    }

    impl MoveFile for Recorder {
        fn move_file(&self, from: &Path, to: &Path) -> dirsync_fs::Result<()> {
            self.record(Action::moved(from, to))
        }
    }

    impl RemoveFile for Recorder {
        fn remove_file(&self, path: &Path) -> dirsync_fs::Result<()> {
            self.record(Action::delete(path))
        }
    }

    fn snap(entries: &[(&str, &str)]) -> Snapshot {
        entries.iter().copied().collect()
    }

    /// Hands out each root's snapshot once, like popping from a map.
    fn reader(
        trees: Vec<(&str, Snapshot)>,
    ) -> impl FnMut(&Path) -> dirsync_fs::Result<Snapshot> + use<> {
        let mut trees: HashMap<PathBuf, Snapshot> = trees
            .into_iter()
            .map(|(root, snapshot)| (PathBuf::from(root), snapshot))
            .collect();
        move |root: &Path| Ok(trees.remove(root).unwrap_or_default())
    }

    #[test]
    fn synchronise_copies_new_file() {
        let fs = Recorder::default();
        let read = reader(vec![
            ("/source", snap(&[("sha1", "my-file")])),
            ("/dest", Snapshot::new()),
        ]);

        synchronise(read, &fs, &fs, &fs, Path::new("/source"), Path::new("/dest")).unwrap();

        assert_eq!(fs.calls(), vec![Action::copy("/source/my-file", "/dest/my-file")]);
    }

    #[test]
    fn synchronise_deletes_removed_file() {
        let fs = Recorder::default();
        let read = reader(vec![
            ("/source", Snapshot::new()),
            ("/dest", snap(&[("sha1", "my-file")])),
        ]);

        synchronise(read, &fs, &fs, &fs, Path::new("/source"), Path::new("/dest")).unwrap();

        assert_eq!(fs.calls(), vec![Action::delete("/dest/my-file")]);
    }

    #[test]
    fn synchronise_moves_renamed_file() {
        let fs = Recorder::default();
        let read = reader(vec![
            ("/source", snap(&[("sha1", "my-file"), ("sha2", "my-file2")])),
            ("/dest", snap(&[("sha1", "my-file"), ("sha2", "my-file3")])),
        ]);

        synchronise(read, &fs, &fs, &fs, Path::new("/source"), Path::new("/dest")).unwrap();

        assert_eq!(fs.calls(), vec![Action::moved("/dest/my-file3", "/dest/my-file2")]);
    }

    #[test]
    fn delete_capability_can_be_a_separate_object() {
        let copies = Recorder::default();
        let removals = Recorder::default();
        let read = reader(vec![
            ("/source", snap(&[("sha1", "keep"), ("sha3", "new")])),
            ("/dest", snap(&[("sha1", "keep"), ("sha2", "gone")])),
        ]);

        synchronise(
            read,
            &copies,
            &copies,
            &removals,
            Path::new("/source"),
            Path::new("/dest"),
        )
        .unwrap();

        assert_eq!(copies.calls(), vec![Action::copy("/source/new", "/dest/new")]);
        assert_eq!(removals.calls(), vec![Action::delete("/dest/gone")]);
    }

    #[test]
    fn apply_stops_at_first_failure() {
        let fs = Recorder::failing_on("/d/b");
        let actions = vec![
            Action::copy("/s/a", "/d/a"),
            Action::copy("/s/b", "/d/b"),
            Action::delete("/d/c"),
        ];

        let err = apply(actions, &fs, &fs, &fs).unwrap_err();

        assert_eq!(err.failed_action(), Some(&Action::copy("/s/b", "/d/b")));
        assert_eq!(fs.calls(), vec![Action::copy("/s/a", "/d/a")]);
    }

    #[test]
    fn reader_failure_aborts_before_any_action() {
        let fs = Recorder::default();
        let read = |root: &Path| -> dirsync_fs::Result<Snapshot> {
            Err(dirsync_fs::Error::NotADirectory {
                path: root.to_path_buf(),
            })
        };

        let err = synchronise(read, &fs, &fs, &fs, Path::new("/s"), Path::new("/d")).unwrap_err();

        assert!(matches!(err, Error::Fs(dirsync_fs::Error::NotADirectory { .. })));
        assert!(fs.calls().is_empty());
    }

    #[test]
    fn apply_reports_every_action_in_order() {
        let fs = Recorder::default();
        let actions = vec![Action::moved("/d/x", "/d/y"), Action::delete("/d/z")];

        let report = apply(actions.clone(), &fs, &fs, &fs).unwrap();

        assert_eq!(report.actions(), actions.as_slice());
        assert_eq!((report.moved(), report.deleted()), (1, 1));
    }
}
