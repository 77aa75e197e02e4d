//! Cross-crate sync scenarios driven from the fixtures in `test-fixtures/trees`.
//!
//! Each fixture holds a `source/` and `dest/` tree; tests copy them into
//! temporary directories before syncing.

use std::path::{Path, PathBuf};

use dirsync_core::{Action, SyncConfig, SyncEngine, sync, synchronise};
use dirsync_test_utils::{MemoryFs, RecordingFs, TestTree};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/trees")
        .join(name)
}

#[rstest]
#[case::rename_and_prune("rename-and-prune")]
#[case::in_sync("in-sync")]
fn sync_makes_dest_match_source(#[case] name: &str) {
    let tree = TestTree::from_fixture(&fixture(name));

    sync(tree.source(), tree.dest()).unwrap();

    assert_eq!(tree.dest_contents(), tree.source_contents());
}

#[test]
fn rename_and_prune_plan() {
    let tree = TestTree::from_fixture(&fixture("rename-and-prune"));
    let recorder = RecordingFs::new();

    synchronise(
        dirsync_fs::snapshot,
        &recorder,
        &recorder,
        &recorder,
        tree.source(),
        tree.dest(),
    )
    .unwrap();

    let mut calls = recorder.calls();
    assert_eq!(
        calls[0],
        Action::moved(tree.dest_path("report-draft.txt"), tree.dest_path("report-final.txt"))
    );
    // Copies follow digest order; compare the rest as a set
    let first_delete = calls
        .iter()
        .position(|a| matches!(a, Action::Delete { .. }))
        .expect("scratch file should be deleted");
    assert!(calls[first_delete..]
        .iter()
        .all(|a| matches!(a, Action::Delete { .. })));
    calls.sort_by_key(|a| a.to_string());

    let mut expected = vec![
        Action::copy(tree.source_path("logo.svg"), tree.dest_path("logo.svg")),
        Action::copy(tree.source_path("notes.md"), tree.dest_path("notes.md")),
        Action::moved(tree.dest_path("report-draft.txt"), tree.dest_path("report-final.txt")),
        Action::delete(tree.dest_path("scratch.tmp.txt")),
    ];
    expected.sort_by_key(|a| a.to_string());
    assert_eq!(calls, expected);
}

#[test]
fn in_sync_fixture_needs_no_actions() {
    let tree = TestTree::from_fixture(&fixture("in-sync"));

    let plan = SyncEngine::default().plan(tree.source(), tree.dest()).unwrap();

    assert!(plan.is_empty(), "unexpected plan: {plan:?}");
}

#[rstest]
#[case::sequential(false)]
#[case::parallel(true)]
fn second_run_is_a_no_op(#[case] parallel: bool) {
    let tree = TestTree::from_fixture(&fixture("rename-and-prune"));
    let engine = SyncEngine::new(SyncConfig {
        parallel,
        ..SyncConfig::default()
    });

    let first = engine.sync(tree.source(), tree.dest()).unwrap();
    let second = engine.sync(tree.source(), tree.dest()).unwrap();

    assert!(!first.is_empty());
    assert!(second.is_empty(), "second run applied {:?}", second.actions());
}

#[test]
fn memory_and_disk_agree_on_the_plan() {
    let tree = TestTree::from_fixture(&fixture("rename-and-prune"));
    let memory = MemoryFs::new();
    for (rel, content) in tree.source_contents() {
        memory.write(Path::new("/source").join(rel), content);
    }
    for (rel, content) in tree.dest_contents() {
        memory.write(Path::new("/dest").join(rel), content);
    }

    let disk_plan = SyncEngine::default().plan(tree.source(), tree.dest()).unwrap();
    let memory_report = synchronise(
        |root: &Path| memory.snapshot(root),
        &memory,
        &memory,
        &memory,
        Path::new("/source"),
        Path::new("/dest"),
    )
    .unwrap();

    let strip = |actions: &[Action], src: &Path, dst: &Path| -> Vec<String> {
        actions
            .iter()
            .map(|a| {
                a.to_string()
                    .replace(&*src.to_string_lossy(), "<src>")
                    .replace(&*dst.to_string_lossy(), "<dst>")
            })
            .collect()
    };
    assert_eq!(
        strip(memory_report.actions(), Path::new("/source"), Path::new("/dest")),
        strip(&disk_plan, tree.source(), tree.dest())
    );
    assert_eq!(
        memory.files_under(Path::new("/dest")),
        memory.files_under(Path::new("/source"))
    );
}
