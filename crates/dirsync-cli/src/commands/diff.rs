//! Diff command implementation
//!
//! Previews what sync would do without touching the destination.

use std::path::Path;

use colored::Colorize;
use dirsync_core::{ActionKind, SyncConfig, SyncEngine};
use serde_json::json;

use super::sync::{check_roots, print_actions};
use crate::error::Result;

/// Run the diff command
pub fn run_diff(source: &Path, dest: &Path, config: SyncConfig, json: bool) -> Result<()> {
    check_roots(source, dest)?;
    let actions = SyncEngine::new(config).plan(source, dest)?;

    if json {
        let count = |kind: ActionKind| actions.iter().filter(|a| a.kind() == kind).count();
        let output = json!({
            "has_changes": !actions.is_empty(),
            "copy": count(ActionKind::Copy),
            "move": count(ActionKind::Move),
            "delete": count(ActionKind::Delete),
            "actions": actions,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if actions.is_empty() {
        println!(
            "{} No changes needed. Destination is in sync.",
            "OK".green().bold()
        );
    } else {
        println!("{} {} pending action(s):", "DIFF".yellow().bold(), actions.len());
        print_actions(&actions);
    }

    Ok(())
}
