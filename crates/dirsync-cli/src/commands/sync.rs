//! Sync command implementation

use std::path::Path;

use colored::Colorize;
use dirsync_core::{Action, SyncConfig, SyncEngine};

use crate::error::{CliError, Result};

/// Refuse to sync a directory onto itself or into its own subtree.
///
/// Both roots must exist; the error from canonicalizing a missing root is
/// returned as-is.
pub fn check_roots(source: &Path, dest: &Path) -> Result<()> {
    let source_abs =
        dunce::canonicalize(source).map_err(|e| dirsync_fs::Error::io(source, e))?;
    let dest_abs = dunce::canonicalize(dest).map_err(|e| dirsync_fs::Error::io(dest, e))?;

    if source_abs == dest_abs {
        return Err(CliError::user(format!(
            "Source and destination are the same directory: {}",
            source_abs.display()
        )));
    }
    if dest_abs.starts_with(&source_abs) || source_abs.starts_with(&dest_abs) {
        return Err(CliError::user(format!(
            "Source and destination must not contain each other: {} and {}",
            source_abs.display(),
            dest_abs.display()
        )));
    }
    Ok(())
}

/// Run the sync command
pub fn run_sync(source: &Path, dest: &Path, config: SyncConfig, json: bool) -> Result<()> {
    check_roots(source, dest)?;
    let engine = SyncEngine::new(config);

    if !json {
        println!(
            "{} Synchronizing {} -> {}...",
            "=>".blue().bold(),
            source.display(),
            dest.display()
        );
    }

    let report = engine.sync(source, dest)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("{} Already synchronized. No changes needed.", "OK".green().bold());
        return Ok(());
    }

    if report.dry_run {
        println!("{} Dry run, would apply:", "PLAN".yellow().bold());
    } else {
        println!("{} Synchronization complete:", "OK".green().bold());
    }
    print_actions(report.actions());
    println!(
        "   {} copied, {} moved, {} deleted",
        report.copied(),
        report.moved(),
        report.deleted()
    );

    Ok(())
}

/// Print one line per action with a kind-specific marker.
pub fn print_actions(actions: &[Action]) {
    for action in actions {
        let marker = match action {
            Action::Copy { .. } => "+".green(),
            Action::Move { .. } => "~".yellow(),
            Action::Delete { .. } => "-".red(),
        };
        println!("   {} {}", marker, action);
    }
}
