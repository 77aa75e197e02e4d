//! Snapshot command implementation

use std::path::Path;

use colored::Colorize;
use dirsync_core::{SyncConfig, SyncEngine};

use crate::error::Result;

/// Run the snapshot command
///
/// Prints one `digest  filename` line per distinct content under `dir`.
pub fn run_snapshot(dir: &Path, config: SyncConfig, json: bool) -> Result<()> {
    let snapshot = SyncEngine::new(config).snapshot(dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if snapshot.is_empty() {
        println!("{} No files under {}", "EMPTY".yellow().bold(), dir.display());
        return Ok(());
    }
    for (digest, filename) in snapshot.iter() {
        println!("{}  {}", digest.as_str().dimmed(), filename);
    }
    Ok(())
}
