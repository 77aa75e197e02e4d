//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// dirsync - Make a destination directory hold exactly the files of a source
#[derive(Parser, Debug)]
#[command(name = "dirsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load settings from a .toml, .json or .yaml file
    #[arg(short, long, global = true, env = "DIRSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hash files in parallel
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Bytes read per block while hashing
    #[arg(long, global = true)]
    pub block_size: Option<usize>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize DEST so it holds the same file contents as SOURCE
    ///
    /// Files are matched by content hash, so renamed files are moved
    /// rather than copied again.
    ///
    /// Examples:
    ///   dirsync sync ./photos /mnt/backup/photos
    ///   dirsync sync ./photos /mnt/backup/photos --dry-run
    Sync {
        /// Directory to read from
        source: PathBuf,

        /// Directory to bring in line with SOURCE
        dest: PathBuf,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Preview the actions sync would apply
    Diff {
        /// Directory to read from
        source: PathBuf,

        /// Directory to compare against SOURCE
        dest: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the content digest of every file under a directory
    Snapshot {
        /// Directory to hash
        dir: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
