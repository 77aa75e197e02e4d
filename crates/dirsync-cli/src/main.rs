//! dirsync CLI
//!
//! One-way, content-addressed directory synchronization from the command line.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use dirsync_core::SyncConfig;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    match cli.command {
        Some(cmd) => execute_command(cmd, config),
        None => {
            println!("{} content-addressed directory sync", "dirsync".green().bold());
            println!();
            println!("Run {} for available commands.", "dirsync --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr so `--json` output on stdout stays parseable.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects debug and the default is warn.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}

/// Config file values, overridden by command-line flags.
fn resolve_config(cli: &Cli) -> Result<SyncConfig> {
    let mut config = match &cli.config {
        Some(path) => SyncConfig::load(path)?,
        None => SyncConfig::default(),
    };
    if cli.parallel {
        config.parallel = true;
    }
    if let Some(block_size) = cli.block_size {
        config.block_size = block_size;
    }
    Ok(config)
}

fn execute_command(cmd: Commands, mut config: SyncConfig) -> Result<()> {
    match cmd {
        Commands::Sync {
            source,
            dest,
            dry_run,
            json,
        } => {
            config.dry_run |= dry_run;
            commands::run_sync(&source, &dest, config, json)
        }
        Commands::Diff { source, dest, json } => commands::run_diff(&source, &dest, config, json),
        Commands::Snapshot { dir, json } => commands::run_snapshot(&dir, config, json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "dirsync", &mut std::io::stdout());
            Ok(())
        }
    }
}
