// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mj - message journal operator CLI

mod commands;
mod error;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{append, commit, read, status};
use mj_core::{JournalConfig, RawJournalConfig};
use mj_journal::Journal;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::error::MjError;

#[derive(Parser)]
#[command(name = "mj", version, about = "Durable message journal with commit tracking")]
struct Cli {
    /// Storage directory (overrides MJ_DIR and the config file)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append an entry (or stdin lines as one batch)
    Append(append::AppendArgs),
    /// Print entries after the committed offset
    Read(read::ReadArgs),
    /// Mark an offset as processed
    Commit(commit::CommitArgs),
    /// Show journal positions
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", MjError::from_anyhow(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let dir_flag = cli
        .dir
        .or_else(|| std::env::var_os("MJ_DIR").map(PathBuf::from));
    let config = resolve_config(dir_flag, cli.config, default_dir)?;
    tracing::debug!(dir = %config.dir.display(), "opening journal");
    let journal = Journal::open(config)?;

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Append(args) => {
            append::handle(&journal, args, std::io::stdin().lock(), &mut stdout)
        }
        Commands::Read(args) => read::handle(&journal, args, &mut stdout),
        Commands::Commit(args) => commit::handle(&journal, args, &mut stdout),
        Commands::Status => status::handle(&journal, &mut stdout),
    };

    journal.stop().await;
    result
}

/// Resolve the journal config: `dir` beats the config file's `dir`, which
/// beats `fallback_dir`.
fn resolve_config(
    dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    fallback_dir: impl FnOnce() -> Result<PathBuf>,
) -> Result<JournalConfig> {
    let mut raw = match config_path {
        Some(path) => RawJournalConfig::load(&path)?,
        None => RawJournalConfig::default(),
    };
    raw.dir = match dir.or(raw.dir) {
        Some(dir) => Some(dir),
        None => Some(fallback_dir()?),
    };
    Ok(raw.resolve(None)?)
}

/// `<XDG state dir>/mj/journal`, or `~/.local/state/mj/journal`
fn default_dir() -> Result<PathBuf> {
    let base = dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/state")))
        .context("cannot determine a state directory; pass --dir or set MJ_DIR")?;
    Ok(base.join("mj").join("journal"))
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
