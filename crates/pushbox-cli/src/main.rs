//! pushbox
//!
//! Drives the evaluation engine from JSON files:
//! - `levels` prints the level catalog
//! - `check` classifies one snapshot
//! - `evaluate` scores a batch of episodes and prints running metrics
//! - `hash` prints the fingerprint of an action list

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod command;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    mode: command::Mode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("pushbox {}", env!("CARGO_PKG_VERSION"));
    command::run(cli.mode)
}
