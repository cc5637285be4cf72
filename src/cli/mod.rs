//! Command-line interface wiring for the `barcode-labels` binary.
//!
//! This module owns the clap definitions and delegates execution to the
//! submodule for each output kind.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod batch;
pub mod common;
pub mod single;
pub mod utils;

/// Parsed CLI entrypoint for the `barcode-labels` binary.
#[derive(Parser, Debug)]
#[command(
    name = "barcode-labels",
    version,
    about = "Generate Code 128 / Interleaved 2 of 5 barcode labels as PNG files or PDF sheets"
)]
pub struct Cli {
    /// Raise log verbosity (`-v` info, `-vv` debug). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one PNG image per code.
    Single(single::SingleArgs),
    /// Write all codes to one PDF sheet laid out in a 4-column grid.
    Batch(batch::BatchArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Single(args) => single::handle(args),
        Command::Batch(args) => batch::handle(args),
    }
}

/// Install the stderr log subscriber.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
