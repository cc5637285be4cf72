//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use barcode_labels::Symbology;
use clap::{Args, ValueEnum};

/// Symbology flag accepted by both commands.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SymbologyArg {
    #[value(name = "code128", alias = "CODE_128")]
    Code128,
    #[value(name = "interleaved2of5", alias = "INTERLEAVED_2_OF_5", alias = "itf")]
    Interleaved2of5,
}

impl From<SymbologyArg> for Symbology {
    fn from(value: SymbologyArg) -> Symbology {
        match value {
            SymbologyArg::Code128 => Symbology::Code128,
            SymbologyArg::Interleaved2of5 => Symbology::Interleaved2of5,
        }
    }
}

/// Where input text comes from when it is not given inline.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Read codes from file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Treat any non-digit character as a line break instead of rejecting it.
    #[arg(long)]
    pub lenient: bool,
}

/// Destination and report format.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Directory the generated files are written to.
    #[arg(short = 'o', long = "output-dir", env = "BARCODE_LABELS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
    /// Print a JSON report instead of the confirmation message.
    #[arg(long)]
    pub json: bool,
}
