//! Per-code PNG output (`barcode-labels single ...`).

use anyhow::Result;
use barcode_labels::generate_single;
use clap::Args;

use crate::cli::common::{InputArgs, OutputArgs, SymbologyArg};
use crate::cli::utils::{print_report, read_codes};

/// Arguments for `barcode-labels single`.
#[derive(Args, Debug)]
pub struct SingleArgs {
    /// Code to render; several may be separated by newlines (falls back to stdin).
    pub code: Option<String>,
    #[command(flatten)]
    pub input: InputArgs,
    /// Barcode symbology.
    #[arg(long, short = 's', default_value_t = SymbologyArg::Code128, value_enum)]
    pub symbology: SymbologyArg,
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute `barcode-labels single`.
pub fn handle(args: SingleArgs) -> Result<()> {
    let text = read_codes(args.code, args.input)?;
    let report = generate_single(
        &text,
        args.symbology.into(),
        args.output.output_dir.as_deref(),
    )?;
    print_report(&report, args.output.json)
}
