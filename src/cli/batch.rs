//! PDF sheet output (`barcode-labels batch ...`).

use anyhow::Result;
use barcode_labels::generate_batch;
use clap::Args;

use crate::cli::common::{InputArgs, OutputArgs, SymbologyArg};
use crate::cli::utils::{print_report, read_codes};

/// Arguments for `barcode-labels batch`.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Newline-separated codes (falls back to `--from` or stdin).
    #[arg(long)]
    pub text: Option<String>,
    #[command(flatten)]
    pub input: InputArgs,
    /// Barcode symbology.
    #[arg(long, short = 's', default_value_t = SymbologyArg::Code128, value_enum)]
    pub symbology: SymbologyArg,
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute `barcode-labels batch`.
pub fn handle(args: BatchArgs) -> Result<()> {
    let text = read_codes(args.text, args.input)?;
    let report = generate_batch(
        &text,
        args.symbology.into(),
        args.output.output_dir.as_deref(),
    )?;
    print_report(&report, args.output.json)
}
