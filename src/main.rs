use std::process::ExitCode;

use barcode_labels::LabelError;
use clap::Parser;
use tracing::error;

mod cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    cli::init_tracing(cli.verbose);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            match err.downcast_ref::<LabelError>() {
                Some(label_err) => eprintln!("{}", label_err.user_message()),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
