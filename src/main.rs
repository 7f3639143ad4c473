use std::process::ExitCode;

use clap::Parser;
use dealership_ledger::{app, config::Config, observability};

fn main() -> ExitCode {
    observability::init();
    let config = Config::parse();

    match app::run(config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
