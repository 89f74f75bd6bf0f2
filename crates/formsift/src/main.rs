//! formsift CLI
//!
//! Filters form-submission documents from the command line.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use formsift_filter::FilterError;

mod args;
mod run;

use args::Cli;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Initialize logging (to stderr, so stdout is clean for the document)
    if let Err(err) = run::init_logging(args.log_level) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run::execute(args, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code(&err)
        }
    }
}

/// Bad filters are the caller's fault (2); everything else is ours (1).
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<FilterError>() {
        Some(FilterError::InvalidFilters(_)) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
