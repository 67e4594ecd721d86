//! dup - duplicate file finder.
//!
//! Entry point for the dup CLI application.

use clap::error::ErrorKind;
use clap::Parser;
use dup::{
    cli::Cli,
    error::{exit_code_for, ExitCode},
};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help / --version print and exit 0; anything else is bad input
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::InvalidArguments,
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    match dup::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = exit_code_for(&err);
            eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            std::process::exit(exit_code.as_i32());
        }
    }
}
