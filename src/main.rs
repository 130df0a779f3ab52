//! cfpb-complaints command-line entry point.

use std::process::ExitCode;

use clap::Parser;

use cfpb_complaints::cli::{Cli, execute};
use cfpb_complaints::logging::init_tracing;

#[allow(clippy::print_stdout, clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
