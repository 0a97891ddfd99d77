use std::process::ExitCode;

use clap::Parser;

use client::{Args, init_tracing, report_error, run_client};
use common::Phase;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run_client(args) {
        Ok(Phase::Failed(_)) => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
