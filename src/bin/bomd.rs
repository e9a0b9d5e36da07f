//! Command-line entry point: read the input file from stdin, stream the
//! trajectory report to stdout.

use std::error::Error;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    match bomd::driver::run(stdin.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!();
            println!("Trajectory aborted with an error:");
            println!("  {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                println!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
