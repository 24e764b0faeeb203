//! CLI entrypoint for the `rethread` constructor threading tool.
//!
//! The binary delegates to [`rethread_cli::run`], which loads configuration,
//! initialises telemetry, runs the batch, and renders the report.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    rethread_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
