//! Command-line runtime for `rethread`.
//!
//! `rethread [CONFIG FLAGS] [--manifest FILE] [--dry-run] [--report human|json] [PATH...]`
//!
//! Configuration flags must come first; they are handed to `ortho_config`
//! together with the configuration file and `RETHREAD_*` environment
//! variables. The remaining tokens select the files to transform. Exit status
//! is 0 when every file was transformed, 1 when any file failed, and 2 for
//! usage or configuration errors.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rethread_pipeline::BatchDriver;
use tracing::info;

mod config;
mod errors;
mod manifest;
mod output;
mod telemetry;

use config::{ConfigLoader, OrthoConfigLoader, command_arguments, split_config_arguments};
pub(crate) use errors::AppError;
pub use output::ReportFormat;

/// Command tokens that follow the configuration flags.
#[derive(Debug, Parser)]
#[command(
    name = "rethread",
    about = "Thread a parameter through two-tier constructor chains",
    version
)]
struct Cli {
    /// File listing one path per line; blank lines and `#` comments are skipped.
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,
    /// Run every stage but leave files on disk untouched.
    #[arg(long)]
    dry_run: bool,
    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    report: ReportFormat,
    /// Files to transform, after any manifest entries.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

impl Cli {
    fn input_paths(&self) -> Result<Vec<PathBuf>, AppError> {
        let mut paths = match &self.manifest {
            Some(manifest) => manifest::load_manifest(manifest)?,
            None => Vec::new(),
        };
        paths.extend(self.paths.iter().cloned());
        if paths.is_empty() {
            return Err(AppError::NoInputs);
        }
        Ok(paths)
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    match execute(&args, stdout, loader) {
        Ok(exit_code) => exit_code,
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            error.exit_code()
        }
    }
}

fn execute<W, L>(args: &[OsString], stdout: &mut W, loader: &L) -> Result<ExitCode, AppError>
where
    W: Write,
    L: ConfigLoader,
{
    let split = split_config_arguments(args);
    let cli = Cli::try_parse_from(command_arguments(args, &split)).map_err(AppError::CliUsage)?;
    let config = loader.load(&split.config_arguments)?;
    telemetry::initialise(&config)?;

    let plan = config::threading_plan(&config);
    plan.validate().map_err(AppError::InvalidPlan)?;
    let paths = cli.input_paths()?;
    info!(files = paths.len(), jobs = config.jobs(), dry_run = cli.dry_run, "starting batch");

    let report = BatchDriver::new(plan)
        .with_jobs(config.jobs())
        .with_dry_run(cli.dry_run)
        .run(&paths);
    output::render_report(&report, cli.report, stdout)?;

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
