//! Report rendering.

use std::io::Write;

use clap::ValueEnum;
use rethread_pipeline::{BatchReport, FileStatus};

use crate::AppError;

/// Report formats accepted by `--report`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One line per file followed by a summary.
    #[default]
    Human,
    /// The full report as pretty-printed JSON.
    Json,
}

pub(crate) fn render_report<W: Write>(
    report: &BatchReport,
    format: ReportFormat,
    out: &mut W,
) -> Result<(), AppError> {
    match format {
        ReportFormat::Human => render_human(report, out).map_err(AppError::WriteReport),
        ReportFormat::Json => {
            let json = report.to_json().map_err(AppError::SerialiseReport)?;
            writeln!(out, "{json}").map_err(AppError::WriteReport)
        }
    }
}

fn render_human<W: Write>(report: &BatchReport, out: &mut W) -> std::io::Result<()> {
    for outcome in report.outcomes() {
        let path = outcome.path().display();
        match outcome.status() {
            FileStatus::Rewritten => writeln!(out, "rewritten {path}")?,
            FileStatus::Planned => writeln!(out, "planned   {path}")?,
            FileStatus::Failed(failure) => writeln!(out, "failed    {path}: {failure}")?,
        }
    }
    let succeeded = report.rewritten().count();
    let failed = report.failures().count();
    let verb = if report.dry_run() {
        "planned"
    } else {
        "rewritten"
    };
    writeln!(out, "{succeeded} {verb}, {failed} failed")
}
