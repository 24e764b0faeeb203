//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use rethread_pipeline::PipelineError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Exit status for usage and configuration errors.
const USAGE_EXIT: u8 = 2;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("invalid threading plan: {0}")]
    InvalidPlan(PipelineError),
    #[error("failed to read manifest {path}: {source}")]
    ReadManifest { path: PathBuf, source: io::Error },
    #[error("no input files: pass PATH arguments or --manifest")]
    NoInputs,
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to serialise report: {0}")]
    SerialiseReport(serde_json::Error),
    #[error("failed to write report: {0}")]
    WriteReport(io::Error),
}

impl AppError {
    /// Maps the error onto the process exit status.
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::SerialiseReport(_) | Self::WriteReport(_) => ExitCode::FAILURE,
            Self::LoadConfiguration(_)
            | Self::CliUsage(_)
            | Self::InvalidPlan(_)
            | Self::ReadManifest { .. }
            | Self::NoInputs
            | Self::Telemetry(_) => ExitCode::from(USAGE_EXIT),
        }
    }
}
