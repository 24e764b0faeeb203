//! Per-file outcomes and the aggregate batch report.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use strum::Display;
use thiserror::Error;

use crate::error::PipelineError;
use crate::stage::Stage;

/// Classification of a file-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A stage found no construct of the expected shape.
    PatternNotFound,
    /// A match lacked a capture its stage relies on.
    CaptureMissing,
    /// The input file contains syntax errors.
    ParseFailure,
    /// A strict filter met a parameter or argument it cannot forward.
    UnsupportedArgumentShape,
    /// A stage produced text that no longer parses.
    BrokenOutput,
    /// The file extension maps to no supported grammar.
    UnsupportedLanguage,
    /// Reading or writing the file failed.
    Io,
    /// The plan could not be turned into patterns.
    InvalidPlan,
    /// The engine rejected its own edit or could not build a parser.
    Engine,
}

/// Why one file was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct FileFailure {
    kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<Stage>,
    message: String,
}

impl FileFailure {
    /// Creates a failure with no stage attribution.
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            stage: None,
            message: message.into(),
        }
    }

    pub(crate) fn io(error: &io::Error) -> Self {
        Self::new(FailureKind::Io, error.to_string())
    }

    /// The failure classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The pipeline stage that failed, if the failure happened inside one.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Human-readable detail.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&PipelineError> for FileFailure {
    fn from(error: &PipelineError) -> Self {
        let kind = match error {
            PipelineError::MalformedInput { .. } => FailureKind::ParseFailure,
            PipelineError::PatternNotFound { .. } => FailureKind::PatternNotFound,
            PipelineError::CaptureMissing { .. } => FailureKind::CaptureMissing,
            PipelineError::UnsupportedArgumentShape { .. } => {
                FailureKind::UnsupportedArgumentShape
            }
            PipelineError::BrokenOutput { .. } => FailureKind::BrokenOutput,
            PipelineError::InvalidPlan { .. } => FailureKind::InvalidPlan,
            PipelineError::Syntax(_) => FailureKind::Engine,
        };
        Self {
            kind,
            stage: error.stage(),
            message: error.to_string(),
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// All stages succeeded and the file was replaced.
    Rewritten,
    /// All stages succeeded; the file was left alone because of a dry run.
    Planned,
    /// The file was left byte-for-byte unchanged.
    Failed(FileFailure),
}

/// Outcome for one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    path: PathBuf,
    #[serde(flatten)]
    status: FileStatus,
}

impl FileOutcome {
    pub(crate) const fn new(path: PathBuf, status: FileStatus) -> Self {
        Self { path, status }
    }

    /// The manifest entry.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// What happened to the file.
    #[must_use]
    pub const fn status(&self) -> &FileStatus {
        &self.status
    }

    /// The failure, if the file was not transformed.
    #[must_use]
    pub const fn failure(&self) -> Option<&FileFailure> {
        match &self.status {
            FileStatus::Failed(failure) => Some(failure),
            FileStatus::Rewritten | FileStatus::Planned => None,
        }
    }
}

/// Outcomes for a whole manifest, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    dry_run: bool,
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub(crate) const fn new(dry_run: bool, outcomes: Vec<FileOutcome>) -> Self {
        Self { dry_run, outcomes }
    }

    /// Whether the batch ran without writing.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Every outcome, in manifest order.
    #[must_use]
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Outcomes of files that were not transformed.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.failure().is_some())
    }

    /// Outcomes of files that were transformed, written or planned.
    pub fn rewritten(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.failure().is_none())
    }

    /// Returns whether every file was transformed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Serialises the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
