//! Error types for the threading pipeline.

use rethread_syntax::SyntaxError;
use thiserror::Error;

use crate::stage::Stage;

/// Errors raised while threading the carrier through one source text.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input already contains syntax errors.
    #[error("input contains syntax errors: {details}")]
    MalformedInput {
        /// The first syntax error found.
        details: String,
    },

    /// A stage found no construct of the expected shape.
    #[error("{stage}: no {target} matched")]
    PatternNotFound {
        /// Stage that searched.
        stage: Stage,
        /// Description of what was searched for.
        target: String,
    },

    /// A match did not bind a capture the stage relies on.
    #[error("{stage}: match has no `{name}` capture")]
    CaptureMissing {
        /// Stage that inspected the match.
        stage: Stage,
        /// Name of the absent capture.
        name: &'static str,
    },

    /// A captured parameter or argument list held a node the strict filter
    /// refuses to drop.
    #[error("{stage}: {source}")]
    UnsupportedArgumentShape {
        /// Stage that filtered the capture.
        stage: Stage,
        /// The rejection raised by the filter.
        source: SyntaxError,
    },

    /// A stage committed text that no longer parses.
    #[error("{stage}: rewritten text does not parse: {details}")]
    BrokenOutput {
        /// Stage whose output is broken.
        stage: Stage,
        /// The first syntax error in the output.
        details: String,
    },

    /// A plan value cannot be spliced into patterns or output.
    #[error("invalid {field} `{value}`")]
    InvalidPlan {
        /// Name of the offending plan field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Parser, pattern, or commit failure inside the engine.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl PipelineError {
    /// Returns the stage the error was raised in, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::PatternNotFound { stage, .. }
            | Self::CaptureMissing { stage, .. }
            | Self::UnsupportedArgumentShape { stage, .. }
            | Self::BrokenOutput { stage, .. } => Some(*stage),
            Self::MalformedInput { .. } | Self::InvalidPlan { .. } | Self::Syntax(_) => None,
        }
    }

    pub(crate) fn not_found(stage: Stage, target: impl Into<String>) -> Self {
        Self::PatternNotFound {
            stage,
            target: target.into(),
        }
    }

    pub(crate) const fn capture_missing(stage: Stage, name: &'static str) -> Self {
        Self::CaptureMissing { stage, name }
    }

    /// Attributes a filter rejection to `stage`.
    pub(crate) fn from_filter(stage: Stage, error: SyntaxError) -> Self {
        match error {
            SyntaxError::UnsupportedShape { .. } => Self::UnsupportedArgumentShape {
                stage,
                source: error,
            },
            other => Self::Syntax(other),
        }
    }
}
