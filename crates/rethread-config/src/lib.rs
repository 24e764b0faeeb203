//! Layered configuration for the `rethread` command.
//!
//! Values are merged from defaults, a configuration file (`.rethread.toml`
//! or `--config-path`), `RETHREAD_*` environment variables, and command-line
//! flags, in increasing order of precedence. Every field is optional in the
//! merged layers; accessors fill in the defaults. The defaults layer always
//! carries the log filter and job count, so loading succeeds when no other
//! layer contributes anything.

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod logging;
mod policy;

pub use defaults::{
    DEFAULT_CARRIER_NAME, DEFAULT_CARRIER_TYPE, DEFAULT_INNER_CONSTRUCTOR, DEFAULT_JOBS,
    DEFAULT_LOG_FILTER, DEFAULT_OUTER_CONSTRUCTOR, DEFAULT_OUTER_VISIBILITY,
    default_argument_policy, default_log_filter, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use policy::{ArgumentPolicy, ArgumentPolicyParseError};

/// Merged configuration for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "RETHREAD")]
pub struct Config {
    /// `tracing` filter directive, e.g. `info` or `rethread_pipeline=debug`.
    #[ortho_config(default = DEFAULT_LOG_FILTER.to_owned())]
    pub log_filter: Option<String>,
    /// Log line format.
    pub log_format: Option<LogFormat>,
    /// Name of the threaded parameter.
    pub carrier_name: Option<String>,
    /// Declared type of the threaded parameter.
    pub carrier_type: Option<String>,
    /// Name of the outer constructor.
    pub outer_constructor: Option<String>,
    /// Visibility of the outer constructor; empty for private.
    pub outer_visibility: Option<String>,
    /// Name of the inner constructor and of its base call.
    pub inner_constructor: Option<String>,
    /// Treatment of arguments that are not bare identifiers.
    pub argument_policy: Option<ArgumentPolicy>,
    /// Number of files processed in parallel.
    #[ortho_config(default = DEFAULT_JOBS)]
    pub jobs: Option<usize>,
}

impl Config {
    /// Returns the effective log filter.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Returns the effective log format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Returns the effective carrier name.
    #[must_use]
    pub fn carrier_name(&self) -> &str {
        self.carrier_name.as_deref().unwrap_or(DEFAULT_CARRIER_NAME)
    }

    /// Returns the effective carrier type.
    #[must_use]
    pub fn carrier_type(&self) -> &str {
        self.carrier_type.as_deref().unwrap_or(DEFAULT_CARRIER_TYPE)
    }

    /// Returns the effective outer constructor name.
    #[must_use]
    pub fn outer_constructor(&self) -> &str {
        self.outer_constructor
            .as_deref()
            .unwrap_or(DEFAULT_OUTER_CONSTRUCTOR)
    }

    /// Returns the effective outer constructor visibility.
    #[must_use]
    pub fn outer_visibility(&self) -> &str {
        self.outer_visibility
            .as_deref()
            .unwrap_or(DEFAULT_OUTER_VISIBILITY)
    }

    /// Returns the effective inner constructor name.
    #[must_use]
    pub fn inner_constructor(&self) -> &str {
        self.inner_constructor
            .as_deref()
            .unwrap_or(DEFAULT_INNER_CONSTRUCTOR)
    }

    /// Returns the effective argument policy.
    #[must_use]
    pub fn argument_policy(&self) -> ArgumentPolicy {
        self.argument_policy.unwrap_or_else(default_argument_policy)
    }

    /// Returns the effective number of worker threads, at least one.
    #[must_use]
    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or(DEFAULT_JOBS).max(1)
    }
}
