use crate::logging::LogFormat;
use crate::policy::ArgumentPolicy;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default name of the threaded parameter.
pub const DEFAULT_CARRIER_NAME: &str = "is_defined";

/// Default type of the threaded parameter.
pub const DEFAULT_CARRIER_TYPE: &str = "bool";

/// Default name of the outer constructor.
pub const DEFAULT_OUTER_CONSTRUCTOR: &str = "new";

/// Default visibility of the outer constructor.
pub const DEFAULT_OUTER_VISIBILITY: &str = "pub(crate)";

/// Default name of the inner constructor.
pub const DEFAULT_INNER_CONSTRUCTOR: &str = "new_inherited";

/// Default number of worker threads.
pub const DEFAULT_JOBS: usize = 1;

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default argument policy.
#[must_use]
pub const fn default_argument_policy() -> ArgumentPolicy {
    ArgumentPolicy::Strict
}
