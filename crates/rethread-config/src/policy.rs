use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How call and parameter lists with unexpected entries are treated.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ArgumentPolicy {
    /// Fail the file when an argument is not a bare identifier.
    #[default]
    Strict,
    /// Drop arguments that are not bare identifiers.
    BestEffort,
}

/// Errors encountered while parsing an [`ArgumentPolicy`] from text.
pub type ArgumentPolicyParseError = strum::ParseError;
