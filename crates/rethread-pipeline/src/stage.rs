//! The four stages of the parameter threading pipeline.

use serde::Serialize;
use strum::{Display, EnumString};

/// One step of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Append the carrier to the inner constructor call inside the outer
    /// constructor.
    OuterCall,
    /// Declare the carrier in the outer constructor, before its last
    /// parameter.
    OuterSignature,
    /// Declare the carrier as the last parameter of the inner constructor.
    InnerSignature,
    /// Append the carrier to the base constructor call inside the inner
    /// constructor.
    InnerCall,
}

impl Stage {
    /// The first stage of every run.
    pub const FIRST: Self = Self::OuterCall;

    /// Returns the stage that follows this one, or `None` after the last.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::OuterCall => Some(Self::OuterSignature),
            Self::OuterSignature => Some(Self::InnerSignature),
            Self::InnerSignature => Some(Self::InnerCall),
            Self::InnerCall => None,
        }
    }
}
