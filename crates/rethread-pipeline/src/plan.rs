//! What the pipeline threads, and through which constructors.

use rethread_syntax::FilterPolicy;

use crate::error::PipelineError;

/// Names and policy that drive a pipeline run.
///
/// The defaults describe the DOM element constructor convention: a
/// `pub(crate) fn new` that delegates to a private `fn new_inherited`, which
/// in turn delegates to its base type's `new_inherited`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadingPlan {
    outer_constructor: String,
    outer_visibility: String,
    inner_constructor: String,
    carrier_name: String,
    carrier_type: String,
    policy: FilterPolicy,
}

impl Default for ThreadingPlan {
    fn default() -> Self {
        Self {
            outer_constructor: "new".to_owned(),
            outer_visibility: "pub(crate)".to_owned(),
            inner_constructor: "new_inherited".to_owned(),
            carrier_name: "is_defined".to_owned(),
            carrier_type: "bool".to_owned(),
            policy: FilterPolicy::Strict,
        }
    }
}

impl ThreadingPlan {
    /// Sets the name of the outer constructor.
    #[must_use]
    pub fn with_outer_constructor(mut self, name: impl Into<String>) -> Self {
        self.outer_constructor = name.into();
        self
    }

    /// Sets the visibility the outer constructor is declared with. An empty
    /// string selects private constructors.
    #[must_use]
    pub fn with_outer_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.outer_visibility = visibility.into();
        self
    }

    /// Sets the name shared by the inner constructor and its base call.
    #[must_use]
    pub fn with_inner_constructor(mut self, name: impl Into<String>) -> Self {
        self.inner_constructor = name.into();
        self
    }

    /// Sets the parameter name threaded through both constructors.
    #[must_use]
    pub fn with_carrier_name(mut self, name: impl Into<String>) -> Self {
        self.carrier_name = name.into();
        self
    }

    /// Sets the declared type of the carrier parameter.
    #[must_use]
    pub fn with_carrier_type(mut self, ty: impl Into<String>) -> Self {
        self.carrier_type = ty.into();
        self
    }

    /// Sets how captured lists with unexpected nodes are handled.
    #[must_use]
    pub const fn with_policy(mut self, policy: FilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Outer constructor name.
    #[must_use]
    pub fn outer_constructor(&self) -> &str {
        &self.outer_constructor
    }

    /// Outer constructor visibility.
    #[must_use]
    pub fn outer_visibility(&self) -> &str {
        &self.outer_visibility
    }

    /// Inner constructor name.
    #[must_use]
    pub fn inner_constructor(&self) -> &str {
        &self.inner_constructor
    }

    /// Carrier parameter name.
    #[must_use]
    pub fn carrier_name(&self) -> &str {
        &self.carrier_name
    }

    /// Carrier parameter type.
    #[must_use]
    pub fn carrier_type(&self) -> &str {
        &self.carrier_type
    }

    /// Capture filter policy.
    #[must_use]
    pub const fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Returns the declaration inserted into signatures, e.g.
    /// `is_defined: bool`.
    #[must_use]
    pub fn carrier_parameter(&self) -> String {
        format!("{}: {}", self.carrier_name, self.carrier_type)
    }

    /// Checks that every value can be spliced into patterns and code.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidPlan`] naming the first bad field.
    pub fn validate(&self) -> Result<(), PipelineError> {
        for (field, value) in [
            ("outer constructor", &self.outer_constructor),
            ("inner constructor", &self.inner_constructor),
            ("carrier name", &self.carrier_name),
        ] {
            if !is_identifier(value) {
                return Err(invalid(field, value));
            }
        }

        if self.carrier_type.trim().is_empty() || self.carrier_type.contains('$') {
            return Err(invalid("carrier type", &self.carrier_type));
        }
        if self.outer_visibility.contains(['$', '{', '}']) {
            return Err(invalid("outer visibility", &self.outer_visibility));
        }

        Ok(())
    }

    pub(crate) fn outer_pattern(&self) -> String {
        let visibility = self.outer_visibility.trim();
        let prefix = if visibility.is_empty() {
            String::new()
        } else {
            format!("{visibility} ")
        };
        constructor_pattern(&prefix, &self.outer_constructor)
    }

    pub(crate) fn inner_pattern(&self) -> String {
        constructor_pattern("", &self.inner_constructor)
    }

    pub(crate) fn call_pattern(&self) -> String {
        format!("$T::{}($$$ARGS)", self.inner_constructor)
    }
}

fn constructor_pattern(prefix: &str, name: &str) -> String {
    format!("impl $_ {{ {prefix}fn {name}($$$PARAMS) -> $RET {{ $$$BODY }} }}")
}

fn invalid(field: &'static str, value: &str) -> PipelineError {
    PipelineError::InvalidPlan {
        field,
        value: value.to_owned(),
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_plan_builds_constructor_patterns() {
        let plan = ThreadingPlan::default();
        assert_eq!(
            plan.outer_pattern(),
            "impl $_ { pub(crate) fn new($$$PARAMS) -> $RET { $$$BODY } }"
        );
        assert_eq!(
            plan.inner_pattern(),
            "impl $_ { fn new_inherited($$$PARAMS) -> $RET { $$$BODY } }"
        );
        assert_eq!(plan.call_pattern(), "$T::new_inherited($$$ARGS)");
        assert_eq!(plan.carrier_parameter(), "is_defined: bool");
    }

    #[test]
    fn empty_visibility_selects_private_constructors() {
        let plan = ThreadingPlan::default().with_outer_visibility("");
        assert_eq!(
            plan.outer_pattern(),
            "impl $_ { fn new($$$PARAMS) -> $RET { $$$BODY } }"
        );
    }

    #[rstest]
    #[case(ThreadingPlan::default().with_carrier_name("is defined"), "carrier name")]
    #[case(ThreadingPlan::default().with_inner_constructor("1st"), "inner constructor")]
    #[case(ThreadingPlan::default().with_outer_constructor(""), "outer constructor")]
    #[case(ThreadingPlan::default().with_carrier_type("$T"), "carrier type")]
    #[case(ThreadingPlan::default().with_outer_visibility("pub {"), "outer visibility")]
    fn invalid_values_are_rejected(#[case] plan: ThreadingPlan, #[case] expected: &str) {
        match plan.validate() {
            Err(PipelineError::InvalidPlan { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid plan, got {other:?}"),
        }
    }

    #[test]
    fn default_plan_is_valid() {
        assert!(ThreadingPlan::default().validate().is_ok());
    }
}
