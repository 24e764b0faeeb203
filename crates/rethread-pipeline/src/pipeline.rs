//! The four-stage state machine that threads a carrier parameter.
//!
//! Every stage matches against a fresh parse of the previous stage's output,
//! builds exactly one edit, and commits it. Committing consumes the parse, so
//! no node or match can leak from one stage into the next.

use rethread_syntax::{
    CaptureFilter, Edit, MatchResult, ParseResult, Parser, Pattern, SupportedLanguage, SyntaxRole,
    commit,
};
use tracing::debug;

use crate::builder::{InsertPosition, append_argument, insert_parameter, reassemble_function};
use crate::error::PipelineError;
use crate::plan::ThreadingPlan;
use crate::stage::Stage;

/// Source text after one completed stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    stage: Stage,
    text: String,
}

impl StageOutput {
    /// The stage that produced this text.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// The full source text after the stage committed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A successful pipeline run with the text recorded after every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    stages: Vec<StageOutput>,
}

impl PipelineRun {
    /// Per-stage outputs in execution order.
    #[must_use]
    pub fn stages(&self) -> &[StageOutput] {
        &self.stages
    }

    /// Returns the text committed by `stage`.
    #[must_use]
    pub fn text_after(&self, stage: Stage) -> Option<&str> {
        self.stages
            .iter()
            .find(|output| output.stage == stage)
            .map(StageOutput::text)
    }

    /// The final rewritten text.
    #[must_use]
    pub fn output(&self) -> &str {
        self.stages.last().map_or("", StageOutput::text)
    }

    /// Consumes the run and returns the final text.
    #[must_use]
    pub fn into_output(self) -> String {
        self.stages
            .into_iter()
            .next_back()
            .map(|output| output.text)
            .unwrap_or_default()
    }
}

/// Compiled patterns plus a parser, reusable across files on one thread.
#[derive(Debug)]
pub struct Pipeline {
    plan: ThreadingPlan,
    parser: Parser,
    filter: CaptureFilter,
    outer: Pattern,
    inner: Pattern,
    call: Pattern,
}

impl Pipeline {
    /// Validates `plan` and compiles the patterns every stage uses.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidPlan`] for unusable plan values and
    /// [`PipelineError::Syntax`] if a parser or pattern cannot be built.
    pub fn new(plan: ThreadingPlan) -> Result<Self, PipelineError> {
        plan.validate()?;
        let language = SupportedLanguage::Rust;

        let outer = Pattern::compile_in_context(&plan.outer_pattern(), "function_item", language)?;
        let inner = Pattern::compile_in_context(&plan.inner_pattern(), "function_item", language)?;
        let call = Pattern::compile(&plan.call_pattern(), language)?;

        Ok(Self {
            filter: CaptureFilter::new(language, plan.policy()),
            parser: Parser::new(language)?,
            plan,
            outer,
            inner,
            call,
        })
    }

    /// The plan this pipeline was built from.
    #[must_use]
    pub const fn plan(&self) -> &ThreadingPlan {
        &self.plan
    }

    /// Runs all four stages over `source`.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, on the first stage that finds no candidate
    /// or cannot filter its captures, and on any stage whose output no longer
    /// parses. Nothing of a failed run is returned.
    pub fn run(&mut self, source: impl Into<String>) -> Result<PipelineRun, PipelineError> {
        let mut parsed = self.parser.parse(source)?;
        if let Some(error) = parsed.errors().first() {
            return Err(PipelineError::MalformedInput {
                details: error.to_string(),
            });
        }

        let mut stages = Vec::with_capacity(4);
        let mut next = Some(Stage::FIRST);
        let mut inner_start = None;
        while let Some(stage) = next {
            let edit = self.plan_edit(stage, &parsed, inner_start)?;
            if stage == Stage::InnerSignature {
                inner_start = Some(edit.range().start);
            }
            let text = commit(parsed, vec![edit])?;
            parsed = self.reparse(stage, text)?;
            debug!(%stage, "stage committed");

            stages.push(StageOutput {
                stage,
                text: parsed.source().to_owned(),
            });
            next = stage.next();
        }

        Ok(PipelineRun { stages })
    }

    fn reparse(&mut self, stage: Stage, text: String) -> Result<ParseResult, PipelineError> {
        let parsed = self.parser.parse(text)?;
        match parsed.errors().first() {
            Some(error) => Err(PipelineError::BrokenOutput {
                stage,
                details: error.to_string(),
            }),
            None => Ok(parsed),
        }
    }

    /// Plans the edit for `stage`.
    ///
    /// `inner_start` is the byte offset of the inner constructor rewritten by
    /// the signature stage; the call stage only edits that constructor.
    fn plan_edit(
        &self,
        stage: Stage,
        parsed: &ParseResult,
        inner_start: Option<usize>,
    ) -> Result<Edit, PipelineError> {
        match stage {
            Stage::OuterCall => {
                let outer = self.find_undeclared(&self.outer, parsed, stage)?;
                self.call_edit(stage, &outer)
            }
            Stage::OuterSignature => {
                let outer = self.find_undeclared(&self.outer, parsed, stage)?;
                self.signature_edit(stage, &outer, InsertPosition::BeforeLast)
            }
            Stage::InnerSignature => {
                let inner = self.find_undeclared(&self.inner, parsed, stage)?;
                self.signature_edit(stage, &inner, InsertPosition::Append)
            }
            Stage::InnerCall => {
                let inner = self
                    .inner
                    .find_first_where(parsed, |found| {
                        Some(found.node().start_byte()) == inner_start
                    })
                    .ok_or_else(|| self.constructor_not_found(stage, &self.inner))?;
                self.call_edit(stage, &inner)
            }
        }
    }

    /// Finds the first constructor that does not yet declare the carrier.
    fn find_undeclared<'a>(
        &self,
        pattern: &Pattern,
        parsed: &'a ParseResult,
        stage: Stage,
    ) -> Result<MatchResult<'a>, PipelineError> {
        pattern
            .find_first_where(parsed, |found| !self.declares_carrier(found))
            .ok_or_else(|| self.constructor_not_found(stage, pattern))
    }

    fn constructor_not_found(&self, stage: Stage, pattern: &Pattern) -> PipelineError {
        PipelineError::not_found(
            stage,
            format!(
                "constructor `{}` without `{}`",
                pattern.source(),
                self.plan.carrier_name()
            ),
        )
    }

    fn declares_carrier(&self, found: &MatchResult<'_>) -> bool {
        found.multiple("PARAMS").is_some_and(|params| {
            params
                .iter()
                .any(|param| declared_name(param.text()) == self.plan.carrier_name())
        })
    }

    fn passes_carrier(&self, found: &MatchResult<'_>) -> bool {
        found.multiple("ARGS").is_some_and(|args| {
            args.iter()
                .any(|arg| arg.text() == self.plan.carrier_name())
        })
    }

    fn call_edit(&self, stage: Stage, function: &MatchResult<'_>) -> Result<Edit, PipelineError> {
        let call = function
            .find_within_where(&self.call, |found| !self.passes_carrier(found))
            .ok_or_else(|| {
                PipelineError::not_found(
                    stage,
                    format!(
                        "`{}` call without `{}`",
                        self.plan.inner_constructor(),
                        self.plan.carrier_name()
                    ),
                )
            })?;

        let base = call
            .single("T")
            .ok_or_else(|| PipelineError::capture_missing(stage, "T"))?;
        let args = call
            .multiple("ARGS")
            .ok_or_else(|| PipelineError::capture_missing(stage, "ARGS"))?;
        let args = self
            .filter
            .retain_text(args, SyntaxRole::Identifier)
            .map_err(|error| PipelineError::from_filter(stage, error))?;

        let callee = format!("{}::{}", base.text(), self.plan.inner_constructor());
        let replacement = append_argument(&callee, &args, self.plan.carrier_name());
        Ok(Edit::for_node(call.node(), replacement))
    }

    fn signature_edit(
        &self,
        stage: Stage,
        function: &MatchResult<'_>,
        position: InsertPosition,
    ) -> Result<Edit, PipelineError> {
        let params = function
            .multiple("PARAMS")
            .ok_or_else(|| PipelineError::capture_missing(stage, "PARAMS"))?;
        let return_type = function
            .single("RET")
            .ok_or_else(|| PipelineError::capture_missing(stage, "RET"))?;
        let params = self
            .filter
            .retain_text(params, SyntaxRole::Parameter)
            .map_err(|error| PipelineError::from_filter(stage, error))?;
        let list = insert_parameter(&params, &self.plan.carrier_parameter(), position);

        let node = function.node();
        let source = function.source();
        let parameters = node
            .child_by_field_name("parameters")
            .ok_or_else(|| PipelineError::capture_missing(stage, "PARAMS"))?;
        let body = node
            .child_by_field_name("body")
            .ok_or_else(|| PipelineError::capture_missing(stage, "BODY"))?;
        let head = source
            .get(node.start_byte()..parameters.start_byte())
            .unwrap_or_default();
        let body = source.get(body.byte_range()).unwrap_or_default();

        let replacement = reassemble_function(head, &list, return_type.text(), body);
        Ok(Edit::for_node(node, replacement))
    }
}

/// Name bound by a parameter declaration such as `mut flag: bool`.
fn declared_name(parameter: &str) -> &str {
    let pattern = parameter
        .split_once(':')
        .map_or(parameter, |(pattern, _)| pattern)
        .trim();
    pattern.strip_prefix("mut ").map_or(pattern, str::trim)
}
