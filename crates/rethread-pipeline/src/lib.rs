//! Threads a new parameter through two-tier constructor chains.
//!
//! A [`ThreadingPlan`] names an outer constructor (by default
//! `pub(crate) fn new`), the inner constructor it delegates to (by default
//! `fn new_inherited`), and a carrier parameter (by default
//! `is_defined: bool`). A [`Pipeline`] applies four [`Stage`]s to one source
//! text:
//!
//! 1. append the carrier to the inner constructor call inside the outer one
//! 2. declare the carrier in the outer signature, before its last parameter
//! 3. declare the carrier as the last parameter of the inner signature
//! 4. append the carrier to the base constructor call inside the inner one
//!
//! Each stage re-parses the previous stage's output. The [`BatchDriver`]
//! runs the pipeline over many files and writes only those that pass every
//! stage.
//!
//! # Example
//!
//! ```
//! use rethread_pipeline::{Pipeline, ThreadingPlan};
//!
//! let source = r"
//! impl Div {
//!     fn new_inherited(document: &Document) -> Div {
//!         Div { element: Element::new_inherited(document) }
//!     }
//!     pub(crate) fn new(document: &Document, can_gc: CanGc) -> DomRoot<Div> {
//!         reflect(Box::new(Div::new_inherited(document)), can_gc)
//!     }
//! }
//! ";
//!
//! let mut pipeline = Pipeline::new(ThreadingPlan::default())?;
//! let run = pipeline.run(source)?;
//! assert!(run.output().contains("Element::new_inherited(document, is_defined,)"));
//! # Ok::<(), rethread_pipeline::PipelineError>(())
//! ```

mod batch;
mod builder;
mod error;
mod pipeline;
mod plan;
mod stage;

pub use batch::{BatchDriver, BatchReport, FailureKind, FileFailure, FileOutcome, FileStatus};
pub use builder::{InsertPosition, append_argument, insert_parameter, reassemble_function};
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineRun, StageOutput};
pub use plan::ThreadingPlan;
pub use rethread_syntax::FilterPolicy;
pub use stage::Stage;

#[cfg(test)]
mod tests;
