//! Applies the pipeline to every file of a manifest.
//!
//! Files are independent: each one is read, transformed in memory, and only
//! written once all four stages have succeeded. A failure is recorded against
//! its path and the batch moves on.

mod report;
mod write;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;

use rethread_syntax::SupportedLanguage;
use tracing::{debug, info, info_span, warn};

use crate::pipeline::Pipeline;
use crate::plan::ThreadingPlan;

pub use report::{BatchReport, FailureKind, FileFailure, FileOutcome, FileStatus};

/// Runs a [`ThreadingPlan`] over a list of files.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    plan: ThreadingPlan,
    jobs: usize,
    dry_run: bool,
}

impl BatchDriver {
    /// Creates a sequential, writing driver.
    #[must_use]
    pub const fn new(plan: ThreadingPlan) -> Self {
        Self {
            plan,
            jobs: 1,
            dry_run: false,
        }
    }

    /// Sets the number of worker threads. Zero is treated as one.
    #[must_use]
    pub const fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// When `dry_run` is set, files are transformed but never written.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Processes `paths` and reports every outcome in the same order.
    #[must_use]
    pub fn run(&self, paths: &[PathBuf]) -> BatchReport {
        let jobs = self.jobs.clamp(1, paths.len().max(1));
        let span = info_span!("batch", files = paths.len(), jobs, dry_run = self.dry_run);
        let _entered = span.enter();

        let next = AtomicUsize::new(0);
        let (sender, receiver) = mpsc::channel();
        if jobs == 1 {
            self.work(&next, paths, &sender);
        } else {
            let cursor = &next;
            thread::scope(|scope| {
                let workers: Vec<_> = (0..jobs)
                    .map(|_| {
                        let outcomes = sender.clone();
                        scope.spawn(move || self.work(cursor, paths, &outcomes))
                    })
                    .collect();
                for worker in workers {
                    if worker.join().is_err() {
                        warn!("worker thread panicked");
                    }
                }
            });
        }
        drop(sender);

        let outcomes = in_manifest_order(paths, receiver);

        let report = BatchReport::new(self.dry_run, outcomes);
        info!(
            rewritten = report.rewritten().count(),
            failed = report.failures().count(),
            "batch finished"
        );
        report
    }

    /// Pulls paths off the shared cursor until the manifest is exhausted,
    /// sending each outcome as soon as it is known.
    fn work(
        &self,
        next: &AtomicUsize,
        paths: &[PathBuf],
        outcomes: &Sender<(usize, FileOutcome)>,
    ) {
        let mut pipeline = Pipeline::new(self.plan.clone());

        loop {
            let index = next.fetch_add(1, Ordering::Relaxed);
            let Some(path) = paths.get(index) else {
                break;
            };
            let status = match &mut pipeline {
                Ok(pipeline) => self.process(pipeline, path),
                Err(error) => FileStatus::Failed(FileFailure::from(&*error)),
            };
            if outcomes
                .send((index, FileOutcome::new(path.clone(), status)))
                .is_err()
            {
                break;
            }
        }
    }

    fn process(&self, pipeline: &mut Pipeline, path: &Path) -> FileStatus {
        let span = info_span!("file", path = %path.display());
        let _entered = span.enter();

        match self.transform(pipeline, path) {
            Ok(status) => {
                info!(?status, "file transformed");
                status
            }
            Err(failure) => {
                warn!(kind = %failure.kind(), stage = ?failure.stage(), "{}", failure.message());
                FileStatus::Failed(failure)
            }
        }
    }

    fn transform(&self, pipeline: &mut Pipeline, path: &Path) -> Result<FileStatus, FileFailure> {
        let language = SupportedLanguage::from_path(path).ok_or_else(|| {
            FileFailure::new(
                FailureKind::UnsupportedLanguage,
                format!("no grammar for {}", path.display()),
            )
        })?;
        debug!(%language, "reading file");

        let source = fs::read_to_string(path).map_err(|error| FileFailure::io(&error))?;
        let run = pipeline
            .run(source)
            .map_err(|error| FileFailure::from(&error))?;

        if self.dry_run {
            return Ok(FileStatus::Planned);
        }
        write::replace_file(path, run.output()).map_err(|error| FileFailure::io(&error))?;
        Ok(FileStatus::Rewritten)
    }
}

/// Places each `(index, outcome)` at its manifest position. Paths that never
/// reported belonged to a worker that panicked.
fn in_manifest_order(
    paths: &[PathBuf],
    finished: impl IntoIterator<Item = (usize, FileOutcome)>,
) -> Vec<FileOutcome> {
    let mut slots: Vec<Option<FileOutcome>> = vec![None; paths.len()];
    for (index, outcome) in finished {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(outcome);
        }
    }
    slots
        .into_iter()
        .zip(paths)
        .map(|(slot, path)| {
            slot.unwrap_or_else(|| {
                FileOutcome::new(
                    path.clone(),
                    FileStatus::Failed(FileFailure::new(
                        FailureKind::Engine,
                        "worker thread panicked",
                    )),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_sent_before_a_worker_panic_are_kept() {
        let paths = vec![PathBuf::from("a.rs"), PathBuf::from("b.rs")];
        let (sender, receiver) = mpsc::channel();

        thread::scope(|scope| {
            let worker = scope.spawn(|| {
                sender
                    .send((0, FileOutcome::new(PathBuf::from("a.rs"), FileStatus::Planned)))
                    .expect("send");
                panic!("worker failed mid-batch");
            });
            assert!(worker.join().is_err());
        });
        drop(sender);

        let outcomes = in_manifest_order(&paths, receiver);
        let [first, second] = outcomes.as_slice() else {
            panic!("expected two outcomes, got {outcomes:?}");
        };
        assert_eq!(first.status(), &FileStatus::Planned);
        assert_eq!(second.path(), Path::new("b.rs"));
        let failure = second.failure().expect("missing outcome fails");
        assert_eq!(failure.kind(), FailureKind::Engine);
    }
}
