//! End-to-end tests for the batch driver against files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use insta::assert_snapshot;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use rethread_pipeline::{BatchDriver, FailureKind, FileStatus, Stage, ThreadingPlan};

const ELEMENT: &str = include_str!("fixtures/htmldivelement.rs");

const MALFORMED: &str = "impl HTMLSpanElement {\n    fn new_inherited(local_name: LocalName -> Self {\n";

const NO_INNER_RETURN: &str = r"impl HTMLHrElement {
    fn new_inherited(local_name: LocalName) {
        HTMLElement::new_inherited(local_name);
    }

    pub(crate) fn new(local_name: LocalName, can_gc: CanGc) -> DomRoot<HTMLHrElement> {
        Node::reflect_node(Box::new(HTMLHrElement::new_inherited(local_name)), can_gc)
    }
}
";

/// Fixture providing a scratch directory for manifest files.
#[fixture]
fn workspace() -> TempDir {
    tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"))
}

fn seed(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap_or_else(|err| panic!("write {name}: {err}"));
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
}

// =============================================================================
// Happy Path
// =============================================================================

#[rstest]
fn element_file_is_rewritten(workspace: TempDir) {
    let path = seed(workspace.path(), "htmldivelement.rs", ELEMENT);

    let report = BatchDriver::new(ThreadingPlan::default()).run(&[path.clone()]);

    assert!(report.is_success(), "{report:?}");
    let rewritten = read(&path);
    assert_snapshot!("htmldivelement_threaded", rewritten);
}

#[rstest]
#[case(1)]
#[case(3)]
fn one_malformed_file_does_not_stop_the_batch(workspace: TempDir, #[case] jobs: usize) {
    let names = [
        "htmlaudioelement.rs",
        "htmlbrelement.rs",
        "htmlspanelement.rs",
        "htmlulistelement.rs",
        "htmlvideoelement.rs",
    ];
    let paths: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let content = if index == 2 { MALFORMED } else { ELEMENT };
            seed(workspace.path(), name, content)
        })
        .collect();

    let report = BatchDriver::new(ThreadingPlan::default())
        .with_jobs(jobs)
        .run(&paths);

    let reported: Vec<_> = report.outcomes().iter().map(|o| o.path().to_path_buf()).collect();
    assert_eq!(reported, paths);

    let failed: Vec<_> = report.failures().map(|o| o.path().to_path_buf()).collect();
    assert_eq!(failed, vec![paths[2].clone()]);
    let failure = report.outcomes()[2].failure().expect("failure");
    assert_eq!(failure.kind(), FailureKind::ParseFailure);

    assert_eq!(read(&paths[2]), MALFORMED);
    for (index, path) in paths.iter().enumerate().filter(|(index, _)| *index != 2) {
        let text = read(path);
        assert_ne!(text, ELEMENT, "file {index} should be rewritten");
        assert!(text.contains("is_defined: bool, can_gc: CanGc,)"));
    }
}

#[rstest]
fn dry_run_leaves_files_alone(workspace: TempDir) {
    let path = seed(workspace.path(), "htmldivelement.rs", ELEMENT);

    let report = BatchDriver::new(ThreadingPlan::default())
        .with_dry_run(true)
        .run(&[path.clone()]);

    assert!(report.is_success());
    assert!(report.dry_run());
    assert_eq!(report.outcomes()[0].status(), &FileStatus::Planned);
    assert_eq!(read(&path), ELEMENT);
}

// =============================================================================
// Unhappy Path
// =============================================================================

#[rstest]
fn late_stage_failure_keeps_file_bytes(workspace: TempDir) {
    let path = seed(workspace.path(), "htmlhrelement.rs", NO_INNER_RETURN);
    let before = fs::read(&path).unwrap_or_else(|err| panic!("read: {err}"));

    let report = BatchDriver::new(ThreadingPlan::default()).run(&[path.clone()]);

    let failure = report.outcomes()[0].failure().expect("failure");
    assert_eq!(failure.kind(), FailureKind::PatternNotFound);
    assert_eq!(failure.stage(), Some(Stage::InnerSignature));
    let after = fs::read(&path).unwrap_or_else(|err| panic!("read: {err}"));
    assert_eq!(before, after);
}

#[rstest]
fn second_batch_reports_already_threaded_files(workspace: TempDir) {
    let path = seed(workspace.path(), "htmldivelement.rs", ELEMENT);
    let driver = BatchDriver::new(ThreadingPlan::default());

    assert!(driver.run(&[path.clone()]).is_success());
    let once = read(&path);

    let report = driver.run(&[path.clone()]);
    let failure = report.outcomes()[0].failure().expect("failure");
    assert_eq!(failure.kind(), FailureKind::PatternNotFound);
    assert_eq!(failure.stage(), Some(Stage::OuterCall));
    assert_eq!(read(&path), once);
}

#[rstest]
#[case("notes.txt", FailureKind::UnsupportedLanguage)]
#[case("missing.rs", FailureKind::Io)]
fn unreadable_entries_are_reported(
    workspace: TempDir,
    #[case] name: &str,
    #[case] expected: FailureKind,
) {
    let path = workspace.path().join(name);
    if name.ends_with(".txt") {
        fs::write(&path, ELEMENT).unwrap_or_else(|err| panic!("write: {err}"));
    }

    let report = BatchDriver::new(ThreadingPlan::default()).run(&[path]);

    let failure = report.outcomes()[0].failure().expect("failure");
    assert_eq!(failure.kind(), expected);
    assert_eq!(failure.stage(), None);
}

#[rstest]
fn json_report_names_failed_stage(workspace: TempDir) {
    let path = seed(workspace.path(), "htmlhrelement.rs", NO_INNER_RETURN);

    let report = BatchDriver::new(ThreadingPlan::default()).run(&[path]);
    let json: serde_json::Value = serde_json::from_str(&report.to_json().expect("json"))
        .unwrap_or_else(|err| panic!("parse json: {err}"));

    let outcome = &json["outcomes"][0];
    assert_eq!(outcome["status"], "failed");
    assert_eq!(outcome["kind"], "pattern_not_found");
    assert_eq!(outcome["stage"], "inner_signature");
}
