#![allow(deprecated)] // cargo_bin deprecation - still works fine

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

use parlint::linter::WorkerRequest;
use parlint::options::LintOptions;
use parlint::report::Report;

fn cmd() -> Command {
    Command::cargo_bin("parlint").expect("binary should exist")
}

fn request_line(options: LintOptions, files: Option<Vec<PathBuf>>) -> String {
    let request = WorkerRequest { options, files };
    let mut line = serde_json::to_string(&request).unwrap();
    line.push('\n');
    line
}

#[test]
fn worker_answers_a_request_with_one_report_line() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("app.js");
    fs::write(&file, "let a;  \n").unwrap();

    let options = LintOptions {
        cwd: temp.path().to_path_buf(),
        ..LintOptions::default()
    };

    let output = cmd()
        .arg("--worker")
        .write_stdin(request_line(options, Some(vec![file.clone()])))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let report: Report = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report.error_count, 1);
    assert_eq!(report.warning_count, 0);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].file_path, file);
}

#[test]
fn worker_ignores_requests_without_a_file_list() {
    let output = cmd()
        .arg("--worker")
        .write_stdin(request_line(LintOptions::default(), None))
        .output()
        .unwrap();

    // Not meant for this worker: no report, clean exit.
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn worker_exits_nonzero_on_garbage_request() {
    let output = cmd()
        .arg("--worker")
        .write_stdin("this is not json\n")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn worker_applies_quiet_filtering_in_process() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("warn.js");
    fs::write(&file, "\tlet a;\n").unwrap();

    let options = LintOptions {
        cwd: temp.path().to_path_buf(),
        quiet: true,
        ..LintOptions::default()
    };

    let output = cmd()
        .arg("--worker")
        .write_stdin(request_line(options, Some(vec![file])))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let report: Report = serde_json::from_str(stdout.trim()).unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.warning_count, 1);
}
