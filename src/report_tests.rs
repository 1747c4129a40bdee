use std::path::PathBuf;

use super::*;

fn message(severity: Severity, rule: &str) -> Message {
    Message {
        line: 1,
        column: 1,
        severity,
        message: format!("{rule} violated"),
        rule_id: Some(rule.to_string()),
    }
}

fn file_report(path: &str, messages: Vec<Message>) -> FileReport {
    FileReport {
        file_path: PathBuf::from(path),
        messages,
    }
}

#[test]
fn from_results_computes_counts() {
    let report = Report::from_results(vec![
        file_report(
            "a.js",
            vec![
                message(Severity::Error, "no-trailing-whitespace"),
                message(Severity::Warning, "no-tabs"),
            ],
        ),
        file_report("b.js", vec![message(Severity::Warning, "eol-last")]),
        file_report("c.js", vec![]),
    ]);

    assert_eq!(report.error_count, 1);
    assert_eq!(report.warning_count, 2);
    assert_eq!(report.total(), 3);
    assert!(!report.is_clean());
}

#[test]
fn empty_report_is_clean() {
    let report = Report::from_results(Vec::new());
    assert!(report.is_clean());
    assert_eq!(report.total(), 0);
}

#[test]
fn aggregate_sums_counts_and_concatenates_results() {
    let first = Report::from_results(vec![file_report(
        "a.js",
        vec![message(Severity::Error, "no-tabs")],
    )]);
    let second = Report::from_results(vec![
        file_report("b.js", vec![message(Severity::Warning, "eol-last")]),
        file_report("c.js", vec![message(Severity::Error, "no-tabs")]),
    ]);

    let total = Report::aggregate(vec![first, second]);

    assert_eq!(total.error_count, 2);
    assert_eq!(total.warning_count, 1);
    let paths: Vec<_> = total
        .results
        .iter()
        .map(|r| r.file_path.to_string_lossy().into_owned())
        .collect();
    assert_eq!(paths, vec!["a.js", "b.js", "c.js"]);
}

#[test]
fn aggregate_counts_match_unchunked_run() {
    // Counts must be invariant under how the file set was chunked.
    let reports: Vec<FileReport> = (0..10)
        .map(|i| {
            let severity = if i % 2 == 0 {
                Severity::Error
            } else {
                Severity::Warning
            };
            file_report(&format!("f{i}.js"), vec![message(severity, "no-tabs")])
        })
        .collect();

    let single = Report::from_results(reports.clone());
    let chunked = Report::aggregate(
        reports
            .chunks(3)
            .map(|chunk| Report::from_results(chunk.to_vec())),
    );

    assert_eq!(single.error_count, chunked.error_count);
    assert_eq!(single.warning_count, chunked.warning_count);
}

#[test]
fn error_results_drops_pure_warning_files() {
    let report = Report::from_results(vec![
        file_report("warnings.js", vec![message(Severity::Warning, "no-tabs")]),
        file_report(
            "mixed.js",
            vec![
                message(Severity::Warning, "no-tabs"),
                message(Severity::Error, "no-trailing-whitespace"),
            ],
        ),
        file_report("clean.js", vec![]),
    ]);

    let quiet = report.error_results();

    assert_eq!(quiet.results.len(), 1);
    assert!(quiet.results[0].file_path.ends_with("mixed.js"));
    assert!(quiet.results.iter().all(FileReport::has_errors));
    // Counts reflect what was found, not what is shown.
    assert_eq!(quiet.error_count, 1);
    assert_eq!(quiet.warning_count, 2);
}

#[test]
fn severity_serializes_as_numeric_level() {
    let json = serde_json::to_string(&Severity::Error).unwrap();
    assert_eq!(json, "2");
    let json = serde_json::to_string(&Severity::Warning).unwrap();
    assert_eq!(json, "1");
}

#[test]
fn severity_rejects_unknown_levels() {
    assert!(serde_json::from_str::<Severity>("0").is_err());
    assert!(serde_json::from_str::<Severity>("3").is_err());
}

#[test]
fn report_round_trips_through_json() {
    let report = Report::from_results(vec![file_report(
        "a.js",
        vec![message(Severity::Error, "no-tabs")],
    )]);
    let json = serde_json::to_string(&report).unwrap();
    let back: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(report, back);
}

#[test]
fn missing_position_defaults_to_zero() {
    let json = r#"{"severity":2,"message":"read failed"}"#;
    let message: Message = serde_json::from_str(json).unwrap();
    assert_eq!(message.line, 0);
    assert_eq!(message.column, 0);
    assert!(message.rule_id.is_none());
}
