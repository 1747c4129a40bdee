use super::*;

fn rule_ids(outcome: &LintOutcome) -> Vec<String> {
    outcome
        .messages
        .iter()
        .map(|m| m.rule_id.clone().unwrap_or_default())
        .collect()
}

#[test]
fn clean_text_produces_no_messages() {
    let outcome = check_text("let a = 1;\n", &RuleSet::default(), false, true);
    assert!(outcome.messages.is_empty());
    assert!(outcome.fixed.is_none());
}

#[test]
fn trailing_whitespace_is_an_error_by_default() {
    let outcome = check_text("let a = 1;  \n", &RuleSet::default(), false, true);
    assert_eq!(rule_ids(&outcome), vec!["no-trailing-whitespace"]);
    let message = &outcome.messages[0];
    assert_eq!(message.severity, Severity::Error);
    assert_eq!(message.line, 1);
    assert_eq!(message.column, 11);
}

#[test]
fn tab_is_reported_at_its_column() {
    let outcome = check_text("a\tb\n", &RuleSet::default(), false, true);
    assert_eq!(rule_ids(&outcome), vec!["no-tabs"]);
    assert_eq!(outcome.messages[0].line, 1);
    assert_eq!(outcome.messages[0].column, 2);
    assert_eq!(outcome.messages[0].severity, Severity::Warning);
}

#[test]
fn long_line_is_reported() {
    let long = format!("{}\n", "x".repeat(MAX_LINE_LENGTH + 1));
    let outcome = check_text(&long, &RuleSet::default(), false, true);
    assert_eq!(rule_ids(&outcome), vec!["max-line-length"]);
    assert_eq!(outcome.messages[0].column as usize, MAX_LINE_LENGTH + 1);
}

#[test]
fn missing_final_newline_is_reported_on_last_line() {
    let outcome = check_text("let a;\nlet b;", &RuleSet::default(), false, true);
    assert_eq!(rule_ids(&outcome), vec!["eol-last"]);
    assert_eq!(outcome.messages[0].line, 2);
    assert_eq!(outcome.messages[0].column, 7);
}

#[test]
fn empty_text_needs_no_final_newline() {
    let outcome = check_text("", &RuleSet::default(), false, true);
    assert!(outcome.messages.is_empty());
}

#[test]
fn disabled_rule_stays_silent() {
    let mut rules = RuleSet::default();
    rules.set("no-tabs", RuleLevel::Off).unwrap();
    let outcome = check_text("a\tb\n", &rules, false, true);
    assert!(outcome.messages.is_empty());
}

#[test]
fn fix_removes_fixable_problems_and_their_messages() {
    let outcome = check_text("let a;  \n\tlet b;", &RuleSet::default(), true, true);
    assert!(outcome.messages.is_empty());
    assert_eq!(outcome.fixed.as_deref(), Some("let a;\n    let b;\n"));
}

#[test]
fn fix_keeps_unfixable_messages() {
    let long = "y".repeat(MAX_LINE_LENGTH + 5);
    let text = format!("{long}  \n");
    let outcome = check_text(&text, &RuleSet::default(), true, true);
    // Trailing whitespace fixed, length violation remains.
    assert_eq!(rule_ids(&outcome), vec!["max-line-length"]);
    assert_eq!(outcome.fixed.as_deref(), Some(format!("{long}\n").as_str()));
}

#[test]
fn fix_does_not_touch_disabled_rules() {
    let mut rules = RuleSet::default();
    rules.set("no-tabs", RuleLevel::Off).unwrap();
    let outcome = check_text("\tlet a;\n", &rules, true, true);
    assert!(outcome.fixed.is_none());
}

#[test]
fn clean_text_in_fix_mode_yields_no_rewrite() {
    let outcome = check_text("let a;\n", &RuleSet::default(), true, true);
    assert!(outcome.fixed.is_none());
}

#[test]
fn inline_marker_suppresses_the_line() {
    let text = format!("let a;  // {INLINE_DISABLE_MARKER}  \nlet b;\n");
    let outcome = check_text(&text, &RuleSet::default(), false, true);
    assert!(outcome.messages.is_empty());
}

#[test]
fn inline_marker_is_ignored_without_inline_config() {
    let text = format!("let a;  // {INLINE_DISABLE_MARKER}\n");
    let outcome = check_text(&text, &RuleSet::default(), false, false);
    assert!(!outcome.messages.is_empty());
}

#[test]
fn override_with_bare_name_means_error() {
    let mut rules = RuleSet::default();
    rules.apply_override("no-tabs").unwrap();
    assert_eq!(rules.no_tabs, RuleLevel::Error);
}

#[test]
fn override_with_level_sets_it() {
    let mut rules = RuleSet::default();
    rules.apply_override("eol-last:0").unwrap();
    assert_eq!(rules.eol_last, RuleLevel::Off);
    rules.apply_override("max-line-length:2").unwrap();
    assert_eq!(rules.max_line_length, RuleLevel::Error);
}

#[test]
fn override_rejects_unknown_rule_and_level() {
    let mut rules = RuleSet::default();
    assert!(rules.apply_override("no-such-rule").is_err());
    assert!(rules.apply_override("no-tabs:9").is_err());
    assert!(rules.apply_override("no-tabs:abc").is_err());
}

#[test]
fn config_file_table_applies_levels() {
    let config: RuleConfigFile = toml::from_str(
        r#"
        [rules]
        no-tabs = 0
        eol-last = 2
        "#,
    )
    .unwrap();

    let mut rules = RuleSet::default();
    config.apply_to(&mut rules).unwrap();
    assert_eq!(rules.no_tabs, RuleLevel::Off);
    assert_eq!(rules.eol_last, RuleLevel::Error);
}
