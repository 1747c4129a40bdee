use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{ParlintError, Result};
use crate::report::{Message, Severity};

pub const MAX_LINE_LENGTH: usize = 120;
const TAB_WIDTH: usize = 4;

/// Inline marker suppressing all findings on its line, honored unless
/// `--no-inline-config` was given.
pub const INLINE_DISABLE_MARKER: &str = "parlint-disable-line";

/// Configured severity for one rule. `Off` disables it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLevel {
    Off,
    Warning,
    Error,
}

impl RuleLevel {
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::Warning),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Warning => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

/// Severity configuration for the built-in rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub no_trailing_whitespace: RuleLevel,
    pub no_tabs: RuleLevel,
    pub max_line_length: RuleLevel,
    pub eol_last: RuleLevel,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            no_trailing_whitespace: RuleLevel::Error,
            no_tabs: RuleLevel::Warning,
            max_line_length: RuleLevel::Warning,
            eol_last: RuleLevel::Warning,
        }
    }
}

impl RuleSet {
    /// # Errors
    /// Returns a configuration error for an unknown rule name.
    pub fn set(&mut self, name: &str, level: RuleLevel) -> Result<()> {
        match name {
            "no-trailing-whitespace" => self.no_trailing_whitespace = level,
            "no-tabs" => self.no_tabs = level,
            "max-line-length" => self.max_line_length = level,
            "eol-last" => self.eol_last = level,
            other => {
                return Err(ParlintError::Config(format!("unknown rule: {other}")));
            }
        }
        Ok(())
    }

    /// Apply one `--rule` override: `name` enables the rule as an error,
    /// `name:0|1|2` sets an explicit level.
    ///
    /// # Errors
    /// Returns a configuration error for an unknown rule or level.
    pub fn apply_override(&mut self, spec: &str) -> Result<()> {
        let (name, level) = match spec.split_once(':') {
            Some((name, code)) => {
                let code: u8 = code.trim().parse().map_err(|_| {
                    ParlintError::Config(format!("invalid rule severity: {spec}"))
                })?;
                let level = RuleLevel::from_code(code)
                    .ok_or_else(|| ParlintError::Config(format!("invalid rule severity: {spec}")))?;
                (name.trim(), level)
            }
            None => (spec.trim(), RuleLevel::Error),
        };
        self.set(name, level)
    }
}

/// `[rules]` table of a rule configuration file: rule name to level 0|1|2.
#[derive(Debug, Default, Deserialize)]
pub struct RuleConfigFile {
    #[serde(default)]
    pub rules: HashMap<String, u8>,
}

impl RuleConfigFile {
    /// # Errors
    /// Returns a configuration error for an unknown rule or level.
    pub fn apply_to(&self, rules: &mut RuleSet) -> Result<()> {
        for (name, code) in &self.rules {
            let level = RuleLevel::from_code(*code).ok_or_else(|| {
                ParlintError::Config(format!("invalid severity {code} for rule {name}"))
            })?;
            rules.set(name, level)?;
        }
        Ok(())
    }
}

/// Outcome of linting one file's text. `fixed` is present only when fix
/// mode changed the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOutcome {
    pub messages: Vec<Message>,
    pub fixed: Option<String>,
}

fn push(
    messages: &mut Vec<Message>,
    line: usize,
    column: usize,
    severity: Severity,
    text: &str,
    rule: &str,
) {
    messages.push(Message {
        line: u32::try_from(line).unwrap_or(u32::MAX),
        column: u32::try_from(column).unwrap_or(u32::MAX),
        severity,
        message: text.to_string(),
        rule_id: Some(rule.to_string()),
    });
}

/// Run the rule set over one file's text.
///
/// In fix mode, problems with a known fix are corrected in the returned
/// text instead of reported; only unfixable findings remain as messages.
/// Checks that depend on line content (line length) run on the fixed line.
#[must_use]
pub fn check_text(
    text: &str,
    rules: &RuleSet,
    fix: bool,
    allow_inline_config: bool,
) -> LintOutcome {
    let mut messages = Vec::new();
    let ends_with_newline = text.ends_with('\n');

    let lines: Vec<&str> = text.split('\n').collect();
    // split leaves a trailing empty element when the text ends in a newline
    let line_count = if ends_with_newline {
        lines.len() - 1
    } else {
        lines.len()
    };

    let mut fixed_lines: Vec<String> = Vec::with_capacity(line_count);
    let mut changed = false;

    for (idx, raw) in lines.iter().take(line_count).enumerate() {
        let number = idx + 1;
        let mut line = (*raw).to_string();

        if allow_inline_config && line.contains(INLINE_DISABLE_MARKER) {
            fixed_lines.push(line);
            continue;
        }

        if let Some(severity) = rules.no_tabs.severity() {
            if let Some(pos) = line.find('\t') {
                if fix {
                    line = line.replace('\t', &" ".repeat(TAB_WIDTH));
                    changed = true;
                } else {
                    let column = line[..pos].chars().count() + 1;
                    push(
                        &mut messages,
                        number,
                        column,
                        severity,
                        "Unexpected tab character",
                        "no-tabs",
                    );
                }
            }
        }

        if let Some(severity) = rules.no_trailing_whitespace.severity() {
            let trimmed_len = line.trim_end().len();
            if trimmed_len != line.len() {
                if fix {
                    line.truncate(trimmed_len);
                    changed = true;
                } else {
                    let column = line[..trimmed_len].chars().count() + 1;
                    push(
                        &mut messages,
                        number,
                        column,
                        severity,
                        "Trailing whitespace not allowed",
                        "no-trailing-whitespace",
                    );
                }
            }
        }

        if let Some(severity) = rules.max_line_length.severity() {
            if line.chars().count() > MAX_LINE_LENGTH {
                push(
                    &mut messages,
                    number,
                    MAX_LINE_LENGTH + 1,
                    severity,
                    &format!("Line exceeds maximum length of {MAX_LINE_LENGTH}"),
                    "max-line-length",
                );
            }
        }

        fixed_lines.push(line);
    }

    let mut append_newline = ends_with_newline;
    if let Some(severity) = rules.eol_last.severity() {
        if !text.is_empty() && !ends_with_newline {
            let last = lines.last().copied().unwrap_or("");
            let disabled = allow_inline_config && last.contains(INLINE_DISABLE_MARKER);
            if fix {
                append_newline = true;
                changed = true;
            } else if !disabled {
                push(
                    &mut messages,
                    line_count,
                    last.chars().count() + 1,
                    severity,
                    "Newline required at end of file",
                    "eol-last",
                );
            }
        }
    }

    let fixed = (fix && changed).then(|| {
        let mut out = fixed_lines.join("\n");
        if append_newline {
            out.push('\n');
        }
        out
    });

    LintOutcome { messages, fixed }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
