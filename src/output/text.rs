use std::fmt::Write;

use crate::report::{FileReport, Report, Severity};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const RED_BOLD: &str = "\x1b[1;31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const DIM: &str = "\x1b[2m";
    pub const UNDERLINE: &str = "\x1b[4m";
    pub const RESET: &str = "\x1b[0m";
}

/// Renders reports for the terminal. Rendering is pure: the same report
/// always produces byte-identical output for a given color mode.
pub struct Formatter {
    use_colors: bool,
}

struct Row {
    position: String,
    severity: Severity,
    text: String,
    rule: String,
}

impl Formatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if !self.use_colors || text.is_empty() {
            return text.to_string();
        }
        format!("{code}{text}{}", ansi::RESET)
    }

    const fn severity_label(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
        }
    }

    /// Per-file detail table. Files without messages are omitted entirely,
    /// including from the output order.
    #[must_use]
    pub fn format_results(&self, results: &[FileReport]) -> String {
        let mut output = String::from("\n");

        for result in results {
            if result.messages.is_empty() {
                continue;
            }

            let path = result.file_path.display().to_string();
            let _ = writeln!(output, "{}", self.paint(ansi::UNDERLINE, &path));

            let rows: Vec<Row> = result
                .messages
                .iter()
                .map(|message| Row {
                    position: format!("{}:{}", message.line, message.column),
                    severity: message.severity,
                    text: message
                        .message
                        .strip_suffix('.')
                        .unwrap_or(&message.message)
                        .to_string(),
                    rule: message.rule_id.clone().unwrap_or_default(),
                })
                .collect();

            let position_width = rows.iter().map(|r| r.position.len()).max().unwrap_or(0);
            let label_width = rows
                .iter()
                .map(|r| Self::severity_label(r.severity).len())
                .max()
                .unwrap_or(0);
            let text_width = rows.iter().map(|r| r.text.chars().count()).max().unwrap_or(0);

            for row in &rows {
                let position = format!("{:<position_width$}", row.position);
                let label = format!("{:<label_width$}", Self::severity_label(row.severity));
                let text = format!("{:<text_width$}", row.text);
                let line = format!(
                    "  {}  {}  {}  {}",
                    self.paint(ansi::DIM, &position),
                    self.paint(Self::severity_color(row.severity), &label),
                    text,
                    self.paint(ansi::DIM, &row.rule),
                );
                let _ = writeln!(output, "{}", line.trim_end());
            }

            output.push('\n');
        }

        output
    }

    /// Summary line: `✖ {total} problem(s) ({e} error(s), {w} warning(s))`,
    /// singular only when the total is exactly one.
    #[must_use]
    pub fn format_total(&self, report: &Report) -> String {
        let total = report.total();
        let problem_label = if total == 1 { "problem" } else { "problems" };
        let error_label = if total == 1 { "error" } else { "errors" };
        let warning_label = if total == 1 { "warning" } else { "warnings" };

        let line = format!(
            "\u{2716} {total} {problem_label} ({} {error_label}, {} {warning_label})",
            report.error_count, report.warning_count
        );
        format!("{}\n", self.paint(ansi::RED_BOLD, &line))
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
