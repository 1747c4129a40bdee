use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Message severity, serialized with numeric levels (1 = warning, 2 = error)
/// so reports stay readable on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    Warning,
    Error,
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, String> {
        match value {
            1 => Ok(Self::Warning),
            2 => Ok(Self::Error),
            other => Err(format!("invalid severity level: {other}")),
        }
    }
}

/// One finding at one position. Line and column of 0 mean "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub rule_id: Option<String>,
}

/// All findings for a single file, in engine-emitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file_path: PathBuf,
    pub messages: Vec<Message>,
}

impl FileReport {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Error)
            .count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Warning)
            .count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }
}

/// Structured result of one engine invocation, or the aggregate of several.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub error_count: usize,
    pub warning_count: usize,
    pub results: Vec<FileReport>,
}

impl Report {
    /// Build a report from per-file results, computing the counts.
    #[must_use]
    pub fn from_results(results: Vec<FileReport>) -> Self {
        let error_count = results.iter().map(FileReport::error_count).sum();
        let warning_count = results.iter().map(FileReport::warning_count).sum();
        Self {
            error_count,
            warning_count,
            results,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.error_count + self.warning_count
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Fold per-chunk reports into one aggregate: counts are summed,
    /// `results` are concatenated in the order the reports are yielded.
    ///
    /// When the chunks come from concurrent workers that order tracks
    /// report receipt, which is run-to-run nondeterministic; callers must
    /// not assume it is stable.
    #[must_use]
    pub fn aggregate<I>(reports: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        reports.into_iter().fold(Self::default(), |mut total, report| {
            total.error_count += report.error_count;
            total.warning_count += report.warning_count;
            total.results.extend(report.results);
            total
        })
    }

    /// Quiet mode: drop file reports without any error-severity message.
    ///
    /// Counts are left untouched; quiet filters what is shown, not what
    /// was found.
    #[must_use]
    pub fn error_results(self) -> Self {
        let results = self
            .results
            .into_iter()
            .filter(FileReport::has_errors)
            .collect();
        Self { results, ..self }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
