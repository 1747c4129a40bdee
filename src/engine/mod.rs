mod cache;
mod rules;

pub use cache::{CacheEntry, ResultCache, file_metadata};
pub use rules::{
    INLINE_DISABLE_MARKER, LintOutcome, MAX_LINE_LENGTH, RuleConfigFile, RuleLevel, RuleSet,
    check_text,
};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ParlintError, Result};
use crate::options::LintOptions;
use crate::report::{FileReport, Message, Report, Severity};

/// Rule configuration file consulted when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "parlint.toml";

/// Capability boundary between the orchestration core and the analysis
/// engine: given a file set, produce a structured report. The core never
/// assumes anything about how findings are computed.
pub trait AnalysisEngine {
    /// Analyze `files` under the options the engine was built with.
    ///
    /// In fix mode this is the only place source files are rewritten, and
    /// fixes land on disk before the report is returned.
    ///
    /// # Errors
    /// Returns configuration errors unmodified; per-file findings are data
    /// in the report, never errors.
    fn analyze(&self, files: &[PathBuf]) -> Result<Report>;
}

/// The built-in line-oriented engine. Constructed once per invocation from
/// the full option set; workers construct their own from the transmitted
/// options.
#[derive(Debug)]
pub struct Engine {
    options: LintOptions,
    rules: RuleSet,
}

impl Engine {
    /// # Errors
    /// Returns an error if the rule configuration file or a `--rule`
    /// override is invalid.
    pub fn new(options: &LintOptions) -> Result<Self> {
        let mut rules = RuleSet::default();

        if let Some(config) = load_rule_config(options)? {
            config.apply_to(&mut rules)?;
        }
        for spec in &options.rules {
            rules.apply_override(spec)?;
        }

        Ok(Self {
            options: options.clone(),
            rules,
        })
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn analyze_file(&self, path: &Path) -> Result<FileReport> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                // An unreadable file is a finding, not a fatal error.
                return Ok(FileReport {
                    file_path: path.to_path_buf(),
                    messages: vec![Message {
                        line: 0,
                        column: 0,
                        severity: Severity::Error,
                        message: format!("Unable to read file: {err}"),
                        rule_id: None,
                    }],
                });
            }
        };

        let outcome = check_text(
            &text,
            &self.rules,
            self.options.fix,
            self.options.allow_inline_config,
        );

        if let Some(fixed) = outcome.fixed {
            fs::write(path, fixed).map_err(|source| ParlintError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }

        Ok(FileReport {
            file_path: path.to_path_buf(),
            messages: outcome.messages,
        })
    }
}

impl AnalysisEngine for Engine {
    fn analyze(&self, files: &[PathBuf]) -> Result<Report> {
        let cache_path = self
            .options
            .cache
            .then(|| crate::cache::resolve_cache_path(&self.options));
        let mut result_cache = cache_path
            .as_deref()
            .map_or_else(ResultCache::new, ResultCache::load_or_default);

        let mut results = Vec::with_capacity(files.len());
        for path in files {
            let key = path.to_string_lossy().into_owned();

            // Fix mode rewrites files, so cached text-derived findings
            // cannot be trusted for it.
            if cache_path.is_some() && !self.options.fix {
                if let Some((mtime, size)) = file_metadata(path) {
                    if let Some(entry) = result_cache.get_if_fresh(&key, mtime, size) {
                        results.push(FileReport {
                            file_path: path.clone(),
                            messages: entry.messages.clone(),
                        });
                        continue;
                    }
                }
            }

            let report = self.analyze_file(path)?;
            if cache_path.is_some() {
                if let Some((mtime, size)) = file_metadata(path) {
                    result_cache.set(&key, mtime, size, report.messages.clone());
                }
            }
            results.push(report);
        }

        if let Some(path) = &cache_path {
            result_cache.save(path)?;
        }

        Ok(Report::from_results(results))
    }
}

fn load_rule_config(options: &LintOptions) -> Result<Option<RuleConfigFile>> {
    if !options.use_config_file {
        return Ok(None);
    }

    let path = match &options.config_file {
        Some(path) => {
            if path.is_absolute() {
                path.clone()
            } else {
                options.cwd.join(path)
            }
        }
        None => {
            let default = options.cwd.join(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(None);
            }
            default
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ParlintError::FileRead {
        path: path.clone(),
        source,
    })?;
    Ok(Some(toml::from_str(&content)?))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
