use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use indexmap::IndexSet;

use crate::error::{ParlintError, Result};
use crate::options::LintOptions;

/// Ignore file consulted when no `--ignore-path` is given.
pub const DEFAULT_IGNORE_FILE: &str = ".parlintignore";

/// One candidate file produced by enumeration. Ignored entries are kept and
/// tagged; the caller decides whether to dispatch them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub ignored: bool,
}

/// Expands glob patterns, literal paths and directories into a deduplicated
/// list of candidate files, tagging each with its ignore status.
pub struct FileEnumerator<'a> {
    options: &'a LintOptions,
    matcher: IgnoreMatcher,
}

impl<'a> FileEnumerator<'a> {
    /// # Errors
    /// Returns an error if the ignore file or an ignore pattern is invalid.
    pub fn new(options: &'a LintOptions) -> Result<Self> {
        let matcher = IgnoreMatcher::build(options)?;
        Ok(Self { options, matcher })
    }

    /// Expand `patterns` against the filesystem rooted at the configured
    /// working directory.
    ///
    /// Order is walk order, deterministic for an identical directory
    /// snapshot; duplicates are collapsed by resolved absolute path,
    /// keeping the first occurrence. A pattern matching nothing yields no
    /// entries and is not an error at this layer.
    ///
    /// # Errors
    /// Returns an error if a pattern is not a valid glob.
    pub fn enumerate(&self, patterns: &[String]) -> Result<Vec<FileEntry>> {
        let mut seen: IndexSet<PathBuf> = IndexSet::new();
        let mut entries = Vec::new();

        for pattern in patterns {
            let candidate = self.resolve(pattern);
            if candidate.is_file() {
                // Literal file paths are linted regardless of extension.
                self.push_entry(candidate, &mut seen, &mut entries);
            } else if candidate.is_dir() {
                for path in walk_files(&candidate) {
                    if self.has_lintable_extension(&path) {
                        self.push_entry(path, &mut seen, &mut entries);
                    }
                }
            } else {
                let glob = compile_glob(pattern)?;
                for path in walk_files(&self.options.cwd) {
                    if self.has_lintable_extension(&path)
                        && glob_matches(&glob, &self.options.cwd, &path)
                    {
                        self.push_entry(path, &mut seen, &mut entries);
                    }
                }
            }
        }

        Ok(entries)
    }

    /// Like [`enumerate`](Self::enumerate), reduced to the non-ignored
    /// paths the engine should actually see.
    ///
    /// # Errors
    /// Returns an error if a pattern is not a valid glob.
    pub fn lint_targets(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        Ok(self
            .enumerate(patterns)?
            .into_iter()
            .filter(|entry| !entry.ignored)
            .map(|entry| entry.path)
            .collect())
    }

    fn resolve(&self, pattern: &str) -> PathBuf {
        let path = Path::new(pattern);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.options.cwd.join(path)
        }
    }

    fn has_lintable_extension(&self, path: &Path) -> bool {
        if self.options.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.options.extensions.iter().any(|e| e == ext))
    }

    fn push_entry(&self, path: PathBuf, seen: &mut IndexSet<PathBuf>, entries: &mut Vec<FileEntry>) {
        let resolved = path.canonicalize().unwrap_or(path);
        if seen.insert(resolved.clone()) {
            let ignored = self.matcher.is_ignored(&resolved);
            entries.push(FileEntry {
                path: resolved,
                ignored,
            });
        }
    }
}

/// Ignore-file and ignore-pattern rules, disabled entirely by `--no-ignore`.
struct IgnoreMatcher {
    gitignore: Gitignore,
    enabled: bool,
}

impl IgnoreMatcher {
    fn build(options: &LintOptions) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(&options.cwd);

        if options.ignore {
            let ignore_file = options
                .ignore_path
                .clone()
                .map(|p| {
                    if p.is_absolute() {
                        p
                    } else {
                        options.cwd.join(p)
                    }
                })
                .unwrap_or_else(|| options.cwd.join(DEFAULT_IGNORE_FILE));
            if ignore_file.is_file() {
                if let Some(err) = builder.add(&ignore_file) {
                    return Err(ParlintError::Config(format!(
                        "invalid ignore file {}: {err}",
                        ignore_file.display()
                    )));
                }
            }
            for pattern in &options.ignore_patterns {
                builder
                    .add_line(None, pattern)
                    .map_err(|err| ParlintError::Config(format!("invalid ignore pattern: {err}")))?;
            }
        }

        let gitignore = builder
            .build()
            .map_err(|err| ParlintError::Config(format!("invalid ignore rules: {err}")))?;

        Ok(Self {
            gitignore,
            enabled: options.ignore,
        })
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.enabled
            && self
                .gitignore
                .matched_path_or_any_parents(path, false)
                .is_ignore()
    }
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ParlintError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn glob_matches(glob: &GlobMatcher, cwd: &Path, path: &Path) -> bool {
    if glob.is_match(path) {
        return true;
    }
    path.strip_prefix(cwd)
        .is_ok_and(|relative| glob.is_match(relative))
}

/// Walk `root` recursively, yielding files in a deterministic order.
/// Hidden files are skipped; ignore rules are applied by the caller so
/// ignored entries can still be tagged rather than silently dropped.
fn walk_files(root: &Path) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    builder
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
