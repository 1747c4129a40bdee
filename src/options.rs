use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::Result;

/// Immutable configuration snapshot handed to the engine and transmitted,
/// never mutated, to every worker process.
///
/// Each CLI flag maps to exactly one field here; an option the engine does
/// not recognize cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintOptions {
    /// Working directory patterns and relative paths are resolved against.
    pub cwd: PathBuf,
    pub envs: Vec<String>,
    pub extensions: Vec<String>,
    /// Rule severity overrides, `name` or `name:0|1|2`.
    pub rules: Vec<String>,
    pub plugins: Vec<String>,
    pub globals: Vec<String>,
    /// Whether ignore files and patterns apply at all.
    pub ignore: bool,
    pub ignore_path: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub config_file: Option<PathBuf>,
    pub rulesdirs: Vec<PathBuf>,
    pub use_config_file: bool,
    pub parser: Option<String>,
    pub parser_options: Vec<String>,
    pub cache: bool,
    pub cache_file: Option<PathBuf>,
    pub cache_location: Option<PathBuf>,
    pub fix: bool,
    pub quiet: bool,
    pub allow_inline_config: bool,
}

impl LintOptions {
    /// Translate parsed CLI flags into the engine's option shape.
    ///
    /// # Errors
    /// Returns an error if no working directory was given and the current
    /// one cannot be determined.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = match &cli.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        // A canonical cwd keeps ignore matching and dedup consistent across
        // the orchestrator and its workers.
        let cwd = cwd.canonicalize().unwrap_or(cwd);

        Ok(Self {
            cwd,
            envs: cli.envs.clone(),
            extensions: cli.ext.clone(),
            rules: cli.rules.clone(),
            plugins: cli.plugins.clone(),
            globals: cli.globals.clone(),
            ignore: cli.ignore,
            ignore_path: cli.ignore_path.clone(),
            ignore_patterns: cli.ignore_patterns.clone(),
            config_file: cli.config.clone(),
            rulesdirs: cli.rulesdirs.clone(),
            use_config_file: cli.use_config_file,
            parser: cli.parser.clone(),
            parser_options: cli.parser_options.clone(),
            cache: cli.cache,
            cache_file: cli.cache_file.clone(),
            cache_location: cli.cache_location.clone(),
            fix: cli.fix,
            quiet: cli.quiet,
            allow_inline_config: cli.inline_config,
        })
    }
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            envs: Vec::new(),
            extensions: vec!["js".to_string()],
            rules: Vec::new(),
            plugins: Vec::new(),
            globals: Vec::new(),
            ignore: true,
            ignore_path: None,
            ignore_patterns: Vec::new(),
            config_file: None,
            rulesdirs: Vec::new(),
            use_config_file: true,
            parser: None,
            parser_options: Vec::new(),
            cache: false,
            cache_file: None,
            cache_location: None,
            fix: false,
            quiet: false,
            allow_inline_config: true,
        }
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
