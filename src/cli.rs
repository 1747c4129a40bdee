use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "parlint")]
#[command(author, version, about = "Parallel lint runner - fans analysis out across worker processes")]
#[command(long_about = "Lints the given files, partitioning large file sets across one worker\n\
    process per logical CPU.\n\n\
    Exit codes:\n  \
    0 - No problems found\n  \
    1 - Problems found, or the run itself failed")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Files, directories or glob patterns to lint
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Environment preset to enable (can be repeated)
    #[arg(long = "env", value_name = "NAME")]
    pub envs: Vec<String>,

    /// File extensions to lint (comma-separated, e.g., js,jsx)
    #[arg(long, value_delimiter = ',', default_value = "js")]
    pub ext: Vec<String>,

    /// Rule override, name or name:severity with severity 0|1|2 (can be repeated)
    #[arg(long = "rule", value_name = "NAME[:LEVEL]")]
    pub rules: Vec<String>,

    /// Plugin to load (can be repeated)
    #[arg(long = "plugin", value_name = "NAME")]
    pub plugins: Vec<String>,

    /// Global variable declaration (can be repeated)
    #[arg(long = "global", value_name = "NAME")]
    pub globals: Vec<String>,

    /// Disable use of ignore files and patterns
    #[arg(long = "no-ignore", action = clap::ArgAction::SetFalse)]
    pub ignore: bool,

    /// Path to the ignore file
    #[arg(long, value_name = "FILE")]
    pub ignore_path: Option<PathBuf>,

    /// Additional ignore pattern (glob syntax, can be repeated)
    #[arg(long = "ignore-pattern", value_name = "GLOB")]
    pub ignore_patterns: Vec<String>,

    /// Path to the rule configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra directory to load rules from (can be repeated)
    #[arg(long = "rulesdir", value_name = "DIR")]
    pub rulesdirs: Vec<PathBuf>,

    /// Skip loading the rule configuration file
    #[arg(long = "no-config-file", action = clap::ArgAction::SetFalse)]
    pub use_config_file: bool,

    /// Parser to use
    #[arg(long, value_name = "NAME")]
    pub parser: Option<String>,

    /// Parser option as key=value (can be repeated)
    #[arg(long = "parser-options", value_name = "KEY=VALUE")]
    pub parser_options: Vec<String>,

    /// Only check changed files using the analysis result cache
    #[arg(long)]
    pub cache: bool,

    /// Path to the cache file
    #[arg(long, value_name = "FILE")]
    pub cache_file: Option<PathBuf>,

    /// File or directory to store the cache in
    #[arg(long, value_name = "PATH")]
    pub cache_location: Option<PathBuf>,

    /// Automatically fix problems that have a known fix
    #[arg(long)]
    pub fix: bool,

    /// Report errors only
    #[arg(long)]
    pub quiet: bool,

    /// Ignore inline disable comments
    #[arg(long = "no-inline-config", action = clap::ArgAction::SetFalse)]
    pub inline_config: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Working directory to resolve paths against
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Run as an analysis worker, reading requests from stdin (internal)
    #[arg(long, hide = true)]
    pub worker: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
