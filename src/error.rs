use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParlintError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A worker process died before delivering its report. Deliberately
    /// carries no detail; the whole batch is discarded (see `linter`).
    #[error("linting failed")]
    WorkerFailed,

    #[error("Worker protocol error: {0}")]
    WorkerProtocol(String),
}

pub type Result<T> = std::result::Result<T, ParlintError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
