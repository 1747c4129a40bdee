use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::linter::Linter;
use crate::options::LintOptions;

/// Parent-to-worker message. A request without a file list is not meant
/// for this worker (it belongs to some other process in a nested spawn
/// tree) and is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub options: LintOptions,
    #[serde(default)]
    pub files: Option<Vec<PathBuf>>,
}

/// Worker-role entry point: answer each stdin request with one report
/// line on stdout, then exit when the parent closes the pipe.
///
/// Stdout carries only the protocol; diagnostics belong on stderr.
///
/// # Errors
/// Returns an error if a request cannot be parsed or analysis fails; the
/// process then exits nonzero, which the parent treats as a failed chunk.
pub fn run_worker() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let request: WorkerRequest = serde_json::from_str(&line)?;
        let Some(files) = request.files else {
            continue;
        };

        let linter = Linter::new(request.options)?;
        let report = linter.run(&files)?;

        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &report)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
