mod worker;

pub use worker::{WorkerRequest, run_worker};

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;

use crate::cache;
use crate::engine::{AnalysisEngine, Engine};
use crate::error::{ParlintError, Result};
use crate::options::LintOptions;
use crate::report::Report;
use crate::scanner::FileEnumerator;

/// File sets at or below this size are linted in-process; the overhead of
/// spawning workers only pays off past it.
pub const FAN_OUT_THRESHOLD: usize = 50;

/// Execution strategy chosen for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPlan {
    /// One synchronous engine call over the full file list.
    SingleProcess,
    /// One worker process per contiguous chunk of `chunk_size` files.
    FanOut { chunk_size: usize },
}

/// Decide how to execute over `file_count` files.
///
/// A present cache means the run is assumed cheap, so fan-out is skipped
/// regardless of size; so is a host without at least two logical
/// processors.
#[must_use]
pub fn plan(file_count: usize, cached: bool, processor_count: usize) -> ExecutionPlan {
    if cached || file_count <= FAN_OUT_THRESHOLD || processor_count < 2 {
        ExecutionPlan::SingleProcess
    } else {
        ExecutionPlan::FanOut {
            chunk_size: file_count.div_ceil(processor_count),
        }
    }
}

/// Orchestrates one lint invocation: enumeration, strategy choice,
/// dispatch and aggregation.
pub struct Linter<E: AnalysisEngine = Engine> {
    options: LintOptions,
    engine: E,
}

impl Linter {
    /// Build a linter with the built-in engine.
    ///
    /// # Errors
    /// Returns an error if the rule configuration is invalid.
    pub fn new(options: LintOptions) -> Result<Self> {
        let engine = Engine::new(&options)?;
        Ok(Self { options, engine })
    }
}

impl<E: AnalysisEngine> Linter<E> {
    pub const fn with_engine(options: LintOptions, engine: E) -> Self {
        Self { options, engine }
    }

    #[must_use]
    pub const fn options(&self) -> &LintOptions {
        &self.options
    }

    /// One synchronous engine pass over `files`: fixes (if any) have
    /// landed on disk by the time this returns, and quiet mode filters
    /// the results afterwards, so fixed-and-now-clean files are excluded.
    ///
    /// # Errors
    /// Propagates engine configuration errors unmodified.
    pub fn run(&self, files: &[PathBuf]) -> Result<Report> {
        let report = self.engine.analyze(files)?;
        if self.options.quiet {
            Ok(report.error_results())
        } else {
            Ok(report)
        }
    }

    /// Lint everything the patterns match, fanning out across worker
    /// processes when that is worthwhile.
    ///
    /// # Errors
    /// Fails if enumeration or the engine fails, or if any worker process
    /// dies before delivering its report. A failed worker fails the whole
    /// batch; reports from completed workers are discarded, not partially
    /// surfaced.
    pub fn execute(&self, patterns: &[String]) -> Result<Report> {
        let enumerator = FileEnumerator::new(&self.options)?;
        let files = enumerator.lint_targets(patterns)?;

        let cached = cache::has_cache(&self.options);
        match plan(files.len(), cached, num_cpus::get()) {
            ExecutionPlan::SingleProcess => self.run(&files),
            ExecutionPlan::FanOut { chunk_size } => self.fan_out(&files, chunk_size),
        }
    }

    /// Dispatch one worker per chunk, then collect reports in the order
    /// they arrive. Every worker is always waited for; there is no abort
    /// path once dispatch has begun.
    fn fan_out(&self, files: &[PathBuf], chunk_size: usize) -> Result<Report> {
        let (sender, receiver) = mpsc::channel();
        let mut dispatched = 0usize;

        for chunk in files.chunks(chunk_size) {
            let child = spawn_worker(&self.options, chunk)?;
            let sender = sender.clone();
            thread::spawn(move || {
                // Receiver staying open is not this thread's concern.
                let _ = sender.send(collect_report(child));
            });
            dispatched += 1;
        }
        drop(sender);

        let mut reports = Vec::with_capacity(dispatched);
        let mut failed = false;
        for outcome in receiver.iter().take(dispatched) {
            match outcome {
                Ok(report) => reports.push(report),
                Err(_) => failed = true,
            }
        }

        if failed || reports.len() < dispatched {
            return Err(ParlintError::WorkerFailed);
        }
        Ok(Report::aggregate(reports))
    }
}

/// Spawn one worker over `chunk` and hand it its request. The worker is a
/// re-invocation of the current executable in worker role; options are
/// copied to it, never shared.
fn spawn_worker(options: &LintOptions, chunk: &[PathBuf]) -> Result<Child> {
    let exe = std::env::current_exe()?;
    let mut child = Command::new(exe)
        .arg("--worker")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let request = WorkerRequest {
        options: options.clone(),
        files: Some(chunk.to_vec()),
    };
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| ParlintError::WorkerProtocol("worker stdin not captured".to_string()))?;
    serde_json::to_writer(&mut stdin, &request)?;
    stdin.write_all(b"\n")?;
    // Dropping stdin closes the pipe; the worker exits after this request.
    drop(stdin);

    Ok(child)
}

/// Wait for one worker's report. Receiving a report resolves the worker
/// even if its exit status arrives later or is nonzero; end-of-stream
/// without a report is a failure.
fn collect_report(mut child: Child) -> Result<Report> {
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| ParlintError::WorkerProtocol("worker stdout not captured".to_string()))?;

    let mut line = String::new();
    let outcome = match BufReader::new(stdout).read_line(&mut line) {
        Ok(0) | Err(_) => Err(ParlintError::WorkerFailed),
        Ok(_) => serde_json::from_str::<Report>(&line).map_err(|_| ParlintError::WorkerFailed),
    };
    let _ = child.wait();
    outcome
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
