//! Fan-out of per-file checks across a bounded pool of concurrent tasks.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::check::{self, CheckOutcome};
use crate::config::Config;
use crate::report;

/// Aggregate counts for one run. `checked == passed + failed`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub checked: u64,
    pub passed: u64,
    pub failed: u64,
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Read newline-delimited paths from `input` and check each one, at most
/// `config.workers` at a time.
///
/// Successful checks write a client command to `primary`; every check writes
/// a summary line (and failures an error line) to `diagnostic`. The writers
/// are mutex-guarded so each line comes out whole, but there is no ordering
/// guarantee across files. Per-file failures never fail the run; only an
/// unreadable input stream does.
pub async fn run_checks(
    config: &Config,
    input: impl BufRead,
    primary: Box<dyn Write + Send>,
    diagnostic: Box<dyn Write + Send>,
) -> Result<RunSummary> {
    let paths = read_paths(input)?;
    debug!(
        "dispatching {} path(s) across {} worker(s)",
        paths.len(),
        config.workers
    );

    let primary: SharedWriter = Arc::new(Mutex::new(primary));
    let diagnostic: SharedWriter = Arc::new(Mutex::new(diagnostic));
    let semaphore = Arc::new(Semaphore::new(config.workers));
    let timeout = Duration::from_secs(config.connection_timeout_secs);
    let use_dirname = config.use_dirname_instead_of_localhost;

    let mut tasks = JoinSet::new();
    for path in paths {
        let semaphore = Arc::clone(&semaphore);
        let primary = Arc::clone(&primary);
        let diagnostic = Arc::clone(&diagnostic);
        tasks.spawn(async move {
            // The permit covers the whole check, connect wait included, so at
            // most `workers` connection attempts are in flight at once.
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("semaphore is never closed");
            let outcome = check::check_file(&path, timeout, use_dirname).await;
            emit(&outcome, &primary, &diagnostic);
            outcome.passed()
        });
    }

    let mut summary = RunSummary::default();
    while let Some(joined) = tasks.join_next().await {
        let passed = joined.context("checker task panicked")?;
        summary.checked += 1;
        if passed {
            summary.passed += 1;
        } else {
            summary.failed += 1;
        }
    }
    flush(&primary);
    flush(&diagnostic);
    Ok(summary)
}

fn emit(outcome: &CheckOutcome, primary: &SharedWriter, diagnostic: &SharedWriter) {
    if outcome.passed() {
        write_line(primary, &report::client_command(&outcome.params));
    }
    if let Some(error) = &outcome.error {
        write_line(diagnostic, &report::error_line(error));
    }
    write_line(diagnostic, &report::summary_line(&outcome.params, outcome.passed()));
}

/// One locked write-and-flush per line; concurrent workers cannot interleave
/// partial lines. A failed write (e.g. a closed pipe) is logged, not fatal.
fn write_line(writer: &SharedWriter, line: &str) {
    let mut guard = writer
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Err(error) = writeln!(guard, "{line}").and_then(|()| guard.flush()) {
        warn!("output write failed: {error}");
    }
}

fn flush(writer: &SharedWriter) {
    let mut guard = writer
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Err(error) = guard.flush() {
        warn!("output flush failed: {error}");
    }
}

/// Collect trimmed, non-blank lines from the input stream. A stream-level
/// read error here is the one thing that aborts the whole run.
fn read_paths(input: impl BufRead) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in input.lines() {
        let line = line.context("failed to read input path list")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}
