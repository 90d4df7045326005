//! Concurrent fan-out/fan-in over the file list.
//!
//! Each file is scanned by its own tokio task; at most
//! [`EngineOptions::workers`] are in flight at once. Tasks share nothing
//! mutable: they receive an `Arc<FileScanner>` and hand back an owned
//! [`LicenseMap`]. The collector loop in [`Engine::aggregate`] is the only
//! writer of the aggregate, so no locking is involved.

pub mod merge;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use log::{debug, warn};
use tokio::task::JoinError;

use crate::error::ScanError;
use crate::models::LicenseGroup;
use crate::scanner::FileScanner;
use merge::LicenseMap;

/// Default per-file time limit.
pub const DEFAULT_FILE_TIMEOUT: Duration = Duration::from_secs(30);

/// How long runtime shutdown waits for blocking-pool threads.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Worker count used when none is configured: every CPU but two on machines
/// with more than two, otherwise all of them.
pub fn default_workers() -> usize {
    let cpus = num_cpus::get();
    if cpus > 2 {
        cpus - 2
    } else {
        cpus.max(1)
    }
}

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Maximum number of files scanned concurrently. Must be at least 1.
    pub workers: usize,
    /// Limit for reading and scanning a single file.
    pub file_timeout: Duration,
    /// Limit for the whole run; exceeding it aborts with no result.
    pub run_timeout: Option<Duration>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            file_timeout: DEFAULT_FILE_TIMEOUT,
            run_timeout: None,
        }
    }
}

/// A file that was skipped, and why.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ScanError,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct ScanOutcome {
    pub licenses: LicenseMap,
    /// Files handed to the engine.
    pub total: usize,
    /// Files read and scanned successfully, with or without findings.
    pub scanned: usize,
    pub failures: Vec<FileFailure>,
}

impl ScanOutcome {
    pub fn groups(&self) -> Vec<LicenseGroup> {
        self.licenses.groups()
    }

    pub fn skipped(&self) -> usize {
        self.failures.len()
    }
}

pub struct Engine {
    scanner: Arc<FileScanner>,
    options: EngineOptions,
    progress: ProgressBar,
}

impl Engine {
    pub fn new(scanner: FileScanner, options: EngineOptions) -> Result<Self, ScanError> {
        if options.workers == 0 {
            return Err(ScanError::Aggregation(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            scanner: Arc::new(scanner),
            options,
            progress: ProgressBar::hidden(),
        })
    }

    /// Report per-file progress on `progress`. Hidden by default.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn scanner(&self) -> &FileScanner {
        &self.scanner
    }

    /// Scan `files` concurrently and merge their findings.
    ///
    /// Per-file failures are collected in [`ScanOutcome::failures`]; only a
    /// failure of the machinery itself (a cancelled task, the run timeout)
    /// returns `Err`, in which case no partial result is produced.
    pub async fn aggregate(&self, files: Vec<PathBuf>) -> Result<ScanOutcome, ScanError> {
        within_run_limit(self.options.run_timeout, self.collect(files)).await
    }

    async fn collect(&self, files: Vec<PathBuf>) -> Result<ScanOutcome, ScanError> {
        let total = files.len();
        self.progress.set_length(total as u64);

        let file_timeout = self.options.file_timeout;
        let mut results = stream::iter(files)
            .map(|path| {
                let scanner = Arc::clone(&self.scanner);
                async move {
                    let handle = tokio::spawn(scan_file(scanner, path.clone(), file_timeout));
                    (path, handle.await)
                }
            })
            .buffer_unordered(self.options.workers);

        let mut licenses = LicenseMap::new();
        let mut scanned = 0;
        let mut failures = Vec::new();

        while let Some((path, joined)) = results.next().await {
            match settle(path, joined)? {
                Settled::Scanned(found) => {
                    scanned += 1;
                    licenses.merge(found);
                }
                Settled::Skipped(failure) => {
                    warn!("skipping {}: {}", failure.path.display(), failure.error);
                    failures.push(failure);
                }
            }
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();

        Ok(ScanOutcome {
            licenses,
            total,
            scanned,
            failures,
        })
    }
}

enum Settled {
    Scanned(LicenseMap),
    Skipped(FileFailure),
}

/// Classify one finished task. Per-file errors and panics skip the file;
/// anything else aborts the run.
fn settle(
    path: PathBuf,
    joined: Result<Result<LicenseMap, ScanError>, JoinError>,
) -> Result<Settled, ScanError> {
    match joined {
        Ok(Ok(found)) => Ok(Settled::Scanned(found)),
        Ok(Err(error)) if error.is_per_file() => Ok(Settled::Skipped(FileFailure { path, error })),
        Ok(Err(error)) => Err(error),
        Err(join_err) if join_err.is_panic() => {
            let error = ScanError::WorkerPanicked { path: path.clone() };
            Ok(Settled::Skipped(FileFailure { path, error }))
        }
        Err(join_err) => Err(ScanError::Aggregation(format!(
            "worker for {} did not complete: {}",
            path.display(),
            join_err
        ))),
    }
}

async fn within_run_limit<F>(limit: Option<Duration>, run: F) -> Result<ScanOutcome, ScanError>
where
    F: Future<Output = Result<ScanOutcome, ScanError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, run).await.map_err(|_| {
            ScanError::Aggregation(format!("run exceeded {}s", limit.as_secs()))
        })?,
        None => run.await,
    }
}

/// Run `future` on a fresh multi-threaded runtime, then shut the runtime down
/// waiting at most [`SHUTDOWN_GRACE`] for its blocking pool.
///
/// A read that outlived its file timeout keeps a blocking thread busy; that
/// thread is abandoned here instead of being joined, so it cannot hold the
/// process open after the report is written.
pub fn block_on<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    Ok(output)
}

/// Read one file and scan it. Reading is the only await point; the scan runs
/// on the blocking pool.
async fn scan_file(
    scanner: Arc<FileScanner>,
    path: PathBuf,
    limit: Duration,
) -> Result<LicenseMap, ScanError> {
    let work = async {
        debug!("Processing file: {}", path.display());
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| ScanError::FileRead {
                path: path.clone(),
                source,
            })?;

        let task_path = path.clone();
        tokio::task::spawn_blocking(move || {
            let text = String::from_utf8_lossy(&bytes);
            scanner.scan_text(&task_path, &text)
        })
        .await
        .map_err(|_| ScanError::WorkerPanicked { path: path.clone() })
    };

    tokio::time::timeout(limit, work)
        .await
        .map_err(|_| ScanError::FileTimeout {
            path: path.clone(),
            secs: limit.as_secs(),
        })?
}
