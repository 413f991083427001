use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use super::candidates::ParseCandidate;

/// Why one candidate was rejected during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The bytes are not valid text in the candidate encoding.
    Decode,
    /// The tokenizer reported an error on the decoded text.
    Tokenize,
    /// Tokenization succeeded but yielded fewer than 2 columns.
    TooFewColumns(usize),
}

/// Stats reported when a candidate is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of data rows in the accepted table.
    pub rows: usize,
    /// Number of columns in the accepted table.
    pub columns: usize,
}

/// Observer interface for the candidate search.
///
/// Implementors can record metrics or logs; the loader itself never acts on
/// observer output. `attempt` is the zero-based position of the candidate in
/// the fixed search order.
pub trait LoadObserver: Send + Sync {
    /// Called once when a candidate is accepted and the search stops.
    fn on_accepted(&self, _candidate: &ParseCandidate, _attempt: usize, _stats: LoadStats) {}

    /// Called for every rejected candidate.
    fn on_rejected(&self, _candidate: &ParseCandidate, _attempt: usize, _reason: &RejectReason) {}

    /// Called when the whole search space is exhausted.
    fn on_exhausted(&self, _attempts: usize) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_accepted(&self, candidate: &ParseCandidate, attempt: usize, stats: LoadStats) {
        for o in &self.observers {
            o.on_accepted(candidate, attempt, stats);
        }
    }

    fn on_rejected(&self, candidate: &ParseCandidate, attempt: usize, reason: &RejectReason) {
        for o in &self.observers {
            o.on_rejected(candidate, attempt, reason);
        }
    }

    fn on_exhausted(&self, attempts: usize) {
        for o in &self.observers {
            o.on_exhausted(attempts);
        }
    }
}

/// Logs candidate outcomes to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl LoadObserver for StdErrObserver {
    fn on_accepted(&self, candidate: &ParseCandidate, attempt: usize, stats: LoadStats) {
        eprintln!(
            "[load][ok] attempt={} encoding={} delimiter={:?} rows={} columns={}",
            attempt,
            candidate.encoding.label(),
            candidate.delimiter as char,
            stats.rows,
            stats.columns
        );
    }

    fn on_rejected(&self, candidate: &ParseCandidate, attempt: usize, reason: &RejectReason) {
        eprintln!(
            "[load][skip] attempt={} encoding={} delimiter={:?} reason={:?}",
            attempt,
            candidate.encoding.label(),
            candidate.delimiter as char,
            reason
        );
    }

    fn on_exhausted(&self, attempts: usize) {
        eprintln!("[load][fail] exhausted {attempts} candidates");
    }
}

/// Appends candidate outcomes to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl LoadObserver for FileObserver {
    fn on_accepted(&self, candidate: &ParseCandidate, attempt: usize, stats: LoadStats) {
        self.append_line(&format!(
            "{} ok attempt={} encoding={} delimiter={:?} rows={} columns={}",
            unix_ts(),
            attempt,
            candidate.encoding.label(),
            candidate.delimiter as char,
            stats.rows,
            stats.columns
        ));
    }

    fn on_rejected(&self, candidate: &ParseCandidate, attempt: usize, reason: &RejectReason) {
        self.append_line(&format!(
            "{} skip attempt={} encoding={} delimiter={:?} reason={:?}",
            unix_ts(),
            attempt,
            candidate.encoding.label(),
            candidate.delimiter as char,
            reason
        ));
    }

    fn on_exhausted(&self, attempts: usize) {
        self.append_line(&format!("{} fail exhausted attempts={}", unix_ts(), attempts));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
