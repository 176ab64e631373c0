//! Store interface shared by the file and document backends.
//!
//! A [`LogStore`] knows how to write one event into one [`Stream`] and how to
//! keep that stream under its ceiling. Filtering and split fan-out are the
//! same for every backend and live in the provided methods.

use crate::error::LogError;
use crate::severity::{SeverityFilter, SeverityTable};
use crate::types::{LogEvent, Severity, Stream};

/// Default capacity of a storage unit: 1000 KB.
pub const DEFAULT_MAX_SIZE: u64 = 1000 * 1024;

/// Construction parameters of a store. Copied into the store when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Least severe level that is still written.
    pub threshold: Severity,
    /// Capacity of one storage unit in bytes.
    pub max_size: u64,
    /// Backlog ceiling for files, document ceiling for collections.
    pub files_amount: usize,
    /// Also write every event to its severity's own stream.
    pub split: bool,
}

impl StoreConfig {
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            max_size: DEFAULT_MAX_SIZE,
            files_amount: 100,
            split: false,
        }
    }

    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    pub fn with_max_size_kb(self, kilobytes: u64) -> Self {
        self.with_max_size(kilobytes.saturating_mul(1024))
    }

    pub fn with_files_amount(mut self, files_amount: usize) -> Self {
        self.files_amount = files_amount;
        self
    }

    pub fn with_split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    pub fn filter(&self) -> SeverityFilter {
        SeverityFilter::new(self.threshold)
    }
}

/// Result of a successful `log` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logged {
    /// The event was below the threshold and nothing was written.
    Filtered,
    /// The event was written to `streams` streams.
    Stored { streams: usize },
}

impl Logged {
    pub fn is_stored(&self) -> bool {
        matches!(self, Logged::Stored { .. })
    }
}

/// A severity-filtered log sink with bounded storage.
pub trait LogStore: Send + Sync {
    /// Table used to resolve level names passed to [`LogStore::log`].
    fn severities(&self) -> &SeverityTable;

    fn filter(&self) -> SeverityFilter;

    /// Whether events are also written to per-severity streams.
    fn splits(&self) -> bool;

    /// Write `event` into `stream`, including that stream's capacity step.
    fn write(&self, stream: Stream, event: &LogEvent) -> Result<(), LogError>;

    /// Bring `stream` back under its ceiling.
    fn enforce_capacity(&self, stream: Stream) -> Result<(), LogError>;

    /// Filter `event` and write it to every stream it belongs to.
    ///
    /// The severity stream is written first, then the all-severity stream. A
    /// failure in one does not stop the other; all failures are returned.
    fn log_event(&self, event: &LogEvent) -> Result<Logged, LogError> {
        if !self.filter().enabled(event.severity()) {
            return Ok(Logged::Filtered);
        }

        let mut targets = Vec::with_capacity(2);
        if self.splits() {
            targets.push(Stream::Severity(event.severity()));
        }
        targets.push(Stream::All);

        let mut streams = 0;
        let mut failures = Vec::new();
        for stream in targets {
            match self.write(stream, event) {
                Ok(()) => streams += 1,
                Err(err) => failures.push(err),
            }
        }
        LogError::collect(failures).map(|()| Logged::Stored { streams })
    }

    fn log_at(&self, message: &str, severity: Severity) -> Result<Logged, LogError> {
        self.log_event(&LogEvent::new(severity, message))
    }

    /// Log `message` at the level called `level` (case-insensitive).
    fn log(&self, message: &str, level: &str) -> Result<Logged, LogError> {
        let severity = self.severities().lookup(level)?;
        self.log_at(message, severity)
    }
}
