//! Line ingestion: turns a text stream into log events.
//!
//! Each non-empty line becomes one event. A leading level word (`ERROR`,
//! `error:`) picks the severity and is stripped from the message; any other
//! line is logged at the default severity.

use sevlog_core::{LogError, LogEvent, Logged, Severity, SeverityTable};
use sevlog_stores::WriterHandle;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Counts of what happened to the ingested lines.
#[derive(Debug, Default)]
pub struct IngestSummary {
    pub stored: usize,
    pub filtered: usize,
    /// One entry per line that could not be stored.
    pub errors: Vec<LogError>,
}

impl IngestSummary {
    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}

/// Split a leading level word off `line`.
pub fn parse_line<'a>(line: &'a str, table: &SeverityTable, default: Severity) -> (Severity, &'a str) {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim_start()))
        .unwrap_or((line, ""));

    match table.lookup(word.trim_end_matches(':')) {
        Ok(severity) => (severity, rest),
        Err(_) => (default, line),
    }
}

/// Read `reader` to the end, sending every line through `writer`.
pub async fn ingest<R>(
    reader: R,
    writer: &WriterHandle,
    table: &SeverityTable,
    default: Severity,
) -> std::io::Result<IngestSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = IngestSummary::default();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let (severity, message) = parse_line(&line, table, default);
        match writer.log_event(LogEvent::new(severity, message)).await {
            Ok(Logged::Stored { .. }) => summary.stored += 1,
            Ok(Logged::Filtered) => summary.filtered += 1,
            Err(err) => summary.errors.push(err),
        }
    }
    tracing::debug!(
        stored = summary.stored,
        filtered = summary.filtered,
        failed = summary.failed(),
        "ingest finished"
    );
    Ok(summary)
}
