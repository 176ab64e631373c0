//! Core types for sevlog-core.
//!
//! This module defines the data shared by every store: the [`Severity`] rank,
//! the immutable [`LogEvent`] produced at the call site, and the
//! [`LogDocument`] shape that document backends persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log severity. Lower rank means more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Fatal = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
}

impl Severity {
    /// Every severity, most severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    /// Numeric rank: FATAL=1 … DEBUG=5.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Canonical upper-case name, also used as the split stream name.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log event. Fields are private so an event cannot change between
/// the filter decision and the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    timestamp: DateTime<Utc>,
    severity: Severity,
    message: String,
}

impl LogEvent {
    /// Build an event stamped with the current time.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self::at(Utc::now(), severity, message)
    }

    /// Build an event with an explicit timestamp.
    pub fn at(timestamp: DateTime<Utc>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            severity,
            message: message.into(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The line appended to a file stream, newline included.
    pub fn to_line(&self) -> String {
        format!(
            "{} {}: {}\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.6f"),
            self.severity,
            self.message
        )
    }
}

/// The document persisted by a document backend.
///
/// Field names follow the collection schema: `Timestamp`, `Severity`,
/// `Message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogDocument {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
}

impl From<&LogEvent> for LogDocument {
    fn from(event: &LogEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            severity: event.severity,
            message: event.message.clone(),
        }
    }
}

/// Which stream of a store an event is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// The all-severity stream.
    All,
    /// The dedicated stream of one severity, used when splitting.
    Severity(Severity),
}

impl Stream {
    /// File stem and collection name of the stream.
    pub fn name(self) -> &'static str {
        match self {
            Stream::All => "log",
            Stream::Severity(severity) => severity.as_str(),
        }
    }
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
