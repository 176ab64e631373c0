//! Severity lookup and filtering.
//!
//! [`SeverityTable`] maps level names to [`Severity`] values. It is built once
//! and shared between stores behind an `Arc`, so there is no process-wide
//! mutable level table. [`SeverityFilter`] holds a store's threshold.

use crate::error::LogError;
use crate::types::Severity;

/// Immutable, case-insensitive name → severity table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityTable {
    entries: Vec<(String, Severity)>,
}

impl Default for SeverityTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl SeverityTable {
    /// The five standard names: FATAL, ERROR, WARN, INFO, DEBUG.
    pub fn standard() -> Self {
        Self {
            entries: Severity::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), *s))
                .collect(),
        }
    }

    /// A copy of this table that also accepts `name` for `severity`.
    pub fn with_alias(mut self, name: &str, severity: Severity) -> Self {
        let name = name.to_uppercase();
        self.entries.retain(|(existing, _)| *existing != name);
        self.entries.push((name, severity));
        self
    }

    /// Resolve a level name, ignoring case.
    pub fn lookup(&self, name: &str) -> Result<Severity, LogError> {
        let wanted = name.to_uppercase();
        self.entries
            .iter()
            .find(|(entry, _)| *entry == wanted)
            .map(|(_, severity)| *severity)
            .ok_or_else(|| LogError::InvalidLevel {
                name: name.to_string(),
                accepted: self.names().map(str::to_string).collect(),
            })
    }

    /// All accepted names, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

/// `true` iff an event of `event_rank` passes a threshold of `configured_rank`.
pub fn enabled(configured_rank: u8, event_rank: u8) -> bool {
    event_rank <= configured_rank
}

/// A store's severity threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityFilter {
    threshold: Severity,
}

impl SeverityFilter {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    /// Build a filter from a level name.
    pub fn from_name(table: &SeverityTable, name: &str) -> Result<Self, LogError> {
        table.lookup(name).map(Self::new)
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        enabled(self.threshold.rank(), severity.rank())
    }
}
