//! Eviction policy for capped document collections.
//!
//! Two independent ceilings are checked after every insert: document count
//! and aggregate size. Each violated ceiling removes exactly one document, the
//! oldest. There is no loop; a collection that is still over a ceiling after
//! one removal is brought down by later writes.

/// The two ceilings of a capped collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictionPolicy {
    max_documents: u64,
    max_bytes: u64,
}

/// Which ceiling triggered an eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ceiling {
    Count,
    Size,
}

impl std::fmt::Display for Ceiling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ceiling::Count => write!(f, "count"),
            Ceiling::Size => write!(f, "size"),
        }
    }
}

impl EvictionPolicy {
    pub fn new(max_documents: u64, max_bytes: u64) -> Self {
        Self {
            max_documents,
            max_bytes,
        }
    }

    pub fn max_documents(&self) -> u64 {
        self.max_documents
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn count_exceeded(&self, count: u64) -> bool {
        count > self.max_documents
    }

    pub fn size_exceeded(&self, bytes: u64) -> bool {
        bytes > self.max_bytes
    }

    /// Whether `ceiling` is exceeded by `value`.
    pub fn exceeded(&self, ceiling: Ceiling, value: u64) -> bool {
        match ceiling {
            Ceiling::Count => self.count_exceeded(value),
            Ceiling::Size => self.size_exceeded(value),
        }
    }
}
