//! Rotation policy for file streams.
//!
//! A stream is a sequence of units indexed from 0 (active) to N (oldest
//! backlog). The policy decides when the active unit is full and produces a
//! [`RotationPlan`]: which indices to delete and which to shift up by one.
//! Executing the plan is up to the store.

/// Size and backlog limits of a file stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    max_size: u64,
    files_amount: usize,
}

/// Steps of one rotation, in execution order: every `evict` first, then every
/// `shift`. Index 0 is the active unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RotationPlan {
    /// Indices to delete, highest first.
    pub evict: Vec<usize>,
    /// `(from, to)` renames, highest `from` first so no live unit is overwritten.
    pub shift: Vec<(usize, usize)>,
    /// Backlog length once the plan has run. A leftover unit at
    /// `retained + 1` would extend the backlog past the ceiling and must be
    /// removed by the store.
    pub retained: usize,
}

impl RotationPolicy {
    /// `max_size` is in bytes, `files_amount` is the backlog ceiling.
    pub fn new(max_size: u64, files_amount: usize) -> Self {
        Self {
            max_size,
            files_amount,
        }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn files_amount(&self) -> usize {
        self.files_amount
    }

    /// `active_size` is `None` when the active unit does not exist yet.
    pub fn needs_rotation(&self, active_size: Option<u64>) -> bool {
        matches!(active_size, Some(size) if size >= self.max_size)
    }

    /// Plan a rotation for a stream that currently has `backlog_len` backlog
    /// units (indices `1..=backlog_len`).
    ///
    /// After the plan runs the backlog holds `min(backlog_len + 1, files_amount)`
    /// contiguous units and index 0 is free. With a ceiling of 0 the active
    /// unit is deleted along with any leftover backlog.
    pub fn plan(&self, backlog_len: usize) -> RotationPlan {
        if self.files_amount == 0 {
            return RotationPlan {
                evict: (0..=backlog_len).rev().collect(),
                shift: Vec::new(),
                retained: 0,
            };
        }

        // Units that survive the rotation and move up one slot.
        let keep = backlog_len.min(self.files_amount - 1);
        RotationPlan {
            evict: (keep + 1..=backlog_len).rev().collect(),
            shift: (0..=keep).rev().map(|i| (i, i + 1)).collect(),
            retained: keep + 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
