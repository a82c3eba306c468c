//! Bounded, newest-first render history.
//!
//! One entry per observed render. The buffer holds at most `capacity`
//! entries; the sequence counter keeps counting past the bound, so the
//! overlay badge (`total_updates`) stays accurate even after eviction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One diagnostic message, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderLogEntry {
    pub sequence: u64,
    pub message: String,
}

impl fmt::Display for RenderLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}) {}", self.sequence, self.message)
    }
}

/// Bounded newest-first log with a monotone sequence counter.
///
/// Invariants: `entries().len() <= capacity`, and sequences are strictly
/// decreasing from front to back.
#[derive(Debug, Clone)]
pub struct RenderLog {
    entries: Vec<RenderLogEntry>,
    sequence: u64,
    capacity: usize,
}

impl RenderLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            sequence: 1,
            capacity,
        }
    }

    /// Clears all entries and resets the sequence counter to 1.
    ///
    /// Called exactly once, when the monitored component mounts.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.sequence = 1;
    }

    /// Inserts a new entry at the front and evicts the oldest entry if the
    /// buffer now exceeds capacity. At most one entry can be in excess since
    /// at most one append happens per render.
    pub fn append(&mut self, message: impl Into<String>) {
        self.entries.insert(
            0,
            RenderLogEntry {
                sequence: self.sequence,
                message: message.into(),
            },
        );
        self.sequence += 1;
        self.entries.truncate(self.capacity);
    }

    /// Entries in newest-first order.
    pub fn entries(&self) -> &[RenderLogEntry] {
        &self.entries
    }

    /// Total renders observed since the last reset, including evicted ones.
    /// Displayed as the overlay's badge count.
    pub fn total_updates(&self) -> u64 {
        self.sequence - 1
    }
}
