//! Changelog entry data model

use std::cmp::{Ordering, Reverse};

use super::Timestamp;

/// One change record produced by a changelog parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Package (or other object) the change applies to
    ///
    /// `None` when a single, already-scoped stream was parsed.
    pub subject: Option<String>,

    /// Who made the change, usually "Name <email>"
    pub author: String,

    /// When the change was made
    pub timestamp: Timestamp,

    /// 1-based line number of the header line within its source stream
    ///
    /// Only meaningful as a tie-break between entries of the same stream.
    pub sequence: usize,

    /// Description text, every line terminated by `\n`
    pub body: String,
}

impl Entry {
    /// Subject for display, empty when absent
    pub fn display_subject(&self) -> &str {
        self.subject.as_deref().unwrap_or_default()
    }

    /// Total-order key: `(timestamp, subject, -sequence)` ascending
    ///
    /// Rendering walks this order backwards, so a later line of the same
    /// stream sorting first restores top-to-bottom order on output.
    pub fn sort_key(&self) -> (&Timestamp, Option<&str>, Reverse<usize>) {
        (
            &self.timestamp,
            self.subject.as_deref(),
            Reverse(self.sequence),
        )
    }

    /// Compare two entries by [`Entry::sort_key`]
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
