//! Changelog timestamp with either day or second precision

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

/// Point in time attached to an [`Entry`](super::Entry)
///
/// Free-text changelogs only carry a calendar date; the field stream and
/// SUSE `.changes` files carry a full instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// Day precision
    Date(NaiveDate),
    /// Second precision, UTC
    Instant(DateTime<Utc>),
}

impl Timestamp {
    /// Build an instant from seconds since the Unix epoch
    pub fn from_epoch(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(Self::Instant)
    }

    /// The instant this timestamp denotes (midnight UTC for dates)
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Date(date) => date.and_time(chrono::NaiveTime::MIN).and_utc(),
            Self::Instant(instant) => *instant,
        }
    }

    /// Seconds since the Unix epoch
    pub fn epoch_seconds(&self) -> i64 {
        self.to_utc().timestamp()
    }

    fn precision_rank(&self) -> u8 {
        match self {
            Self::Date(_) => 0,
            Self::Instant(_) => 1,
        }
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_utc()
            .cmp(&other.to_utc())
            .then_with(|| self.precision_rank().cmp(&other.precision_rank()))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Instant(instant) => write!(f, "{}", instant.format("%Y-%m-%d %H:%M:%S UTC")),
        }
    }
}
