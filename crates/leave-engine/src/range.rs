//! Whole-day date ranges and the booking statuses attached to them.
//!
//! Every range is inclusive on both ends: `2024-03-01..=2024-03-05` covers five
//! days. There is no time-of-day component anywhere in the engine.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar days. `start <= end` is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range of `days` days beginning at `start`. `days` must be at least 1.
    ///
    /// Returns `None` if the range would run past [`NaiveDate::MAX`].
    pub fn starting_at(start: NaiveDate, days: i64) -> Option<Self> {
        let end = start.checked_add_signed(Duration::days(days - 1))?;
        Some(Self { start, end })
    }

    /// Number of days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `other` lies entirely inside this range.
    pub fn encloses(&self, other: &DateRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Lifecycle status of a stored booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    /// Statuses that hold a slot on the calendar.
    pub const OCCUPYING: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Approved];

    pub fn is_occupying(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }
}

/// A stored booking's range together with its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedRange {
    #[serde(flatten)]
    pub range: DateRange,
    pub status: BookingStatus,
}

impl OccupiedRange {
    pub fn new(range: DateRange, status: BookingStatus) -> Self {
        Self { range, status }
    }
}

/// An open slot offered in place of a conflicting request.
///
/// Always the same length as the request it replaces.
pub type Suggestion = DateRange;
