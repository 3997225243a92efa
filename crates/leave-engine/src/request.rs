//! Incoming booking requests and their validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::range::DateRange;

/// A time-off request as received from the caller.
///
/// Dates are optional so that a missing field surfaces as a
/// [`ValidationError`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl BookingRequest {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Check the request against `today` and return its date range.
    ///
    /// Rules, in order: both dates present, end not before start, start not
    /// before today, start different from end.
    pub fn validate(&self, today: NaiveDate) -> Result<DateRange> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(ValidationError::MissingDates);
        };
        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }
        if start < today {
            return Err(ValidationError::StartInPast);
        }
        if start == end {
            return Err(ValidationError::TooShort);
        }
        Ok(DateRange::new(start, end))
    }
}
