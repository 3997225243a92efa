//! Error types for leave-engine operations.

use thiserror::Error;

use crate::calendar::BookingId;

/// A booking request that cannot be evaluated. Caller error, never a conflict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Start date and end date are required")]
    MissingDates,

    #[error("End date cannot be before start date")]
    EndBeforeStart,

    #[error("Start date cannot be in the past")]
    StartInPast,

    #[error("Booking must be at least one day long")]
    TooShort,
}

/// Failure while evaluating or booking a request.
///
/// `E` is the error type of the calendar collaborator; its failures are passed
/// through untouched.
#[derive(Error, Debug)]
pub enum EvaluateError<E> {
    #[error("Invalid request: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Calendar error: {0}")]
    Source(#[source] E),
}

/// Errors raised by the in-memory calendar.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    #[error("Only pending bookings can be decided (booking {0})")]
    NotPending(BookingId),

    #[error("Duplicate booking id: {0}")]
    DuplicateId(BookingId),

    #[error("No booking ids left to assign")]
    IdSpaceExhausted,

    #[error("Calendar lock poisoned")]
    Poisoned,

    #[error("Invalid bookings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
