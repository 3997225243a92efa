//! Conflict resolution for new time-off bookings.
//!
//! Ties the pieces together: validate the request, derive the search window,
//! fetch occupied bookings from the calendar collaborator, merge them, test
//! the request for overlap, and on conflict build a rejection carrying
//! same-length alternatives that start no earlier than tomorrow.
//!
//! The resolver holds no mutable state. Preventing two concurrent requests
//! from both passing the check is the calendar's job: [`BookingStore`]
//! implementations must enforce range exclusion on insert and report a lost
//! race as [`InsertOutcome::RangeTaken`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calendar::BookingId;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::EvaluateError;
use crate::merge::merge_ranges;
use crate::overlap::first_overlap;
use crate::range::{BookingStatus, DateRange, OccupiedRange, Suggestion};
use crate::request::BookingRequest;
use crate::suggest::suggest_slots;
use crate::window::search_window;

/// Message carried by every scheduling rejection.
pub const CONFLICT_MESSAGE: &str = "Requested time off overlaps with an existing booking";

/// Read access to stored bookings.
pub trait CandidateSource {
    type Error;

    /// Return every stored booking whose range intersects `window` and whose
    /// status is in `statuses`. Order is not significant.
    fn fetch_candidates(
        &self,
        window: &DateRange,
        statuses: &[BookingStatus],
    ) -> Result<Vec<OccupiedRange>, Self::Error>;
}

/// Result of attempting to store a new booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(BookingId),
    /// The store's exclusion check found an occupying booking on one of the days.
    RangeTaken,
}

/// A calendar that can also store new bookings.
pub trait BookingStore: CandidateSource {
    /// Store `range` as a [`BookingStatus::Pending`] booking, unless an
    /// occupying booking already covers any of its days.
    ///
    /// The exclusion check and the write must be atomic with respect to other
    /// inserts.
    fn insert_pending(
        &self,
        range: &DateRange,
        note: Option<&str>,
    ) -> Result<InsertOutcome, Self::Error>;
}

/// Details of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub message: String,
    /// Open ranges of the requested length, ascending by start.
    pub suggestions: Vec<Suggestion>,
    pub requested_days: i64,
}

/// Outcome of evaluating a request against the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allowed,
    Rejected(Rejection),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Outcome of the full booking workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingOutcome {
    Booked(BookingId),
    Rejected(Rejection),
}

/// Evaluates requests against a calendar.
#[derive(Debug, Clone)]
pub struct ConflictResolver<C = SystemClock> {
    config: EngineConfig,
    clock: C,
}

impl<C: Clock> ConflictResolver<C> {
    pub fn new(config: EngineConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Decide whether `request` can be booked.
    ///
    /// # Errors
    /// Returns `EvaluateError::Invalid` for a malformed request (checked before
    /// anything is fetched) and `EvaluateError::Source` when the calendar fails.
    /// A scheduling conflict is not an error; it is `Decision::Rejected`.
    pub fn evaluate<S: CandidateSource>(
        &self,
        request: &BookingRequest,
        source: &S,
    ) -> Result<Decision, EvaluateError<S::Error>> {
        let today = self.clock.today();
        let requested = request.validate(today)?;
        self.check(&requested, today, source)
    }

    /// Evaluate `request` and, if allowed, store it as a pending booking.
    ///
    /// When the store's exclusion check rejects the write, the calendar is
    /// read again and the request is rejected with suggestions computed from
    /// the refreshed bookings.
    pub fn book<S: BookingStore>(
        &self,
        request: &BookingRequest,
        store: &S,
    ) -> Result<BookingOutcome, EvaluateError<S::Error>> {
        let today = self.clock.today();
        let requested = request.validate(today)?;

        if let Decision::Rejected(rejection) = self.check(&requested, today, store)? {
            return Ok(BookingOutcome::Rejected(rejection));
        }

        match store
            .insert_pending(&requested, request.note.as_deref())
            .map_err(EvaluateError::Source)?
        {
            InsertOutcome::Inserted(id) => {
                info!(id, start = %requested.start, end = %requested.end, "booked");
                Ok(BookingOutcome::Booked(id))
            }
            InsertOutcome::RangeTaken => {
                warn!(
                    start = %requested.start,
                    end = %requested.end,
                    "range taken between check and insert"
                );
                let window = self.window_for(&requested);
                let occupied = fetch_occupied(store, &window)?;
                Ok(BookingOutcome::Rejected(
                    self.reject(&requested, &window, &occupied, today),
                ))
            }
        }
    }

    fn window_for(&self, requested: &DateRange) -> DateRange {
        search_window(
            requested,
            self.config.lookback_days,
            self.config.lookforward_days,
        )
    }

    fn check<S: CandidateSource>(
        &self,
        requested: &DateRange,
        today: NaiveDate,
        source: &S,
    ) -> Result<Decision, EvaluateError<S::Error>> {
        let window = self.window_for(requested);
        debug!(start = %window.start, end = %window.end, "search window");

        let occupied = fetch_occupied(source, &window)?;

        match first_overlap(requested, &occupied) {
            None => {
                info!(start = %requested.start, end = %requested.end, "allowed");
                Ok(Decision::Allowed)
            }
            Some(hit) => {
                info!(
                    start = %requested.start,
                    end = %requested.end,
                    conflict_start = %hit.start,
                    conflict_end = %hit.end,
                    "rejected"
                );
                Ok(Decision::Rejected(
                    self.reject(requested, &window, &occupied, today),
                ))
            }
        }
    }

    fn reject(
        &self,
        requested: &DateRange,
        window: &DateRange,
        occupied: &[DateRange],
        today: NaiveDate,
    ) -> Rejection {
        // No day after `today` exists at the calendar's end, so nothing can be offered.
        let suggestions: Vec<Suggestion> = match today.succ_opt() {
            Some(earliest) => {
                suggest_slots(occupied, requested, window, self.config.max_suggestions)
                    .into_iter()
                    .filter(|s| s.start >= earliest)
                    .collect()
            }
            None => Vec::new(),
        };
        debug!(count = suggestions.len(), "suggestions");

        Rejection {
            message: CONFLICT_MESSAGE.to_string(),
            suggestions,
            requested_days: requested.days(),
        }
    }
}

/// Fetch occupying bookings inside `window` and merge them.
fn fetch_occupied<S: CandidateSource>(
    source: &S,
    window: &DateRange,
) -> Result<Vec<DateRange>, EvaluateError<S::Error>> {
    let candidates = source
        .fetch_candidates(window, &BookingStatus::OCCUPYING)
        .map_err(EvaluateError::Source)?;

    let ranges: Vec<DateRange> = candidates
        .iter()
        .filter(|c| c.status.is_occupying())
        .map(|c| c.range)
        .collect();
    let merged = merge_ranges(&ranges);
    debug!(
        candidates = candidates.len(),
        merged = merged.len(),
        "occupied ranges"
    );

    Ok(merged)
}
