//! In-memory calendar of time-off bookings.
//!
//! `MemoryCalendar` implements both collaborator traits the resolver needs.
//! A single mutex guards the booking list, so the exclusion check in
//! [`BookingStore::insert_pending`] and the write happen atomically: of two
//! concurrent inserts for overlapping ranges, exactly one succeeds.
//!
//! It also carries the approval workflow: a pending booking can be approved
//! or rejected once, and a rejected booking no longer occupies its days.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CalendarError;
use crate::overlap::overlaps;
use crate::range::{BookingStatus, DateRange, OccupiedRange};
use crate::resolver::{BookingStore, CandidateSource, InsertOutcome};

/// Identifier assigned to a stored booking.
pub type BookingId = u64;

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Zero on input means "unassigned"; the calendar assigns one on load.
    #[serde(default)]
    pub id: BookingId,
    #[serde(flatten)]
    pub range: DateRange,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Approval comment or rejection reason, set when the booking is decided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Day the booking was approved or rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_on: Option<NaiveDate>,
}

#[derive(Debug, Default)]
struct Inner {
    bookings: Vec<Booking>,
    /// Highest id handed out so far.
    last_id: BookingId,
}

impl Inner {
    fn allocate_id(&mut self) -> Result<BookingId, CalendarError> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or(CalendarError::IdSpaceExhausted)?;
        self.last_id = id;
        Ok(id)
    }
}

/// Thread-safe in-memory booking calendar.
#[derive(Debug, Default)]
pub struct MemoryCalendar {
    inner: Mutex<Inner>,
}

impl MemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a calendar from existing bookings. Bookings with id `0` get a
    /// fresh id above the highest one present.
    ///
    /// # Errors
    /// `DuplicateId` if two bookings carry the same non-zero id,
    /// `IdSpaceExhausted` if an id must be assigned but none is left.
    pub fn from_bookings(mut bookings: Vec<Booking>) -> Result<Self, CalendarError> {
        let mut seen = HashSet::with_capacity(bookings.len());
        for b in bookings.iter().filter(|b| b.id != 0) {
            if !seen.insert(b.id) {
                return Err(CalendarError::DuplicateId(b.id));
            }
        }

        let mut inner = Inner {
            bookings: Vec::new(),
            last_id: seen.into_iter().max().unwrap_or(0),
        };
        for b in bookings.iter_mut().filter(|b| b.id == 0) {
            b.id = inner.allocate_id()?;
        }
        inner.bookings = bookings;

        Ok(Self {
            inner: Mutex::new(inner),
        })
    }

    /// Parse a JSON array of bookings.
    pub fn from_json(json: &str) -> Result<Self, CalendarError> {
        let bookings: Vec<Booking> = serde_json::from_str(json)?;
        Self::from_bookings(bookings)
    }

    /// Serialize all bookings as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String, CalendarError> {
        let bookings = self.bookings()?;
        Ok(serde_json::to_string_pretty(&bookings)?)
    }

    /// All bookings in insertion order.
    pub fn bookings(&self) -> Result<Vec<Booking>, CalendarError> {
        Ok(self.lock()?.bookings.clone())
    }

    pub fn get(&self, id: BookingId) -> Result<Booking, CalendarError> {
        self.lock()?
            .bookings
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(CalendarError::NotFound(id))
    }

    /// Approve or reject a pending booking, recording `today` as the decision day.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `NotPending` if the booking was already decided.
    pub fn decide(
        &self,
        id: BookingId,
        approve: bool,
        comment: Option<&str>,
        today: NaiveDate,
    ) -> Result<Booking, CalendarError> {
        let mut inner = self.lock()?;
        let booking = inner
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CalendarError::NotFound(id))?;

        if booking.status != BookingStatus::Pending {
            return Err(CalendarError::NotPending(id));
        }

        booking.status = if approve {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        booking.comment = comment.map(str::to_string);
        booking.decided_on = Some(today);
        info!(id, status = ?booking.status, %today, "booking decided");

        Ok(booking.clone())
    }

    /// Remove a booking regardless of status.
    pub fn remove(&self, id: BookingId) -> Result<Booking, CalendarError> {
        let mut inner = self.lock()?;
        let pos = inner
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(CalendarError::NotFound(id))?;
        Ok(inner.bookings.remove(pos))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, CalendarError> {
        self.inner.lock().map_err(|_| CalendarError::Poisoned)
    }
}

impl CandidateSource for MemoryCalendar {
    type Error = CalendarError;

    fn fetch_candidates(
        &self,
        window: &DateRange,
        statuses: &[BookingStatus],
    ) -> Result<Vec<OccupiedRange>, CalendarError> {
        let inner = self.lock()?;
        let candidates: Vec<OccupiedRange> = inner
            .bookings
            .iter()
            .filter(|b| statuses.contains(&b.status) && overlaps(&b.range, window))
            .map(|b| OccupiedRange::new(b.range, b.status))
            .collect();
        debug!(count = candidates.len(), "fetched candidates");
        Ok(candidates)
    }
}

impl BookingStore for MemoryCalendar {
    fn insert_pending(
        &self,
        range: &DateRange,
        note: Option<&str>,
    ) -> Result<InsertOutcome, CalendarError> {
        let mut inner = self.lock()?;

        let taken = inner
            .bookings
            .iter()
            .any(|b| b.status.is_occupying() && overlaps(&b.range, range));
        if taken {
            return Ok(InsertOutcome::RangeTaken);
        }

        let id = inner.allocate_id()?;
        inner.bookings.push(Booking {
            id,
            range: *range,
            status: BookingStatus::Pending,
            note: note.map(str::to_string),
            comment: None,
            decided_on: None,
        });

        Ok(InsertOutcome::Inserted(id))
    }
}
