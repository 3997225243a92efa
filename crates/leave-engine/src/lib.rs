//! # leave-engine
//!
//! Conflict detection and alternative-slot suggestions for whole-day time-off
//! bookings on a shared calendar.
//!
//! Given a requested date range and the bookings already on the calendar, the
//! engine decides whether the request collides with an occupying booking and,
//! if it does, offers a handful of nearby open ranges of the same length.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use leave_engine::{
//!     BookingRequest, BookingStore, ConflictResolver, Decision, EngineConfig, FixedClock,
//!     MemoryCalendar,
//! };
//! use leave_engine::range::DateRange;
//!
//! let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
//! let calendar = MemoryCalendar::new();
//! calendar.insert_pending(&DateRange::new(day(2, 12), day(2, 17)), None).unwrap();
//!
//! let resolver = ConflictResolver::new(EngineConfig::default(), FixedClock(day(1, 1)));
//! let decision = resolver
//!     .evaluate(&BookingRequest::new(day(2, 10), day(2, 15)), &calendar)
//!     .unwrap();
//!
//! let Decision::Rejected(rejection) = decision else { panic!("expected a conflict") };
//! assert_eq!(rejection.requested_days, 6);
//! assert_eq!(rejection.suggestions[0], DateRange::new(day(1, 11), day(1, 16)));
//! ```
//!
//! ## Modules
//!
//! - [`range`] — `DateRange`, `BookingStatus`, `OccupiedRange`
//! - [`window`] — search window derivation
//! - [`merge`] — coalesce overlapping and adjacent ranges
//! - [`overlap`] — inclusive-date overlap test
//! - [`suggest`] — same-length open slot suggestions
//! - [`resolver`] — `ConflictResolver`, `Decision`, collaborator traits
//! - [`request`] — incoming requests and validation
//! - [`calendar`] — thread-safe in-memory calendar with approval workflow
//! - [`clock`] — "today" sources
//! - [`config`] — horizons and suggestion limit
//! - [`error`] — Error types

pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod merge;
pub mod overlap;
pub mod range;
pub mod request;
pub mod resolver;
pub mod suggest;
pub mod window;

pub use calendar::{Booking, BookingId, MemoryCalendar};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use error::{CalendarError, EvaluateError, ValidationError};
pub use merge::merge_ranges;
pub use overlap::overlaps;
pub use request::BookingRequest;
pub use resolver::{
    BookingOutcome, BookingStore, CandidateSource, ConflictResolver, Decision, InsertOutcome,
    Rejection,
};
pub use suggest::suggest_slots;
pub use window::search_window;
