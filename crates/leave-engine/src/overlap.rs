//! Inclusive-date overlap detection.
//!
//! Unlike instant-based intervals, two day ranges that share a single day
//! (`a.end == b.start`) DO overlap: both bookings would claim that day.

use crate::range::DateRange;

/// Whether two inclusive ranges share at least one day.
pub fn overlaps(a: &DateRange, b: &DateRange) -> bool {
    !(a.end < b.start || a.start > b.end)
}

/// The first occupied range that `candidate` overlaps, if any.
pub fn first_overlap<'a>(candidate: &DateRange, occupied: &'a [DateRange]) -> Option<&'a DateRange> {
    occupied.iter().find(|o| overlaps(candidate, o))
}
