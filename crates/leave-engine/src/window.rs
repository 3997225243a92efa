//! Search window derivation.
//!
//! The window bounds both the candidate fetch and the suggestion scan. Its far
//! edge is pushed out by the request's own length so a same-length slot can
//! still start as late as `end + lookforward`.
//!
//! Both edges saturate at the calendar limits instead of overflowing.

use chrono::{Duration, NaiveDate};

use crate::range::DateRange;

/// Compute the search window for `request`.
///
/// `start - lookback_days ..= end + lookforward_days + request.days()`
pub fn search_window(request: &DateRange, lookback_days: u32, lookforward_days: u32) -> DateRange {
    let start = request
        .start
        .checked_sub_signed(Duration::days(i64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN);
    let end = request
        .end
        .checked_add_signed(Duration::days(i64::from(lookforward_days) + request.days()))
        .unwrap_or(NaiveDate::MAX);
    DateRange::new(start, end)
}
