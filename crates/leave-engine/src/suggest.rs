//! Alternative-slot suggestions.
//!
//! Scans the search window left to right against the merged occupied ranges
//! and offers the earliest same-length slot inside each free gap, then one
//! trailing slot after the last occupied range.

use crate::range::{DateRange, Suggestion};

/// Generate up to `max` open slots of the same length as `request`.
///
/// `occupied` must be merged (sorted, disjoint), as produced by
/// [`merge_ranges`](crate::merge::merge_ranges).
///
/// Each suggestion covers exactly `request.days()` days, lies within `window`,
/// and overlaps none of `occupied`. An empty `occupied` list yields the request
/// itself.
pub fn suggest_slots(
    occupied: &[DateRange],
    request: &DateRange,
    window: &DateRange,
    max: usize,
) -> Vec<Suggestion> {
    if max == 0 {
        return Vec::new();
    }
    if occupied.is_empty() {
        return vec![*request];
    }

    let duration = request.days();
    let mut suggestions = Vec::with_capacity(max);
    let mut cursor = window.start;

    for busy in occupied {
        if suggestions.len() >= max {
            break;
        }

        // The gap before `busy` fits the request if the slot ends before it.
        if cursor < busy.start {
            if let Some(slot) = DateRange::starting_at(cursor, duration) {
                if slot.end < busy.start && window.encloses(&slot) {
                    suggestions.push(slot);
                }
            }
        }

        // Occupied through the last representable day: nothing can follow.
        let Some(after) = busy.end.succ_opt() else {
            return suggestions;
        };
        cursor = cursor.max(after);
    }

    // Trailing slot after the last occupied range.
    if suggestions.len() < max && cursor < window.end {
        if let Some(slot) = DateRange::starting_at(cursor, duration) {
            if window.encloses(&slot) {
                suggestions.push(slot);
            }
        }
    }

    suggestions
}
