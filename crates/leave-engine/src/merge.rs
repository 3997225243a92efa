//! Coalesce occupied ranges into a minimal sorted list.
//!
//! Ranges that overlap, or that sit back-to-back with zero free days between
//! them, collapse into one. A single free day keeps two ranges apart.

use crate::range::DateRange;

/// Merge overlapping or zero-gap-adjacent ranges.
///
/// Returns ranges sorted by start, pairwise disjoint, with at least one free
/// day between consecutive entries. The set of covered days is unchanged.
pub fn merge_ranges(ranges: &[DateRange]) -> Vec<DateRange> {
    if ranges.is_empty() {
        return Vec::new();
    }

    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        if let Some(last) = merged.last_mut() {
            // Overlapping, or adjacent with zero free days between. A range
            // starting at the first representable day always touches `last`.
            let touches = range.start.pred_opt().is_none_or(|prev| last.end >= prev);
            if touches {
                last.end = last.end.max(range.end);
                continue;
            }
        }
        merged.push(range);
    }

    merged
}
