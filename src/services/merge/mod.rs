//! Range merging for lasso selections.
//!
//! Ranges that overlap, or whose gap is within the tolerance, fuse into one.
//! The tolerance is what lets two lasso strokes a few minutes apart become a
//! single selection. Merging is idempotent.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::models::range::{Range, RangeSet};

/// Sorted, non-overlapping, gap-tolerant union of `ranges`.
///
/// Empty or inverted ranges are dropped.
pub fn merge_ranges(mut ranges: Vec<Range>, tolerance: Duration) -> Vec<Range> {
    ranges.retain(|r| !r.is_empty());
    ranges.sort();

    let mut merged: Vec<Range> = Vec::with_capacity(ranges.len());
    let mut iter = ranges.into_iter();
    let Some(mut acc) = iter.next() else {
        return merged;
    };

    for next in iter {
        if next.start <= acc.end || next.start - acc.end <= tolerance {
            acc.end = acc.end.max(next.end);
        } else {
            merged.push(acc);
            acc = next;
        }
    }
    merged.push(acc);

    merged
}

/// Per-day union of two range sets.
///
/// Days present on only one side still go through [`merge_ranges`], so the
/// result satisfies the tolerance invariant everywhere.
pub fn merge_range_sets(base: &RangeSet, incoming: &RangeSet, tolerance: Duration) -> RangeSet {
    let mut days: BTreeMap<i32, Vec<Range>> = BTreeMap::new();
    for (day, range) in base.iter().chain(incoming.iter()) {
        days.entry(day).or_default().push(*range);
    }

    let merged = days
        .into_iter()
        .map(|(day, ranges)| (day, merge_ranges(ranges, tolerance)))
        .collect();

    RangeSet::from_merged(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn range(h1: u32, m1: u32, h2: u32, m2: u32) -> Range {
        Range::new(at(h1, m1), at(h2, m2))
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_ranges(Vec::new(), Duration::minutes(5)).is_empty());
    }

    #[test_case(5, vec![range(9, 0, 10, 0)] ; "gap within tolerance fuses")]
    #[test_case(
        4,
        vec![range(9, 0, 9, 30), range(9, 35, 10, 0)]
        ; "gap beyond tolerance stays apart"
    )]
    fn test_tolerance(tolerance: i64, expected: Vec<Range>) {
        let ranges = vec![range(9, 35, 10, 0), range(9, 0, 9, 30)];
        assert_eq!(
            merge_ranges(ranges, Duration::minutes(tolerance)),
            expected
        );
    }

    #[test]
    fn test_contained_range_is_absorbed() {
        let ranges = vec![range(9, 0, 12, 0), range(10, 0, 11, 0)];
        assert_eq!(
            merge_ranges(ranges, Duration::zero()),
            vec![range(9, 0, 12, 0)]
        );
    }

    #[test]
    fn test_touching_ranges_fuse_with_zero_tolerance() {
        let ranges = vec![range(9, 0, 10, 0), range(10, 0, 10, 30)];
        assert_eq!(
            merge_ranges(ranges, Duration::zero()),
            vec![range(9, 0, 10, 30)]
        );
    }

    #[test]
    fn test_degenerate_ranges_are_dropped() {
        let ranges = vec![range(9, 0, 9, 0), range(11, 0, 10, 0), range(13, 0, 14, 0)];
        assert_eq!(
            merge_ranges(ranges, Duration::minutes(5)),
            vec![range(13, 0, 14, 0)]
        );
    }

    #[test]
    fn test_merge_range_sets_per_day() {
        let mut base = RangeSet::new();
        base.insert(0, range(9, 0, 10, 0));
        base.insert(2, range(15, 0, 16, 0));

        let mut incoming = RangeSet::new();
        incoming.insert(0, range(10, 3, 11, 0));
        incoming.insert(1, range(8, 0, 8, 30));

        let merged = merge_range_sets(&base, &incoming, Duration::minutes(5));

        assert_eq!(merged.get(0), &[range(9, 0, 11, 0)]);
        assert_eq!(merged.get(1), &[range(8, 0, 8, 30)]);
        assert_eq!(merged.get(2), &[range(15, 0, 16, 0)]);
    }

    #[test]
    fn test_merge_range_sets_idempotent() {
        let mut base = RangeSet::new();
        base.insert(0, range(9, 0, 9, 30));
        base.insert(0, range(9, 33, 10, 0));
        let tolerance = Duration::minutes(5);

        let once = merge_range_sets(&base, &RangeSet::new(), tolerance);
        let twice = merge_range_sets(&once, &RangeSet::new(), tolerance);

        assert_eq!(once, twice);
        assert_eq!(once.get(0), &[range(9, 0, 10, 0)]);
    }
}
