// Range merging invariants

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use time_grid::{merge_range_sets, merge_ranges, Range, RangeSet};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn ranges(spans: &[(i64, i64)]) -> Vec<Range> {
    spans
        .iter()
        .map(|&(start, len)| {
            let start = base() + Duration::minutes(start);
            Range::new(start, start + Duration::minutes(len))
        })
        .collect()
}

fn range_set(spans: &[(i32, i64, i64)]) -> RangeSet {
    let mut set = RangeSet::new();
    for &(day, start, len) in spans {
        let start = base() + Duration::days(i64::from(day)) + Duration::minutes(start);
        set.insert(day, Range::new(start, start + Duration::minutes(len)));
    }
    set
}

proptest! {
    /// Property: merging twice gives the same result as merging once
    #[test]
    fn prop_merge_is_idempotent(
        spans in prop::collection::vec((0i64..1440, 0i64..180), 0..30),
        tolerance in 0i64..30,
    ) {
        let tolerance = Duration::minutes(tolerance);
        let once = merge_ranges(ranges(&spans), tolerance);
        let twice = merge_ranges(once.clone(), tolerance);

        prop_assert_eq!(once, twice);
    }

    /// Property: merged output is sorted with gaps wider than the tolerance
    #[test]
    fn prop_merged_gaps_exceed_tolerance(
        spans in prop::collection::vec((0i64..1440, 0i64..180), 0..30),
        tolerance in 0i64..30,
    ) {
        let tolerance = Duration::minutes(tolerance);
        let merged = merge_ranges(ranges(&spans), tolerance);

        for r in &merged {
            prop_assert!(r.start < r.end);
        }
        for pair in merged.windows(2) {
            prop_assert!(pair[1].start - pair[0].end > tolerance);
        }
    }

    /// Property: every input minute stays covered after merging
    #[test]
    fn prop_merge_covers_inputs(
        spans in prop::collection::vec((0i64..1440, 1i64..180), 1..20),
        tolerance in 0i64..30,
    ) {
        let input = ranges(&spans);
        let merged = merge_ranges(input.clone(), Duration::minutes(tolerance));

        for r in &input {
            prop_assert!(merged.iter().any(|m| m.start <= r.start && r.end <= m.end));
        }
    }

    /// Property: merging a set into itself changes nothing
    #[test]
    fn prop_set_merge_with_self_is_stable(
        spans in prop::collection::vec((0i32..5, 0i64..1380, 1i64..60), 0..20),
    ) {
        let tolerance = Duration::minutes(5);
        let set = merge_range_sets(&RangeSet::new(), &range_set(&spans), tolerance);

        prop_assert_eq!(merge_range_sets(&set, &set, tolerance), set);
    }
}
