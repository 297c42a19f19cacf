// Lane assignment invariants

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use time_grid::{LanePlacement, OverlapLayoutEngine, TimeInterval};

fn day_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Items given as (start minute, duration); some spill past midnight.
fn build(spans: &[(i64, i64)]) -> Vec<TimeInterval> {
    spans
        .iter()
        .enumerate()
        .map(|(i, &(start, duration))| {
            let start = day_start() + Duration::minutes(start);
            TimeInterval::new(format!("item-{i}"), start, start + Duration::minutes(duration))
                .unwrap()
        })
        .collect()
}

fn layout(items: &[TimeInterval]) -> HashMap<String, LanePlacement> {
    OverlapLayoutEngine::layout(items, day_start(), day_start() + Duration::days(1))
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect()
}

fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    let day_end = day_start() + Duration::days(1);
    a.start < b.end.min(day_end) && b.start < a.end.min(day_end)
}

proptest! {
    /// Property: every item gets a lane inside its cluster's lane count
    #[test]
    fn prop_lane_below_lane_count(
        spans in prop::collection::vec((0i64..1400, 1i64..240), 0..40),
    ) {
        let items = build(&spans);
        let placed = layout(&items);

        prop_assert_eq!(placed.len(), items.len());
        for p in placed.values() {
            prop_assert!(p.lanes >= 1);
            prop_assert!(p.lane < p.lanes);
        }
    }

    /// Property: overlapping items never share a lane and share a lane count
    #[test]
    fn prop_overlapping_items_get_distinct_lanes(
        spans in prop::collection::vec((0i64..1400, 1i64..240), 2..40),
    ) {
        let items = build(&spans);
        let placed = layout(&items);

        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                if overlaps(a, b) {
                    let (pa, pb) = (&placed[&a.id], &placed[&b.id]);
                    prop_assert_ne!(pa.lane, pb.lane);
                    prop_assert_eq!(pa.lanes, pb.lanes);
                }
            }
        }
    }

    /// Property: items that never overlap each keep the full column
    #[test]
    fn prop_disjoint_items_are_full_width(
        steps in prop::collection::vec((0i64..30, 1i64..60), 1..20),
    ) {
        // lay items end to end with non-negative gaps
        let mut cursor = 0;
        let mut spans = Vec::new();
        for (gap, duration) in steps {
            cursor += gap;
            spans.push((cursor, duration));
            cursor += duration;
        }
        let items = build(&spans);

        for p in layout(&items).values() {
            prop_assert_eq!((p.lane, p.lanes), (0, 1));
        }
    }

    /// Property: layout does not depend on input order
    #[test]
    fn prop_layout_is_order_independent(
        spans in prop::collection::vec((0i64..1400, 1i64..240), 0..25),
    ) {
        let items = build(&spans);
        let mut reversed = items.clone();
        reversed.reverse();

        prop_assert_eq!(layout(&items), layout(&reversed));
    }
}
