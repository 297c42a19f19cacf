// Time <-> pixel snapping invariants

use proptest::prelude::*;
use time_grid::services::geometry::round_to_step;
use time_grid::{GeometryConfig, GeometryMapper, SnapStep};

const HEIGHTS: [f64; 6] = [0.5, 0.75, 1.0, 1.5, 2.0, 3.0];

fn mapper(height_idx: usize, top_offset: u32) -> GeometryMapper {
    GeometryMapper::new(GeometryConfig::new(HEIGHTS[height_idx], f64::from(top_offset)).unwrap())
}

proptest! {
    /// Property: a snapped minute survives a trip through pixels unchanged
    #[test]
    fn prop_snapped_minute_round_trips(
        height_idx in 0..HEIGHTS.len(),
        top_offset in 0u32..200,
        step in 1i64..=120,
        k in 0i64..=1440,
    ) {
        let step = SnapStep::new(step).unwrap();
        let minute = k % (1440 / step.minutes() + 1) * step.minutes();
        let mapper = mapper(height_idx, top_offset);

        let px = mapper.time_to_offset(minute as f64);
        prop_assert_eq!(mapper.offset_to_time(px, step), minute);
    }

    /// Property: any minute in the day maps back to its nearest step
    #[test]
    fn prop_minute_round_trips_to_nearest_step(
        height_idx in 0..HEIGHTS.len(),
        top_offset in 0u32..200,
        step in 1i64..=120,
        minute in 0i64..=1440,
    ) {
        let step = SnapStep::new(step).unwrap();
        let mapper = mapper(height_idx, top_offset);

        let px = mapper.time_to_offset(minute as f64);
        let snapped = mapper.offset_to_time(px, step);

        prop_assert_eq!(snapped, round_to_step(minute as f64, step));
        prop_assert_eq!(snapped % step.minutes(), 0);
        prop_assert!((snapped - minute).abs() * 2 <= step.minutes());
    }

    /// Property: relative drags always snap to whole steps
    #[test]
    fn prop_snap_delta_is_a_multiple_of_step(
        height_idx in 0..HEIGHTS.len(),
        step in 1i64..=120,
        delta in -3000.0f64..3000.0,
    ) {
        let step = SnapStep::new(step).unwrap();
        let snapped = mapper(height_idx, 0).snap_delta(delta, step);

        prop_assert_eq!(snapped % step.minutes(), 0);
    }
}
