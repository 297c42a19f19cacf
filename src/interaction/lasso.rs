//! Rubber-band selection over empty grid space.

use chrono::{Duration, NaiveDateTime};

use super::LassoMode;
use crate::models::range::{Range, RangeSet};
use crate::models::settings::SnapStep;
use crate::services::geometry::DayWindow;
use crate::services::merge::merge_range_sets;

/// Segments covered by a lasso from `anchor` to `current`, both given as
/// `(day index, snapped minutes from day start)` inside the window.
///
/// `axis_minutes` is the length of a day column. Segments shorter than one
/// `step` are dropped.
pub fn lasso_segments(
    window: &DayWindow,
    mode: LassoMode,
    anchor: (i32, i64),
    current: (i32, i64),
    axis_minutes: i64,
    step: SnapStep,
) -> RangeSet {
    let (from, to) = if current < anchor {
        (current, anchor)
    } else {
        (anchor, current)
    };
    let (from_day, from_min) = from;
    let (to_day, to_min) = to;

    let mut segments = RangeSet::new();
    let mut push = |day: i32, lo: i64, hi: i64| {
        if hi - lo < step.minutes() {
            return;
        }
        let day_start = window.day_start(day);
        segments.insert(day, Range::new(at(day_start, lo), at(day_start, hi)));
    };

    match mode {
        LassoMode::Span if from_day == to_day => push(from_day, from_min, to_min),
        LassoMode::Span => {
            push(from_day, from_min, axis_minutes);
            for day in (from_day + 1)..to_day {
                push(day, 0, axis_minutes);
            }
            push(to_day, 0, to_min);
        }
        LassoMode::Clone => {
            let lo = from_min.min(to_min);
            let hi = from_min.max(to_min);
            for day in from_day..=to_day {
                push(day, lo, hi);
            }
        }
    }

    segments
}

/// The persisted range set after committing `segments`.
///
/// Additive strokes merge into `persisted`; otherwise the stroke replaces it.
pub fn commit_lasso(
    persisted: &RangeSet,
    segments: &RangeSet,
    additive: bool,
    tolerance: Duration,
) -> RangeSet {
    if additive {
        merge_range_sets(persisted, segments, tolerance)
    } else {
        merge_range_sets(&RangeSet::new(), segments, tolerance)
    }
}

fn at(day_start: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    day_start + Duration::minutes(minutes)
}
