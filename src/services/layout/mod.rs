//! Overlap layout for a day column.
//!
//! Items that overlap in time are placed side by side in lanes. Lanes are
//! assigned first-fit while sweeping the day in start order; the lane count is
//! fixed per cluster (a run of items chained by overlap), so an item with no
//! overlapping neighbour keeps the full column width even when a busy cluster
//! elsewhere on the same day needs four lanes.
//!
//! Ordering is `(start, end, id)` on the segment visible in the day, which makes
//! the result deterministic. Equal starts put the shorter item first and
//! therefore in the lower lane; nothing depends on that beyond determinism.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::interval::Timed;
use crate::services::geometry::{DayWindow, GeometryMapper};
use crate::utils::date::clip;

/// Lane assignment for one item within one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanePlacement {
    pub id: String,
    /// Zero-based lane, always `< lanes`.
    pub lane: usize,
    /// Lanes in this item's cluster, at least 1.
    pub lanes: usize,
}

/// Render-ready placement of an item's visible segment in a day column.
///
/// Field names are axis-neutral: on a vertical grid `offset_px`/`extent_px`
/// are top/height and the lane percentages are left/width; a horizontal grid
/// swaps the axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedItem {
    pub id: String,
    pub day: i32,
    /// Visible segment, clipped to the day.
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub lane: usize,
    pub lanes: usize,
    pub offset_px: f64,
    pub extent_px: f64,
    pub lane_start_pct: f64,
    pub lane_width_pct: f64,
    /// The item starts before the visible segment, on an earlier day or
    /// above a partial axis.
    pub continues_before: bool,
    /// The item ends after the visible segment.
    pub continues_after: bool,
}

struct Segment<'a, T> {
    item: &'a T,
    start: NaiveDateTime,
    end: NaiveDateTime,
    lane: usize,
    lanes: usize,
}

pub struct OverlapLayoutEngine;

impl OverlapLayoutEngine {
    /// Assign lanes to the items intersecting `[day_start, day_end)`.
    ///
    /// Results come back in sweep order. Malformed items are skipped.
    pub fn layout<T: Timed>(
        items: &[T],
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Vec<LanePlacement> {
        assign_lanes(items, day_start, day_end)
            .into_iter()
            .map(|seg| LanePlacement {
                id: seg.item.id().to_string(),
                lane: seg.lane,
                lanes: seg.lanes,
            })
            .collect()
    }

    /// Lay out and position one day of the window.
    ///
    /// The visible part of the day is the mapper's axis length, so a partial
    /// axis (e.g. working hours only) clips items to it.
    pub fn position_day<T: Timed>(
        items: &[T],
        window: &DayWindow,
        day: i32,
        mapper: &GeometryMapper,
    ) -> Vec<PositionedItem> {
        let day_start = window.day_start(day);
        let day_end = window.day_end(day);
        let axis_end =
            (day_start + Duration::minutes(i64::from(mapper.config().day_minutes()))).min(day_end);

        assign_lanes(items, day_start, axis_end)
            .into_iter()
            .map(|seg| {
                let offset_minutes = minutes_f64(seg.start - day_start);
                let extent_minutes = minutes_f64(seg.end - seg.start);
                let width = 100.0 / seg.lanes as f64;
                PositionedItem {
                    id: seg.item.id().to_string(),
                    day,
                    start: seg.start,
                    end: seg.end,
                    lane: seg.lane,
                    lanes: seg.lanes,
                    offset_px: mapper.time_to_offset(offset_minutes),
                    extent_px: mapper.duration_to_extent(extent_minutes),
                    lane_start_pct: seg.lane as f64 * width,
                    lane_width_pct: width,
                    continues_before: seg.item.start() < seg.start,
                    continues_after: seg.item.end() > seg.end,
                }
            })
            .collect()
    }

    /// Position every day of the window, day by day.
    pub fn position_window<T: Timed>(
        items: &[T],
        window: &DayWindow,
        mapper: &GeometryMapper,
    ) -> Vec<PositionedItem> {
        window
            .day_indices()
            .flat_map(|day| Self::position_day(items, window, day, mapper))
            .collect()
    }
}

fn minutes_f64(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 60.0
}

fn assign_lanes<T: Timed>(
    items: &[T],
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
) -> Vec<Segment<'_, T>> {
    let mut segments: Vec<Segment<'_, T>> = items
        .iter()
        .filter(|item| {
            let ok = item.is_well_formed();
            if !ok {
                log::warn!(
                    "Skipping item '{}' in layout: end {} is not after start {}",
                    item.id(),
                    item.end(),
                    item.start()
                );
            }
            ok
        })
        .filter_map(|item| {
            clip(item.start(), item.end(), day_start, day_end).map(|(start, end)| Segment {
                item,
                start,
                end,
                lane: 0,
                lanes: 1,
            })
        })
        .collect();

    segments.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.end.cmp(&b.end))
            .then_with(|| a.item.id().cmp(b.item.id()))
    });

    // (end, lane) of segments still running at the sweep position
    let mut active: Vec<(NaiveDateTime, usize)> = Vec::new();
    let mut cluster_start = 0;
    let mut cluster_max_lane = 0;

    for i in 0..segments.len() {
        let start = segments[i].start;
        active.retain(|(end, _)| *end > start);

        if active.is_empty() && i > cluster_start {
            close_cluster(&mut segments[cluster_start..i], cluster_max_lane);
            cluster_start = i;
            cluster_max_lane = 0;
        }

        let lane = (0..)
            .find(|lane| active.iter().all(|(_, used)| used != lane))
            .unwrap_or(0);
        segments[i].lane = lane;
        active.push((segments[i].end, lane));
        cluster_max_lane = cluster_max_lane.max(lane);
    }

    let len = segments.len();
    close_cluster(&mut segments[cluster_start..len], cluster_max_lane);

    segments
}

fn close_cluster<T>(cluster: &mut [Segment<'_, T>], max_lane: usize) {
    for seg in cluster {
        seg.lanes = max_lane + 1;
    }
}
