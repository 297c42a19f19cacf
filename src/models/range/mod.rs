// Range module
// Day-scoped selection segments produced by lasso gestures

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::services::merge::merge_ranges;

/// A half-open `[start, end)` selection segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Range {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts < self.end
    }

    pub fn intersects(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && start < self.end
    }
}

/// Selected ranges keyed by day index within the loaded window.
///
/// Every list is kept sorted by `start` and non-overlapping. Construction goes
/// through [`RangeSet::insert`], the merge functions or deserialization, which
/// all maintain that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<i32, Vec<Range>>", into = "BTreeMap<i32, Vec<Range>>")]
pub struct RangeSet {
    days: BTreeMap<i32, Vec<Range>>,
}

/// Normalizes each day: sorts, drops empty ranges and fuses overlaps.
impl From<BTreeMap<i32, Vec<Range>>> for RangeSet {
    fn from(days: BTreeMap<i32, Vec<Range>>) -> Self {
        Self::from_merged(
            days.into_iter()
                .map(|(day, ranges)| (day, merge_ranges(ranges, Duration::zero())))
                .collect(),
        )
    }
}

impl From<RangeSet> for BTreeMap<i32, Vec<Range>> {
    fn from(set: RangeSet) -> Self {
        set.days
    }
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from already-merged per-day lists. Empty lists are not stored.
    pub(crate) fn from_merged(days: BTreeMap<i32, Vec<Range>>) -> Self {
        Self {
            days: days.into_iter().filter(|(_, r)| !r.is_empty()).collect(),
        }
    }

    /// Insert a range, fusing it with any range it overlaps or touches.
    pub fn insert(&mut self, day: i32, range: Range) {
        if range.is_empty() {
            return;
        }
        let mut list = self.days.remove(&day).unwrap_or_default();
        list.push(range);
        let merged = merge_ranges(list, Duration::zero());
        if !merged.is_empty() {
            self.days.insert(day, merged);
        }
    }

    /// Remove `cut` from the given day, splitting ranges that straddle it.
    pub fn subtract(&mut self, day: i32, cut: Range) {
        let Some(list) = self.days.remove(&day) else {
            return;
        };

        let mut remaining = Vec::with_capacity(list.len() + 1);
        for range in list {
            if !range.intersects(cut.start, cut.end) {
                remaining.push(range);
                continue;
            }
            if range.start < cut.start {
                remaining.push(Range::new(range.start, cut.start));
            }
            if cut.end < range.end {
                remaining.push(Range::new(cut.end, range.end));
            }
        }

        if !remaining.is_empty() {
            self.days.insert(day, remaining);
        }
    }

    pub fn get(&self, day: i32) -> &[Range] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, day: i32, ts: NaiveDateTime) -> bool {
        self.get(day).iter().any(|r| r.contains(ts))
    }

    /// True if any range on any day intersects `[start, end)`.
    pub fn intersects(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.iter().any(|(_, r)| r.intersects(start, end))
    }

    pub fn days(&self) -> impl Iterator<Item = i32> + '_ {
        self.days.keys().copied()
    }

    /// All ranges in day order, then start order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Range)> + '_ {
        self.days
            .iter()
            .flat_map(|(day, ranges)| ranges.iter().map(move |r| (*day, r)))
    }

    pub fn total_duration(&self) -> Duration {
        self.iter()
            .fold(Duration::zero(), |acc, (_, r)| acc + r.duration())
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn clear_day(&mut self, day: i32) {
        self.days.remove(&day);
    }
}
