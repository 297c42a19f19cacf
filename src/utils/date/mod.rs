// Date utility functions
// Day-relative minute arithmetic shared by geometry, layout and gestures

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const MINUTES_PER_DAY: i64 = 1440;

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Whole minutes from `day_start` to `ts`; negative before the day starts.
pub fn minutes_between(day_start: NaiveDateTime, ts: NaiveDateTime) -> i64 {
    (ts - day_start).num_minutes()
}

pub fn add_minutes(ts: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    ts + Duration::minutes(minutes)
}

/// Clip `[start, end)` to `[lo, hi)`. `None` when nothing is left.
pub fn clip(
    start: NaiveDateTime,
    end: NaiveDateTime,
    lo: NaiveDateTime,
    hi: NaiveDateTime,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let clipped_start = start.max(lo);
    let clipped_end = end.min(hi);
    (clipped_start < clipped_end).then_some((clipped_start, clipped_end))
}
