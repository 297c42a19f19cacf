// Test fixtures - reusable test data
// Provides consistent windows, items and engines across test files

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use time_grid::{
    CalendarEngine, DayWindow, GridSettings, PointerEvent, PointerEventKind, PointerSample,
    TimeInterval,
};

/// Sample windows for testing
pub mod windows {
    use super::*;

    /// Monday 10 March 2025, one working week
    pub fn week_of_march_10() -> DayWindow {
        DayWindow::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), 7).unwrap()
    }

    /// Crosses the end of February in a leap year
    pub fn leap_week() -> DayWindow {
        DayWindow::new(NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(), 5).unwrap()
    }
}

/// Instant `minutes` after the start of `day` in `window`
pub fn at(window: &DayWindow, day: i32, minutes: i64) -> NaiveDateTime {
    window.day_start(day) + Duration::minutes(minutes)
}

/// Interval helper using hours:minutes on a single day
pub fn item(
    window: &DayWindow,
    id: &str,
    day: i32,
    start: (i64, i64),
    end: (i64, i64),
) -> TimeInterval {
    TimeInterval::new(
        id,
        at(window, day, start.0 * 60 + start.1),
        at(window, day, end.0 * 60 + end.1),
    )
    .unwrap()
}

/// Engine with default settings: 1 px per minute, no header offset
pub fn engine(window: DayWindow) -> CalendarEngine {
    CalendarEngine::new(&GridSettings::default(), window).unwrap()
}

pub fn down(day: i32, px: f64) -> PointerEvent {
    event(PointerEventKind::Down, PointerSample::new(day, px))
}

pub fn moved(day: i32, px: f64) -> PointerEvent {
    event(PointerEventKind::Move, PointerSample::new(day, px))
}

pub fn up(day: i32, px: f64) -> PointerEvent {
    event(PointerEventKind::Up, PointerSample::new(day, px))
}

pub fn cancel() -> PointerEvent {
    event(PointerEventKind::Cancel, PointerSample::default())
}

pub fn event(kind: PointerEventKind, sample: PointerSample) -> PointerEvent {
    PointerEvent { kind, sample }
}
