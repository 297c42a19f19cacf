//! Time ↔ pixel conversion along the grid's time axis.
//!
//! The mapper is axis-agnostic: a vertical week view feeds it `y` coordinates,
//! a horizontal scheduling view feeds it `x`. Positions are measured from the
//! grid origin, so `top_offset` (header height, padding) is part of the mapping.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::settings::{GeometryConfig, SnapStep};
use crate::utils::date::{start_of_day, MINUTES_PER_DAY};

/// Absorbs float noise so exact half steps survive a px round trip.
const ROUNDING_EPSILON: f64 = 1e-9;

/// Round `minutes` to the nearest multiple of `step`, halves rounding up.
pub fn round_to_step(minutes: f64, step: SnapStep) -> i64 {
    let step = step.minutes();
    let steps = (minutes / step as f64 + 0.5 + ROUNDING_EPSILON).floor() as i64;
    steps * step
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMapper {
    config: GeometryConfig,
}

impl GeometryMapper {
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Length of one day column along the time axis.
    pub fn day_height_px(&self) -> f64 {
        f64::from(self.config.day_minutes()) * self.config.minute_height()
    }

    pub fn time_to_offset(&self, minutes_from_day_start: f64) -> f64 {
        self.config.top_offset() + minutes_from_day_start * self.config.minute_height()
    }

    /// Pixel position to snapped minutes from the day start.
    ///
    /// Positions outside the day column clamp to its edges.
    pub fn offset_to_time(&self, pixels: f64, step: SnapStep) -> i64 {
        let local = (pixels - self.config.top_offset()).clamp(0.0, self.day_height_px());
        round_to_step(local / self.config.minute_height(), step)
    }

    /// Relative pointer travel to snapped minutes. Not clamped; may be negative.
    pub fn snap_delta(&self, delta_px: f64, step: SnapStep) -> i64 {
        round_to_step(delta_px / self.config.minute_height(), step)
    }

    pub fn duration_to_extent(&self, minutes: f64) -> f64 {
        minutes * self.config.minute_height()
    }

    /// Positions of the grid lines, one every grid step from the day start up
    /// to and including the end of the axis.
    pub fn grid_line_offsets(&self) -> Vec<f64> {
        let step = self.config.grid().minutes();
        let day_minutes = i64::from(self.config.day_minutes());
        (0..=day_minutes)
            .step_by(step as usize)
            .map(|minutes| self.time_to_offset(minutes as f64))
            .collect()
    }
}

/// The contiguous run of days currently loaded into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDayWindow")]
pub struct DayWindow {
    start: NaiveDate,
    days: u32,
}

#[derive(Deserialize)]
struct RawDayWindow {
    start: NaiveDate,
    days: u32,
}

impl TryFrom<RawDayWindow> for DayWindow {
    type Error = EngineError;

    fn try_from(raw: RawDayWindow) -> Result<Self> {
        Self::new(raw.start, raw.days)
    }
}

impl DayWindow {
    /// # Errors
    /// Returns [`EngineError::InvalidDayWindow`] for an empty window, or one
    /// whose day indices or end date cannot be represented.
    pub fn new(start: NaiveDate, days: u32) -> Result<Self> {
        if days == 0 {
            return Err(EngineError::InvalidDayWindow(
                "window must contain at least one day".to_string(),
            ));
        }
        if i32::try_from(days).is_err()
            || start
                .checked_add_days(Days::new(u64::from(days) + 1))
                .is_none()
        {
            return Err(EngineError::InvalidDayWindow(format!(
                "{days} days from {start} is beyond the supported calendar"
            )));
        }
        Ok(Self { start, days })
    }

    /// Window starting on the local date containing `start_ms`, where local
    /// time is UTC shifted by the caller's `offset`.
    pub fn from_utc_millis(start_ms: i64, days: u32, offset: FixedOffset) -> Result<Self> {
        let instant = DateTime::<Utc>::from_timestamp_millis(start_ms).ok_or_else(|| {
            EngineError::InvalidDayWindow(format!("timestamp {start_ms}ms is out of range"))
        })?;
        Self::new(instant.with_timezone(&offset).date_naive(), days)
    }

    pub fn first_date(&self) -> NaiveDate {
        self.start
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn last_index(&self) -> i32 {
        self.days as i32 - 1
    }

    pub fn contains_day(&self, day: i32) -> bool {
        (0..self.days as i32).contains(&day)
    }

    /// Nearest loaded day to `day`.
    pub fn clamp_day(&self, day: i32) -> i32 {
        day.clamp(0, self.last_index())
    }

    pub fn day_start(&self, day: i32) -> NaiveDateTime {
        start_of_day(self.start) + chrono::Duration::days(i64::from(day))
    }

    pub fn day_end(&self, day: i32) -> NaiveDateTime {
        self.day_start(day + 1)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.day_start(0)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.day_start(self.days as i32)
    }

    /// Day index of `ts`, if it falls inside the window.
    pub fn day_index_of(&self, ts: NaiveDateTime) -> Option<i32> {
        let minutes = (ts - self.start()).num_minutes();
        let day = minutes.div_euclid(MINUTES_PER_DAY) as i32;
        (ts >= self.start() && self.contains_day(day)).then_some(day)
    }

    pub fn day_indices(&self) -> impl Iterator<Item = i32> {
        0..self.days as i32
    }
}
