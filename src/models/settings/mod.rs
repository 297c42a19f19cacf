// Settings module
// Grid density, snapping and gesture tuning

use std::fmt;
use std::num::NonZeroU32;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Minutes in a full 24h day axis.
pub const DAY_MINUTES: u32 = 1440;

/// Positive rounding step, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SnapStep(NonZeroU32);

impl SnapStep {
    /// # Errors
    /// Returns [`EngineError::InvalidSnapStep`] for zero or negative steps.
    pub fn new(minutes: i64) -> Result<Self> {
        u32::try_from(minutes)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(EngineError::InvalidSnapStep(minutes))
    }

    pub fn minutes(self) -> i64 {
        i64::from(self.0.get())
    }
}

impl TryFrom<i64> for SnapStep {
    type Error = EngineError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SnapStep> for i64 {
    fn from(step: SnapStep) -> Self {
        step.minutes()
    }
}

impl fmt::Display for SnapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.0)
    }
}

/// User-facing grid settings, as stored in `grid.toml`.
///
/// Every field has a default so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Pixels per minute along the time axis (zoom level).
    pub minute_height: f64,
    /// Pixels between the grid origin and midnight (header, padding).
    pub top_offset: f64,
    /// Length of the time axis; 1440 for a full day.
    pub day_minutes: u32,
    /// Selection grid granularity.
    pub grid_minutes: i64,
    /// Move/resize granularity.
    pub drag_snap_minutes: i64,
    /// Lasso granularity.
    pub lasso_snap_minutes: i64,
    /// Resize never produces an item shorter than this.
    pub min_duration_minutes: i64,
    /// Lasso ranges closer than this fuse into one.
    pub merge_tolerance_minutes: i64,
    /// Committing a lasso also selects the items under it.
    pub select_items_on_lasso: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            minute_height: 1.0,
            top_offset: 0.0,
            day_minutes: DAY_MINUTES,
            grid_minutes: 30,
            drag_snap_minutes: 15,
            lasso_snap_minutes: 15,
            min_duration_minutes: 15,
            merge_tolerance_minutes: 5,
            select_items_on_lasso: false,
        }
    }
}

impl GridSettings {
    /// Validate into the immutable per-render geometry.
    pub fn geometry(&self) -> Result<GeometryConfig> {
        Ok(GeometryConfig::new(self.minute_height, self.top_offset)?
            .with_day_minutes(self.day_minutes)?
            .with_grid(SnapStep::new(self.grid_minutes)?)
            .with_drag_snap(SnapStep::new(self.drag_snap_minutes)?)
            .with_lasso_snap(SnapStep::new(self.lasso_snap_minutes)?)
            .with_min_duration(Duration::minutes(self.min_duration_minutes.max(0)))
            .with_merge_tolerance(Duration::minutes(self.merge_tolerance_minutes.max(0))))
    }
}

/// Validated geometry for one render pass. Rebuild when zoom or density changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    minute_height: f64,
    top_offset: f64,
    day_minutes: u32,
    grid: SnapStep,
    drag_snap: SnapStep,
    lasso_snap: SnapStep,
    min_duration: Duration,
    merge_tolerance: Duration,
}

impl GeometryConfig {
    /// Geometry with the default snapping from [`GridSettings::default`].
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidMinuteHeight`] unless `minute_height` is a
    /// finite value greater than zero.
    pub fn new(minute_height: f64, top_offset: f64) -> Result<Self> {
        if !(minute_height.is_finite() && minute_height > 0.0) {
            return Err(EngineError::InvalidMinuteHeight(minute_height));
        }
        let defaults = GridSettings::default();
        Ok(Self {
            minute_height,
            top_offset,
            day_minutes: DAY_MINUTES,
            grid: SnapStep::new(defaults.grid_minutes)?,
            drag_snap: SnapStep::new(defaults.drag_snap_minutes)?,
            lasso_snap: SnapStep::new(defaults.lasso_snap_minutes)?,
            min_duration: Duration::minutes(defaults.min_duration_minutes),
            merge_tolerance: Duration::minutes(defaults.merge_tolerance_minutes),
        })
    }

    /// Substitute a partial or extended axis length.
    pub fn with_day_minutes(mut self, day_minutes: u32) -> Result<Self> {
        if day_minutes == 0 {
            return Err(EngineError::InvalidDayWindow(
                "time axis must span at least one minute".to_string(),
            ));
        }
        self.day_minutes = day_minutes;
        Ok(self)
    }

    pub fn with_grid(mut self, step: SnapStep) -> Self {
        self.grid = step;
        self
    }

    pub fn with_drag_snap(mut self, step: SnapStep) -> Self {
        self.drag_snap = step;
        self
    }

    pub fn with_lasso_snap(mut self, step: SnapStep) -> Self {
        self.lasso_snap = step;
        self
    }

    pub fn with_min_duration(mut self, min_duration: Duration) -> Self {
        self.min_duration = min_duration;
        self
    }

    pub fn with_merge_tolerance(mut self, tolerance: Duration) -> Self {
        self.merge_tolerance = tolerance;
        self
    }

    pub fn minute_height(&self) -> f64 {
        self.minute_height
    }

    pub fn top_offset(&self) -> f64 {
        self.top_offset
    }

    pub fn day_minutes(&self) -> u32 {
        self.day_minutes
    }

    pub fn grid(&self) -> SnapStep {
        self.grid
    }

    pub fn drag_snap(&self) -> SnapStep {
        self.drag_snap
    }

    pub fn lasso_snap(&self) -> SnapStep {
        self.lasso_snap
    }

    pub fn min_duration(&self) -> Duration {
        self.min_duration
    }

    pub fn merge_tolerance(&self) -> Duration {
        self.merge_tolerance
    }
}
