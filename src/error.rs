//! Error types for time-grid operations.
//!
//! Only precondition violations are errors. Geometric edge cases (dragging
//! past the grid, resizing below the minimum duration, degenerate lasso
//! segments) are clamped or dropped by the engine and never reach the caller.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid interval '{id}': end {end} must be after start {start}")]
    InvalidInterval {
        id: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid snap step: {0} minutes (must be greater than zero)")]
    InvalidSnapStep(i64),

    #[error("Invalid minute height: {0} px (must be greater than zero)")]
    InvalidMinuteHeight(f64),

    #[error("Invalid day window: {0}")]
    InvalidDayWindow(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
