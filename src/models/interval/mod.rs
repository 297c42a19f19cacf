// Interval module
// Calendar items as seen by the time grid: an id and a half-open time span

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Anything that can be laid out on the time grid.
///
/// Callers keep their domain payload (title, colour, recurrence, ...) on their
/// own type and expose only the fields the engine reads.
pub trait Timed {
    fn id(&self) -> &str;
    fn start(&self) -> NaiveDateTime;
    fn end(&self) -> NaiveDateTime;

    /// `start < end`. Items failing this are skipped by layout and gestures.
    fn is_well_formed(&self) -> bool {
        self.start() < self.end()
    }

    fn duration(&self) -> Duration {
        self.end() - self.start()
    }
}

/// A calendar item (event, task) or selection segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// Create a new interval
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInterval`] when `end <= start`.
    ///
    /// # Examples
    /// ```
    /// use time_grid::models::interval::TimeInterval;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    /// let standup = TimeInterval::new(
    ///     "standup",
    ///     day.and_hms_opt(9, 0, 0).unwrap(),
    ///     day.and_hms_opt(9, 15, 0).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(standup.id, "standup");
    /// ```
    pub fn new(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        let id = id.into();
        if end <= start {
            return Err(EngineError::InvalidInterval { id, start, end });
        }
        Ok(Self { id, start, end })
    }

    /// Check the `start < end` invariant on a value built without [`TimeInterval::new`]
    /// (e.g. deserialized input).
    pub fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(EngineError::InvalidInterval {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl Timed for TimeInterval {
    fn id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Proposed new values for one item, emitted when a move or resize gesture ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub id: String,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}

/// Apply patches to an item list, returning a new list.
///
/// Items without a patch are cloned unchanged; patches for unknown ids are ignored.
pub fn apply_patches(items: &[TimeInterval], patches: &[ItemPatch]) -> Vec<TimeInterval> {
    items
        .iter()
        .map(|item| match patches.iter().find(|p| p.id == item.id) {
            Some(patch) => TimeInterval {
                id: item.id.clone(),
                start: patch.new_start,
                end: patch.new_end,
            },
            None => item.clone(),
        })
        .collect()
}
