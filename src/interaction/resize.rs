// Event Resize
//
// Moving one edge of an item while the other stays fixed.
// - Start handle: adjusts start time (top edge on a vertical grid)
// - End handle: adjusts end time (bottom edge on a vertical grid)

use chrono::{Duration, NaiveDateTime};

use super::GestureKind;

/// Which edge of the item is being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    Start,
    End,
}

impl ResizeHandle {
    pub fn from_kind(kind: GestureKind) -> Option<Self> {
        match kind {
            GestureKind::ResizeStart => Some(ResizeHandle::Start),
            GestureKind::ResizeEnd => Some(ResizeHandle::End),
            GestureKind::Move | GestureKind::Lasso => None,
        }
    }
}

/// New `(start, end)` after moving `handle` by `shift`.
///
/// The moving edge is first kept inside `[day_lo, day_hi]` (the hovered day),
/// then kept at least `min_duration` away from the fixed edge. An item that is
/// already shorter than `min_duration` uses its own length as the floor. The
/// fixed edge never moves, so start and end can never swap.
pub fn resize_edge(
    handle: ResizeHandle,
    origin_start: NaiveDateTime,
    origin_end: NaiveDateTime,
    shift: Duration,
    day_lo: NaiveDateTime,
    day_hi: NaiveDateTime,
    min_duration: Duration,
) -> (NaiveDateTime, NaiveDateTime) {
    let floor = min_duration.min(origin_end - origin_start);

    match handle {
        ResizeHandle::Start => {
            let candidate = (origin_start + shift).clamp(day_lo, day_hi);
            (candidate.min(origin_end - floor), origin_end)
        }
        ResizeHandle::End => {
            let candidate = (origin_end + shift).clamp(day_lo, day_hi);
            (origin_start, candidate.max(origin_start + floor))
        }
    }
}
