//! Pointer gestures over the time grid.
//!
//! A gesture is either an item gesture (move, resize-start, resize-end) or a
//! lasso over empty grid space. Only one gesture is active at a time. While it
//! runs, every pointer move produces a [`Preview`]; releasing the pointer
//! produces a [`Commit`] for the caller to apply to its own stores. Cancelling
//! discards everything.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::interval::ItemPatch;
use crate::models::range::{Range, RangeSet};

mod drag;
mod lasso;
mod resize;

pub use drag::{DragState, DragStateMachine};
pub use hit_test::{hit_test, Hit, HitZone, EDGE_ZONE, SMALL_ITEM_EXTENT};
pub use lasso::{commit_lasso, lasso_segments};
pub use resize::{resize_edge, ResizeHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureKind {
    Move,
    ResizeStart,
    ResizeEnd,
    Lasso,
}

impl GestureKind {
    pub fn is_item_gesture(self) -> bool {
        !matches!(self, GestureKind::Lasso)
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GestureKind::Move => "move",
            GestureKind::ResizeStart => "resize-start",
            GestureKind::ResizeEnd => "resize-end",
            GestureKind::Lasso => "lasso",
        };
        f.write_str(name)
    }
}

/// How a lasso spanning several days is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LassoMode {
    /// One continuous interval sliced at day boundaries.
    #[default]
    Span,
    /// The same local time window on every spanned day.
    Clone,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Ctrl on Windows/Linux, Cmd on macOS. Additive selection.
    pub ctrl_or_meta: bool,
    /// Clone mode for lassos.
    pub shift: bool,
}

/// One pointer position in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    /// Day column under the pointer; may lie outside the loaded window.
    pub day_column: i32,
    /// Position along the time axis, in grid pixels.
    pub position_px: f64,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerSample {
    pub fn new(day_column: i32, position_px: f64) -> Self {
        Self {
            day_column,
            position_px,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// Escape, pointer capture loss, window blur, unmount.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    #[serde(default)]
    pub sample: PointerSample,
}

/// Ghost state for rendering while a gesture is in progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preview {
    /// Proposed `[start, end)` per affected item id.
    Items(BTreeMap<String, Range>),
    /// Lasso segments of the current stroke only.
    Lasso(RangeSet),
}

/// Result of a released gesture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Commit {
    /// New values for every item whose span changed.
    Items(Vec<ItemPatch>),
    Lasso {
        /// Replacement for the persisted range set.
        ranges: RangeSet,
        /// Segments contributed by this stroke.
        segments: RangeSet,
        additive: bool,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    #[error("A {0} gesture is already in progress")]
    AlreadyActive(GestureKind),

    #[error("No item with id '{0}' is loaded")]
    UnknownTarget(String),

    #[error("Item '{0}' has end before start and cannot be dragged")]
    MalformedTarget(String),

    #[error("A lasso must be started with begin_lasso")]
    NotAnItemGesture,

    #[error("Host has an active text selection")]
    TextSelectionActive,
}
