// Time Grid Library
// Interaction engine for multi-day calendar time grids

pub mod engine;
pub mod error;
pub mod interaction;
pub mod models;
pub mod services;
pub mod utils;

pub use engine::{CalendarEngine, EngineOutput, HostInput};
pub use error::{EngineError, Result};
pub use interaction::{
    Commit, DragStateMachine, GestureError, GestureKind, Hit, HitZone, LassoMode, Modifiers,
    PointerEvent, PointerEventKind, PointerSample, Preview,
};
pub use models::interval::{apply_patches, ItemPatch, TimeInterval, Timed};
pub use models::range::{Range, RangeSet};
pub use models::selection::Selection;
pub use models::settings::{GeometryConfig, GridSettings, SnapStep};
pub use services::geometry::{DayWindow, GeometryMapper};
pub use services::layout::{LanePlacement, OverlapLayoutEngine, PositionedItem};
pub use services::merge::{merge_range_sets, merge_ranges};
