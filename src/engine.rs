//! Façade consumed by a rendering layer.
//!
//! [`CalendarEngine`] ties geometry, layout, the gesture state machine and the
//! committed lasso ranges together behind one synchronous API meant to be
//! driven from a UI event loop. Items stay in the caller's store: the engine
//! reads them to lay out and start gestures, and hands back patches.

use chrono::Duration;
use serde::Serialize;

use crate::error::Result;
use crate::interaction::{
    hit_test, Commit, DragStateMachine, GestureError, GestureKind, Hit, PointerEvent,
    PointerEventKind, PointerSample, Preview,
};
use crate::models::interval::Timed;
use crate::models::range::RangeSet;
use crate::models::selection::Selection;
use crate::models::settings::{GeometryConfig, GridSettings};
use crate::services::geometry::{DayWindow, GeometryMapper};
use crate::services::layout::{OverlapLayoutEngine, PositionedItem};
use crate::services::merge::merge_range_sets;

/// State the host UI owns and the engine only queries when it needs it.
pub trait HostInput {
    /// The grid still holds pointer capture for the active gesture.
    fn pointer_captured(&self) -> bool;
    /// The user is selecting text, so empty-space drags belong to the host.
    fn text_selection_active(&self) -> bool;
}

/// What a single pointer event did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineOutput {
    /// Nothing happened (e.g. a move with no gesture in progress).
    Idle,
    Started(GestureKind),
    Rejected(String),
    Preview(Preview),
    Committed(Commit),
    Cancelled,
}

pub struct CalendarEngine {
    mapper: GeometryMapper,
    window: DayWindow,
    machine: DragStateMachine,
    ranges: RangeSet,
    selection: Selection,
    select_items_on_lasso: bool,
}

impl CalendarEngine {
    pub fn new(settings: &GridSettings, window: DayWindow) -> Result<Self> {
        let mut engine = Self::with_geometry(settings.geometry()?, window);
        engine.select_items_on_lasso = settings.select_items_on_lasso;
        Ok(engine)
    }

    pub fn with_geometry(config: GeometryConfig, window: DayWindow) -> Self {
        let mapper = GeometryMapper::new(config);
        Self {
            mapper,
            window,
            machine: DragStateMachine::new(mapper, window),
            ranges: RangeSet::new(),
            selection: Selection::new(),
            select_items_on_lasso: false,
        }
    }

    pub fn set_select_items_on_lasso(&mut self, enabled: bool) {
        self.select_items_on_lasso = enabled;
    }

    pub fn mapper(&self) -> &GeometryMapper {
        &self.mapper
    }

    pub fn window(&self) -> &DayWindow {
        &self.window
    }

    /// New zoom/density. Cancels any gesture in progress.
    pub fn set_geometry(&mut self, config: GeometryConfig) {
        self.mapper = GeometryMapper::new(config);
        self.machine.reconfigure(self.mapper, self.window);
    }

    /// Navigate to another run of days. Cancels any gesture in progress.
    /// Committed ranges are indexed by day and are left for the caller to clear.
    pub fn set_window(&mut self, window: DayWindow) {
        self.window = window;
        self.machine.reconfigure(self.mapper, self.window);
    }

    /// Grid line positions for one day column.
    pub fn grid_lines(&self) -> Vec<f64> {
        self.mapper.grid_line_offsets()
    }

    /// Render-ready placements for every day in the window.
    pub fn positioned<T: Timed>(&self, items: &[T]) -> Vec<PositionedItem> {
        OverlapLayoutEngine::position_window(items, &self.window, &self.mapper)
    }

    pub fn hit_test(
        &self,
        positioned: &[PositionedItem],
        sample: &PointerSample,
        cross_pct: f64,
    ) -> Option<Hit> {
        hit_test(positioned, sample, cross_pct)
    }

    /// Start a gesture: an item gesture when `hit` names an item, otherwise a lasso.
    pub fn pointer_down<T: Timed>(
        &mut self,
        sample: PointerSample,
        hit: Option<&Hit>,
        items: &[T],
    ) -> std::result::Result<GestureKind, GestureError> {
        let outcome = match hit {
            Some(hit) => {
                let kind = hit.zone.gesture();
                self.machine
                    .begin_item(kind, sample, &hit.id, items, &self.selection)
                    .map(|()| kind)
            }
            None => self.machine.begin_lasso(sample).map(|()| GestureKind::Lasso),
        };

        if let Err(err) = &outcome {
            log::warn!("Pointer down ignored: {}", err);
        }
        outcome
    }

    pub fn pointer_move(&mut self, sample: PointerSample) -> Option<&Preview> {
        self.machine.update(sample)
    }

    /// Release the pointer. A lasso commit replaces the engine's range set;
    /// item patches are only returned.
    pub fn pointer_up<T: Timed>(&mut self, sample: PointerSample, items: &[T]) -> Option<Commit> {
        let commit = self.machine.end(sample, &self.ranges)?;

        if let Commit::Lasso {
            ranges,
            segments,
            additive,
        } = &commit
        {
            self.ranges = ranges.clone();
            if self.select_items_on_lasso {
                let hits = items
                    .iter()
                    .filter(|item| item.is_well_formed())
                    .filter(|item| segments.intersects(item.start(), item.end()))
                    .map(|item| item.id().to_string());
                self.selection.select_many(hits, *additive);
            }
        }

        Some(commit)
    }

    /// Abort the gesture in progress without committing anything.
    pub fn cancel(&mut self) -> bool {
        self.machine.cancel()
    }

    /// Single entry point for a host event loop.
    pub fn handle<T: Timed>(
        &mut self,
        event: &PointerEvent,
        hit: Option<&Hit>,
        items: &[T],
    ) -> EngineOutput {
        match event.kind {
            PointerEventKind::Down => match self.pointer_down(event.sample, hit, items) {
                Ok(kind) => EngineOutput::Started(kind),
                Err(err) => EngineOutput::Rejected(err.to_string()),
            },
            PointerEventKind::Move => match self.pointer_move(event.sample) {
                Some(preview) => EngineOutput::Preview(preview.clone()),
                None => EngineOutput::Idle,
            },
            PointerEventKind::Up => match self.pointer_up(event.sample, items) {
                Some(commit) => EngineOutput::Committed(commit),
                None => EngineOutput::Idle,
            },
            PointerEventKind::Cancel => {
                if self.cancel() {
                    EngineOutput::Cancelled
                } else {
                    EngineOutput::Idle
                }
            }
        }
    }

    /// Like [`handle`](Self::handle), but first reconciles with host state:
    /// lost pointer capture cancels the gesture, and a lasso is refused while
    /// the host has a text selection.
    pub fn handle_with_host<T: Timed, H: HostInput>(
        &mut self,
        host: &H,
        event: &PointerEvent,
        hit: Option<&Hit>,
        items: &[T],
    ) -> EngineOutput {
        if self.sync_host(host) {
            return EngineOutput::Cancelled;
        }
        if event.kind == PointerEventKind::Down && hit.is_none() && !self.can_begin_lasso(host) {
            return EngineOutput::Rejected(GestureError::TextSelectionActive.to_string());
        }
        self.handle(event, hit, items)
    }

    /// Cancel the gesture if the host no longer holds pointer capture.
    /// Returns true if a gesture was cancelled.
    pub fn sync_host<H: HostInput>(&mut self, host: &H) -> bool {
        if self.machine.is_active() && !host.pointer_captured() {
            log::debug!("Pointer capture lost mid-gesture");
            return self.cancel();
        }
        false
    }

    pub fn can_begin_lasso<H: HostInput>(&self, host: &H) -> bool {
        !host.text_selection_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.machine.is_active()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.machine.preview()
    }

    pub fn gesture(&self) -> &DragStateMachine {
        &self.machine
    }

    pub fn ranges(&self) -> &RangeSet {
        &self.ranges
    }

    /// Restore ranges persisted by the caller. Overlapping or touching ranges
    /// on a day are fused.
    pub fn set_ranges(&mut self, ranges: RangeSet) {
        self.ranges = merge_range_sets(&RangeSet::new(), &ranges, Duration::zero());
    }

    pub fn clear_ranges(&mut self) {
        self.ranges.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }
}
