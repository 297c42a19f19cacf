use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};

use super::lasso::{commit_lasso, lasso_segments};
use super::resize::{resize_edge, ResizeHandle};
use super::{Commit, GestureError, GestureKind, LassoMode, PointerSample, Preview};
use crate::models::interval::{ItemPatch, Timed};
use crate::models::range::{Range, RangeSet};
use crate::models::selection::Selection;
use crate::services::geometry::{DayWindow, GeometryMapper};
use crate::utils::date::{minutes_between, MINUTES_PER_DAY};

/// Snapshot of an item taken when the gesture began.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Origin {
    id: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Transient state of the gesture in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub kind: GestureKind,
    pub target_id: Option<String>,
    /// Day column the gesture started in, clamped to the window.
    pub anchor_day: i32,
    /// Target span for item gestures; the snapped anchor instant for a lasso.
    pub origin_start: NaiveDateTime,
    pub origin_end: NaiveDateTime,
    pub pointer_origin: PointerSample,
    /// Ctrl/Cmd was held at begin.
    pub additive: bool,
    pub lasso_mode: LassoMode,
    /// Snapped lasso anchor, minutes from the anchor day's start.
    anchor_minutes: i64,
    /// Every item that moves with this gesture, target included.
    origins: Vec<Origin>,
}

/// Owns the single gesture slot.
///
/// `begin_*` fills the slot, [`update`](Self::update) recomputes the preview,
/// [`end`](Self::end) turns it into a commit and [`cancel`](Self::cancel)
/// drops it. Canonical items and ranges are never touched here.
#[derive(Debug, Clone)]
pub struct DragStateMachine {
    mapper: GeometryMapper,
    window: DayWindow,
    state: Option<DragState>,
    preview: Option<Preview>,
}

impl DragStateMachine {
    pub fn new(mapper: GeometryMapper, window: DayWindow) -> Self {
        Self {
            mapper,
            window,
            state: None,
            preview: None,
        }
    }

    /// Swap geometry or window. An in-progress gesture is cancelled since its
    /// pixel origin no longer means the same time.
    pub fn reconfigure(&mut self, mapper: GeometryMapper, window: DayWindow) {
        if self.cancel() {
            log::debug!("Gesture cancelled by grid reconfiguration");
        }
        self.mapper = mapper;
        self.window = window;
    }

    pub fn mapper(&self) -> &GeometryMapper {
        &self.mapper
    }

    pub fn window(&self) -> &DayWindow {
        &self.window
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Start a move or resize on `target_id`.
    ///
    /// A move on an item that is part of `selection` drags every selected
    /// item present in `items` along with it.
    pub fn begin_item<T: Timed>(
        &mut self,
        kind: GestureKind,
        sample: PointerSample,
        target_id: &str,
        items: &[T],
        selection: &Selection,
    ) -> Result<(), GestureError> {
        if let Some(active) = &self.state {
            return Err(GestureError::AlreadyActive(active.kind));
        }
        if !kind.is_item_gesture() {
            return Err(GestureError::NotAnItemGesture);
        }

        let target = items
            .iter()
            .find(|item| item.id() == target_id)
            .ok_or_else(|| GestureError::UnknownTarget(target_id.to_string()))?;
        if !target.is_well_formed() {
            return Err(GestureError::MalformedTarget(target_id.to_string()));
        }

        let mut origins = vec![origin_of(target)];
        if kind == GestureKind::Move && selection.contains(target_id) {
            origins.extend(
                items
                    .iter()
                    .filter(|item| item.id() != target_id && selection.contains(item.id()))
                    .filter(|item| item.is_well_formed())
                    .map(origin_of),
            );
        }

        log::debug!(
            "Begin {} on '{}' ({} item(s)) at day {}",
            kind,
            target_id,
            origins.len(),
            sample.day_column
        );

        self.state = Some(DragState {
            kind,
            target_id: Some(target_id.to_string()),
            anchor_day: self.window.clamp_day(sample.day_column),
            origin_start: target.start(),
            origin_end: target.end(),
            pointer_origin: sample,
            additive: sample.modifiers.ctrl_or_meta,
            lasso_mode: LassoMode::default(),
            anchor_minutes: 0,
            origins,
        });
        self.preview = None;
        Ok(())
    }

    /// Start a lasso at the pointer. Shift selects clone mode, Ctrl/Cmd makes
    /// the stroke additive.
    pub fn begin_lasso(&mut self, sample: PointerSample) -> Result<(), GestureError> {
        if let Some(active) = &self.state {
            return Err(GestureError::AlreadyActive(active.kind));
        }

        let anchor_day = self.window.clamp_day(sample.day_column);
        let anchor_minutes = self.lasso_minutes(sample.position_px);
        let anchor = self.window.day_start(anchor_day) + Duration::minutes(anchor_minutes);
        let lasso_mode = if sample.modifiers.shift {
            LassoMode::Clone
        } else {
            LassoMode::Span
        };

        log::debug!(
            "Begin lasso ({:?}) at day {} minute {}",
            lasso_mode,
            anchor_day,
            anchor_minutes
        );

        self.state = Some(DragState {
            kind: GestureKind::Lasso,
            target_id: None,
            anchor_day,
            origin_start: anchor,
            origin_end: anchor,
            pointer_origin: sample,
            additive: sample.modifiers.ctrl_or_meta,
            lasso_mode,
            anchor_minutes,
            origins: Vec::new(),
        });
        self.preview = None;
        Ok(())
    }

    /// Recompute the preview for the pointer at `sample`.
    pub fn update(&mut self, sample: PointerSample) -> Option<&Preview> {
        let state = self.state.as_ref()?;
        let preview = self.compute_preview(state, &sample);
        log::trace!("Preview for {} at {:?}: {:?}", state.kind, sample, preview);
        self.preview = Some(preview);
        self.preview.as_ref()
    }

    /// Finish the gesture with one last update at `sample`.
    ///
    /// Item gestures yield patches for the items whose span changed. A lasso
    /// yields `persisted` with the stroke merged in (or replaced by it).
    pub fn end(&mut self, sample: PointerSample, persisted: &RangeSet) -> Option<Commit> {
        let state = self.state.take()?;
        let preview = self.compute_preview(&state, &sample);
        self.preview = None;

        let commit = match preview {
            Preview::Items(spans) => Commit::Items(
                state
                    .origins
                    .iter()
                    .filter_map(|origin| {
                        let span = spans.get(&origin.id)?;
                        (span.start != origin.start || span.end != origin.end).then(|| ItemPatch {
                            id: origin.id.clone(),
                            new_start: span.start,
                            new_end: span.end,
                        })
                    })
                    .collect(),
            ),
            Preview::Lasso(segments) => {
                let tolerance = self.mapper.config().merge_tolerance();
                Commit::Lasso {
                    ranges: commit_lasso(persisted, &segments, state.additive, tolerance),
                    segments,
                    additive: state.additive,
                }
            }
        };

        log::debug!("Committed {}: {:?}", state.kind, commit);
        Some(commit)
    }

    /// Drop the gesture and its preview. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        self.preview = None;
        match self.state.take() {
            Some(state) => {
                log::debug!("Cancelled {} gesture", state.kind);
                true
            }
            None => false,
        }
    }

    fn lasso_minutes(&self, position_px: f64) -> i64 {
        let config = self.mapper.config();
        self.mapper
            .offset_to_time(position_px, config.lasso_snap())
            .min(i64::from(config.day_minutes()))
    }

    fn compute_preview(&self, state: &DragState, sample: &PointerSample) -> Preview {
        let hovered_day = self.window.clamp_day(sample.day_column);

        if state.kind == GestureKind::Lasso {
            let config = self.mapper.config();
            return Preview::Lasso(lasso_segments(
                &self.window,
                state.lasso_mode,
                (state.anchor_day, state.anchor_minutes),
                (hovered_day, self.lasso_minutes(sample.position_px)),
                i64::from(config.day_minutes()),
                config.lasso_snap(),
            ));
        }

        let config = self.mapper.config();
        let delta = self.mapper.snap_delta(
            sample.position_px - state.pointer_origin.position_px,
            config.drag_snap(),
        );
        let day_offset = i64::from(hovered_day - state.anchor_day);
        let shift = delta + day_offset * MINUTES_PER_DAY;

        let spans: BTreeMap<String, Range> = match ResizeHandle::from_kind(state.kind) {
            Some(handle) => {
                let day_lo = self.window.day_start(hovered_day);
                let day_hi = day_lo + Duration::minutes(i64::from(config.day_minutes()));
                let (start, end) = resize_edge(
                    handle,
                    state.origin_start,
                    state.origin_end,
                    Duration::minutes(shift),
                    day_lo,
                    day_hi,
                    config.min_duration(),
                );
                state
                    .origins
                    .iter()
                    .take(1)
                    .map(|origin| (origin.id.clone(), Range::new(start, end)))
                    .collect()
            }
            None => {
                let shift = Duration::minutes(self.clamp_shift(shift, &state.origins));
                state
                    .origins
                    .iter()
                    .map(|origin| {
                        (
                            origin.id.clone(),
                            Range::new(origin.start + shift, origin.end + shift),
                        )
                    })
                    .collect()
            }
        };

        Preview::Items(spans)
    }

    /// Keep moved items inside the loaded window. Items that already stick
    /// out are not pulled back in, they just cannot move further out.
    fn clamp_shift(&self, shift: i64, origins: &[Origin]) -> i64 {
        let (Some(earliest), Some(latest)) = (
            origins.iter().map(|o| o.start).min(),
            origins.iter().map(|o| o.end).max(),
        ) else {
            return shift;
        };

        let lo = minutes_between(earliest, self.window.start()).min(0);
        let hi = minutes_between(latest, self.window.end()).max(0);
        shift.clamp(lo, hi)
    }
}

fn origin_of<T: Timed>(item: &T) -> Origin {
    Origin {
        id: item.id().to_string(),
        start: item.start(),
        end: item.end(),
    }
}
