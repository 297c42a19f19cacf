// Gesture invariants: resize floors and cancel purity

use chrono::Duration;
use proptest::prelude::*;
use time_grid::interaction::{resize_edge, ResizeHandle};
use time_grid::{Commit, EngineOutput, Hit, HitZone, Selection};

use crate::fixtures::{at, cancel, down, engine, item, moved, up, windows};

proptest! {
    /// Property: a resize never shrinks an item below the floor or swaps its edges
    #[test]
    fn prop_resize_respects_floor(
        start in 0i64..1300,
        length in 1i64..300,
        shift in -2000i64..2000,
        min_duration in 1i64..60,
        end_handle in any::<bool>(),
    ) {
        let w = windows::week_of_march_10();
        let origin_start = at(&w, 1, start);
        let origin_end = origin_start + Duration::minutes(length);
        let handle = if end_handle { ResizeHandle::End } else { ResizeHandle::Start };
        let min_duration = Duration::minutes(min_duration);

        let (new_start, new_end) = resize_edge(
            handle,
            origin_start,
            origin_end,
            Duration::minutes(shift),
            w.day_start(1),
            w.day_end(1),
            min_duration,
        );

        prop_assert!(new_end - new_start >= min_duration.min(origin_end - origin_start));
        match handle {
            ResizeHandle::Start => prop_assert_eq!(new_end, origin_end),
            ResizeHandle::End => prop_assert_eq!(new_start, origin_start),
        }
    }

    /// Property: cancel after any pointer path leaves committed state alone
    #[test]
    fn prop_cancel_is_pure(
        on_item in any::<bool>(),
        path in prop::collection::vec((-2i32..9, -200.0f64..1600.0), 1..12),
    ) {
        let w = windows::week_of_march_10();
        let mut engine = engine(w);
        let items = vec![item(&w, "a", 3, (9, 0), (10, 0))];
        engine.handle(&down(0, 480.0), None, &items);
        engine.handle(&up(0, 600.0), None, &items);
        engine.selection_mut().select("a");

        let ranges_before = engine.ranges().clone();
        let selection_before: Selection = engine.selection().clone();
        let items_before = items.clone();

        let hit = Hit { id: "a".into(), zone: HitZone::Body };
        engine.handle(&down(3, 560.0), on_item.then_some(&hit), &items);
        for &(day, px) in &path {
            engine.handle(&moved(day, px), None, &items);
        }

        prop_assert_eq!(engine.handle(&cancel(), None, &items), EngineOutput::Cancelled);
        prop_assert!(!engine.is_dragging());
        prop_assert!(engine.preview().is_none());
        prop_assert_eq!(engine.ranges(), &ranges_before);
        prop_assert_eq!(engine.selection(), &selection_before);
        prop_assert_eq!(&items, &items_before);
    }

    /// Property: a committed move keeps every item's duration
    #[test]
    fn prop_move_preserves_duration(
        day in -2i32..9,
        px in -200.0f64..1600.0,
    ) {
        let w = windows::week_of_march_10();
        let mut engine = engine(w);
        let items = vec![item(&w, "a", 3, (9, 0), (10, 30))];
        let hit = Hit { id: "a".into(), zone: HitZone::Body };

        engine.handle(&down(3, 560.0), Some(&hit), &items);
        let output = engine.handle(&up(day, px), None, &items);

        let EngineOutput::Committed(Commit::Items(patches)) = output else {
            panic!("expected an item commit");
        };
        for patch in patches {
            prop_assert_eq!(patch.new_end - patch.new_start, Duration::minutes(90));
            prop_assert!(patch.new_start >= w.start());
            prop_assert!(patch.new_end <= w.end());
        }
    }
}
