// Property-based tests for the time-grid engine
// Random inputs against the invariants layout, merging, snapping and gestures must keep

#[path = "../fixtures/mod.rs"]
mod fixtures;

mod gesture_properties;
mod geometry_properties;
mod layout_properties;
mod merge_properties;
