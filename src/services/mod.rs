// Service module exports

pub mod geometry;
pub mod layout;
pub mod merge;
pub mod settings;
