// Module exports for models

pub mod interval;
pub mod range;
pub mod selection;
pub mod settings;
