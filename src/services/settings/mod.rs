// Settings service
// Locates, loads and saves grid.toml

mod service;

pub use service::SettingsService;
