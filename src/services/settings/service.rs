use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::GridSettings;

const SETTINGS_FILE: &str = "grid.toml";

pub struct SettingsService;

impl SettingsService {
    /// `grid.toml` in the platform config directory, if one can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "KenBoyle", "TimeGrid")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings, falling back to defaults when the file does not exist.
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default(path: &Path) -> Result<GridSettings> {
        if !path.exists() {
            log::debug!("No grid settings at {}, using defaults", path.display());
            return Ok(GridSettings::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read grid settings from {}", path.display()))?;
        let settings: GridSettings = toml::from_str(&data)
            .with_context(|| format!("failed to parse grid settings in {}", path.display()))?;

        settings
            .geometry()
            .with_context(|| format!("invalid grid settings in {}", path.display()))?;

        log::info!(
            "Loaded grid settings: minute_height={}, drag_snap={}min, lasso_snap={}min",
            settings.minute_height,
            settings.drag_snap_minutes,
            settings.lasso_snap_minutes
        );
        Ok(settings)
    }

    pub fn save(path: &Path, settings: &GridSettings) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("Failed to serialise grid settings")?;
        fs::write(path, data)
            .with_context(|| format!("failed to write grid settings to {}", path.display()))?;
        Ok(())
    }
}
