//! User settings, stored as JSON in the platform config directory.
//!
//! Missing fields take their defaults, so a settings file only needs the
//! values it overrides:
//!
//! ```json
//! { "board": { "color_hex": "#22c55e" }, "nudge": { "large_step": 25 } }
//! ```

use crate::board::BoardConfig;
use crate::constants::EXPORT_FILE_NAME;
use crate::input::NudgeConfig;
use crate::types::TextMetrics;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings file has no parent directory: {0}")]
    NoParent(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Name of the downloaded raster
    pub file_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardConfig,
    pub nudge: NudgeConfig,
    pub text_metrics: TextMetrics,
    pub export: ExportSettings,
}

/// `<config_dir>/moodboard/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("moodboard").join("settings.json"))
}

impl Settings {
    /// Load from the default location. Never fails: a missing file yields
    /// defaults, an unreadable one yields defaults and a warning.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            debug!("No config directory, using default settings");
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), "Failed to load settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let parent = path
            .parent()
            .ok_or_else(|| SettingsError::NoParent(path.to_path_buf()))?;
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }
}
