//! Persistent user settings.
//!
//! Stored as JSON in the platform config directory
//! (`<config_dir>/data-sweeper/settings.json`). A missing file yields the
//! defaults; a malformed one is logged and ignored.

use crate::constants::{DEFAULT_PREVIEW_ROWS, MAX_UPLOAD_SIZE_MB};
use crate::types::{FileFormat, Theme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Chart theme
    pub theme: Theme,
    /// Export format used instead of the upload's own format
    pub default_export_format: Option<FileFormat>,
    /// Largest accepted upload, in megabytes
    pub max_upload_mb: usize,
    /// Rows shown in previews
    pub preview_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            default_export_format: None,
            max_upload_mb: MAX_UPLOAD_SIZE_MB,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// Default location of the settings file
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("data-sweeper").join("settings.json"))
}

impl Settings {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to `path` as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Save to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let path = default_settings_path()
            .ok_or_else(|| anyhow::anyhow!("No config directory on this platform"))?;
        self.save_to(&path)
    }
}
