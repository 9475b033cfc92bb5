//! User settings for the contact book
//!
//! Manages preferences for CSV export, the default category and delete
//! confirmation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::ContactPaths;
use crate::error::ContactError;
use crate::models::Category;

/// User settings for the contact book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Quote CSV fields per RFC 4180; `false` writes the legacy raw layout
    #[serde(default = "default_true")]
    pub csv_quoting: bool,

    /// Category used when none is given on add
    #[serde(default)]
    pub default_category: Category,

    /// Ask before deleting in the interactive menu
    #[serde(default = "default_true")]
    pub confirm_deletes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            csv_quoting: true,
            default_category: Category::default(),
            confirm_deletes: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Never writes; a missing file stays missing until [`Settings::save`].
    pub fn load_or_create(paths: &ContactPaths) -> Result<Self, ContactError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ContactError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ContactError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Like [`Settings::load_or_create`], but an unreadable or malformed file
    /// falls back to defaults with a warning
    pub fn load_or_default(paths: &ContactPaths) -> Self {
        Self::load_or_create(paths).unwrap_or_else(|e| {
            warn!(path = %paths.settings_file().display(), error = %e, "using default settings");
            Settings::default()
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ContactPaths) -> Result<(), ContactError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ContactError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ContactError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
