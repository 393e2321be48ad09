//! # User Preferences
//!
//! The one piece of state that survives a restart: the selected language.
//! Stored as JSON in the per-user config directory and rewritten on every
//! change.
//!
//! ```json
//! { "version": "0.1.0", "language": "he" }
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{PortalError, PortalResult};
use crate::file_io::{read_text, validate_version, write_atomic};
use crate::i18n::Locale;

/// Current preferences schema version
pub const PREFERENCES_VERSION: &str = "0.1.0";

/// File name inside the config directory
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub version: String,
    #[serde(default)]
    pub language: Locale,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION.to_string(),
            language: Locale::default(),
        }
    }
}

/// Loads and saves [`Preferences`] at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in `dir`, file [`PREFERENCES_FILE_NAME`].
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(PREFERENCES_FILE_NAME))
    }

    /// Store in the platform's per-user config directory.
    pub fn default_location() -> PortalResult<Self> {
        let dirs = ProjectDirs::from("com", "CGM", "engineering-portal").ok_or_else(|| {
            PortalError::file_error("locate config dir", "<home>", "No home directory for the current user")
        })?;
        Ok(Self::with_dir(dirs.config_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read preferences; defaults when the file does not exist yet.
    pub fn load(&self) -> PortalResult<Preferences> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no preferences file, using defaults");
            return Ok(Preferences::default());
        }
        let contents = read_text(&self.path)?;
        let preferences: Preferences = serde_json::from_str(&contents).map_err(|e| {
            PortalError::serialization(format!("Invalid JSON in {}: {}", self.path.display(), e))
        })?;
        validate_version(&preferences.version, PREFERENCES_VERSION)?;
        Ok(preferences)
    }

    /// Write preferences atomically, creating the directory if needed.
    pub fn save(&self, preferences: &Preferences) -> PortalResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PortalError::file_error("create config dir", parent.display().to_string(), e.to_string())
            })?;
        }
        let json = serde_json::to_string_pretty(preferences)
            .map_err(|e| PortalError::serialization(e.to_string()))?;
        write_atomic(&self.path, json.as_bytes())
    }

    /// Persist a new language immediately.
    pub fn set_locale(&self, locale: Locale) -> PortalResult<Preferences> {
        let preferences = Preferences {
            version: PREFERENCES_VERSION.to_string(),
            language: locale,
        };
        self.save(&preferences)?;
        info!(locale = %locale, "language preference saved");
        Ok(preferences)
    }
}
