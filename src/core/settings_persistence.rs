//! Settings persistence
//!
//! Saves and loads [`GameSettings`] to/from a JSON file so user preferences
//! survive across sessions.
//!
//! # File Location
//!
//! Settings are stored in `settings.json` in the user's configuration
//! directory, falling back to the working directory when the platform has
//! none.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings
//! - Save failures are returned to the caller, which logs them

use crate::core::error::CoreResult;
use crate::core::GameSettings;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the settings file path
///
/// E.g. `~/.config/xfchess/settings.json` on Linux.
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "XFChess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from the default location, or defaults on any failure
pub fn load_settings() -> GameSettings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, or defaults on any failure
pub fn load_settings_from(path: &Path) -> GameSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return GameSettings::default();
    }

    match read_settings(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path, e
            );
            GameSettings::default()
        }
    }
}

fn read_settings(path: &Path) -> CoreResult<GameSettings> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Save settings to the default location
pub fn save_settings(settings: &GameSettings) -> CoreResult<PathBuf> {
    let path = settings_path();
    save_settings_to(&path, settings)?;
    Ok(path)
}

/// Save settings to `path`, creating parent directories as needed
pub fn save_settings_to(path: &Path, settings: &GameSettings) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
