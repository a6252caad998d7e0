use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::MenuSelection;
use crate::config::{Difficulty, SnakeColor};
use crate::theme::ThemeKind;

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Failure to read or write the preferences file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("settings file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Menu preferences remembered between runs. Every field is optional in the
/// file.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Option<Difficulty>,
    pub color: Option<SnakeColor>,
    pub name: Option<String>,
    pub theme: Option<ThemeKind>,
}

impl Settings {
    /// Captures the current menu selection.
    #[must_use]
    pub fn from_selection(selection: &MenuSelection) -> Self {
        Self {
            difficulty: Some(selection.difficulty),
            color: Some(selection.color),
            name: Some(selection.name.clone()),
            theme: Some(selection.theme),
        }
    }

    /// Overlays the stored values onto `selection`.
    pub fn apply_to(&self, selection: &mut MenuSelection) {
        if let Some(difficulty) = self.difficulty {
            selection.difficulty = difficulty;
        }
        if let Some(color) = self.color {
            selection.color = color;
        }
        if let Some(name) = &self.name {
            selection.name.clone_from(name);
        }
        if let Some(theme) = self.theme {
            selection.theme = theme;
        }
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads preferences from disk.
///
/// Returns defaults when the file does not exist yet (first run) and `Err`
/// when it exists but cannot be read or parsed, so the caller can warn
/// before entering raw terminal mode.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from_path(&settings_path())
}

/// Saves preferences, creating parent directories when needed.
pub fn save_settings(settings: &Settings) -> Result<(), SettingsError> {
    save_settings_to_path(&settings_path(), settings)
}

fn load_settings_from_path(path: &Path) -> Result<Settings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

fn save_settings_to_path(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}
