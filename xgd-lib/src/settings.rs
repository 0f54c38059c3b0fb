//! Shared application settings.
//!
//! The settings file lives at `~/.config/xgd-tools/settings.toml`:
//!
//! ```toml
//! [output]
//! json = false
//!
//! [write]
//! create_backup = true
//! ```
//!
//! A missing file yields the defaults. [`load_settings_from`] also falls back
//! to the defaults, with a warning, when the file cannot be read or parsed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use xgd_core::XgdError;

use crate::sector_file::WriteOptions;

/// Canonical path to the settings file: `~/.config/xgd-tools/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("xgd-tools").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub write: WriteSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Print machine-readable JSON instead of text.
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteSettings {
    /// Keep a `.bak` copy of sector files before rewriting them.
    pub create_backup: bool,
}

impl Default for WriteSettings {
    fn default() -> Self {
        Self {
            create_backup: true,
        }
    }
}

impl Settings {
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            create_backup: self.write.create_backup,
        }
    }
}

/// Parse settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(contents)
}

/// Read settings from `path`. A missing file yields the defaults; a file
/// that cannot be read or fails to parse is an error.
pub fn try_load_settings_from(path: &Path) -> Result<Settings, XgdError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };
    parse_settings(&contents).map_err(|e| XgdError::parse(e.to_string()))
}

/// Load settings from `path`, falling back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    try_load_settings_from(path).unwrap_or_else(|e| {
        log::warn!("Ignoring settings file {}: {}", path.display(), e);
        Settings::default()
    })
}

/// Pretty-printed TOML of the effective settings, for display.
pub fn settings_string(settings: &Settings) -> String {
    toml::to_string_pretty(settings).unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
