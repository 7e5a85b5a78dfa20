//! Snapper settings and their JSON persistence.

use crate::snap::{SnapMode, DEFAULT_SNAP_DISTANCE};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// User preferences consumed by the snapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapperSettings {
    /// Draw a crosshair through the snapped point.
    pub show_crosshairs: bool,
    /// Number of interior division points used by middle snapping.
    pub middle_points: usize,
    /// Snap mode, persisted as its encoded integer.
    #[serde(with = "crate::snap::codec::as_bits")]
    pub snap_mode: SnapMode,
    /// Distance used by the distance strategy and the on-entity threshold.
    pub snap_distance: f64,
}

impl Default for SnapperSettings {
    fn default() -> Self {
        Self {
            show_crosshairs: true,
            middle_points: 1,
            snap_mode: SnapMode {
                endpoint: true,
                grid: true,
                ..SnapMode::default()
            },
            snap_distance: DEFAULT_SNAP_DISTANCE,
        }
    }
}

impl SnapperSettings {
    /// The persisted mode with the configured snap distance applied.
    pub fn initial_mode(&self) -> SnapMode {
        SnapMode {
            distance_value: self.snap_distance,
            ..self.snap_mode
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> SettingsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Deserialize from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))
    }
}

/// A settings file on disk.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// Create a settings file handle for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file in the user's config directory.
    ///
    /// On Unix: `~/.config/draftsnap/settings.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_location() -> SettingsResult<Self> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| SettingsError::Io("Could not determine config directory".to_string()))?;
        Ok(Self::new(base.join("draftsnap").join("settings.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from the file.
    pub fn load(&self) -> SettingsResult<SnapperSettings> {
        if !self.path.exists() {
            return Err(SettingsError::NotFound(self.path.display().to_string()));
        }
        let json = fs::read_to_string(&self.path)
            .map_err(|e| SettingsError::Io(format!("Failed to read {}: {}", self.path.display(), e)))?;
        let settings = SnapperSettings::from_json(&json)
            .map_err(|e| SettingsError::Parse(format!("Failed to parse {}: {}", self.path.display(), e)))?;
        debug!("Loaded snapper settings from {}", self.path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load_or_default(&self) -> SettingsResult<SnapperSettings> {
        match self.load() {
            Err(SettingsError::NotFound(_)) => Ok(SnapperSettings::default()),
            other => other,
        }
    }

    /// Write settings, creating parent directories as needed.
    pub fn save(&self, settings: &SnapperSettings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Io(format!("Failed to create settings directory: {}", e))
            })?;
        }
        let json = settings.to_json()?;
        fs::write(&self.path, json)
            .map_err(|e| SettingsError::Io(format!("Failed to write {}: {}", self.path.display(), e)))?;
        debug!("Saved snapper settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::Restriction;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = SnapperSettings::default();
        assert!(settings.show_crosshairs);
        assert_eq!(settings.middle_points, 1);
        assert!(settings.snap_mode.endpoint);
        assert!(settings.snap_mode.grid);
        assert!(!settings.snap_mode.center);
    }

    #[test]
    fn test_mode_is_stored_as_integer() {
        let settings = SnapperSettings::default();
        let value: serde_json::Value = serde_json::from_str(&settings.to_json().unwrap()).unwrap();
        assert_eq!(value["snap_mode"], serde_json::json!(0b0110_0000));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = SnapperSettings::from_json(r#"{ "middle_points": 3 }"#).unwrap();
        assert_eq!(settings.middle_points, 3);
        assert!(settings.show_crosshairs);
        assert_eq!(settings.snap_mode, SnapperSettings::default().snap_mode);
    }

    #[test]
    fn test_invalid_json() {
        let result = SnapperSettings::from_json("not json");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_initial_mode_applies_distance() {
        let settings = SnapperSettings {
            snap_distance: 7.5,
            ..SnapperSettings::default()
        };
        let mode = settings.initial_mode();
        assert!((mode.distance_value - 7.5).abs() < f64::EPSILON);
        assert!(mode.endpoint);
    }

    #[test]
    fn test_file_save_load() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("nested").join("settings.json"));

        let mut settings = SnapperSettings::default();
        settings.show_crosshairs = false;
        settings.snap_mode.restriction = Restriction::Vertical;
        settings.snap_mode.intersection = true;
        file.save(&settings).unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_file_not_found() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("missing.json"));
        assert!(matches!(file.load(), Err(SettingsError::NotFound(_))));
        assert_eq!(file.load_or_default().unwrap(), SnapperSettings::default());
    }

    #[test]
    fn test_default_location_file_name() {
        if let Ok(file) = SettingsFile::default_location() {
            assert!(file.path().ends_with("draftsnap/settings.json"));
        }
    }
}
