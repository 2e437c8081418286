// Facade settings
// Loaded from ~/.config/cellbridge/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// What to do when two extensions claim the same event name or facade member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail the registration (default)
    #[default]
    Reject,
    /// Later registration replaces the earlier one, with a warning
    LastWriterWins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Canvas
    #[serde(rename = "canvas.minZoom")]
    pub min_zoom: f64,

    #[serde(rename = "canvas.maxZoom")]
    pub max_zoom: f64,

    // Editing
    /// Scheduler ticks `end_editing` yields before reporting.
    #[serde(rename = "editing.endEditTicks")]
    pub end_edit_ticks: u32,

    // Events
    /// Validate every dispatched record against its declared schema,
    /// even in release builds.
    #[serde(rename = "events.strictSchema")]
    pub strict_schema: bool,

    // Extensions
    #[serde(rename = "extensions.duplicatePolicy")]
    pub duplicate_policy: DuplicatePolicy,

    // Comments
    #[serde(rename = "comments.defaultAuthor")]
    pub default_author: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 4.0,
            end_edit_ticks: 1,
            strict_schema: false,
            duplicate_policy: DuplicatePolicy::Reject,
            default_author: String::new(), // Empty = anonymous
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cellbridge");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file.
    ///
    /// Lines starting with `//` are treated as comments.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&contents)
    }

    /// Parse settings JSON (with `//` comment lines).
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        let settings: Settings =
            serde_json::from_str(&cleaned).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_zoom.is_nan() || self.min_zoom <= 0.0 || !self.max_zoom.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds must be positive and finite (got {}..{})",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "canvas.minZoom ({}) > canvas.maxZoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }

    /// Save current settings to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save current settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Clamp a zoom ratio into the configured bounds.
    pub fn clamp_zoom(&self, ratio: f64) -> f64 {
        if ratio.is_nan() {
            return 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        }
        ratio.clamp(self.min_zoom, self.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.min_zoom, 0.1);
        assert_eq!(settings.max_zoom, 4.0);
        assert_eq!(settings.end_edit_ticks, 1);
        assert_eq!(settings.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_parse_with_comments_and_partial_keys() {
        let json = r#"{
            // canvas bounds
            "canvas.maxZoom": 2.5,
            "extensions.duplicatePolicy": "last-writer-wins"
        }"#;
        let settings = Settings::parse(json).unwrap();
        assert_eq!(settings.max_zoom, 2.5);
        assert_eq!(settings.min_zoom, 0.1);
        assert_eq!(settings.duplicate_policy, DuplicatePolicy::LastWriterWins);
    }

    #[test]
    fn test_rejects_inverted_zoom_bounds() {
        let err = Settings::parse(r#"{"canvas.minZoom": 3.0, "canvas.maxZoom": 2.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_clamp_zoom() {
        let settings = Settings::default();
        assert_eq!(settings.clamp_zoom(10.0), 4.0);
        assert_eq!(settings.clamp_zoom(0.0), 0.1);
        assert_eq!(settings.clamp_zoom(1.5), 1.5);
        assert_eq!(settings.clamp_zoom(f64::NAN), 1.0);
    }
}
