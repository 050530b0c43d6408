//! Engine settings, persisted as JSON in the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Pixel metrics used when stacking lanes into a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Height of one activity bar.
    pub task_height: f64,
    /// Vertical gap between two lanes.
    pub task_gap: f64,
    /// Padding above the first lane and below the last.
    pub row_padding: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            task_height: 40.0,
            task_gap: 10.0,
            row_padding: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: LayoutMetrics,
    /// Maximum number of full relaxation passes over the dependency edges.
    pub propagation_pass_budget: u32,
    pub max_components: usize,
    pub pixels_per_week_weeks: f64,
    pub pixels_per_week_quarters: f64,
    /// Switching to quarter view widens the window to at least this many weeks.
    pub quarter_min_weeks: u32,
    pub default_view_weeks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutMetrics::default(),
            propagation_pass_budget: 5,
            max_components: 10,
            pixels_per_week_weeks: 60.0,
            pixels_per_week_quarters: 15.0,
            quarter_min_weeks: 52,
            default_view_weeks: 24,
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults when
    /// the file is missing or cannot be parsed.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(?path, "no settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(?path, %err, "failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    /// Strict variant of [`Settings::load`].
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// `settings.json` inside the platform config directory, if one exists.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "NexusPlan")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "propagation_pass_budget": 8, "layout": { "task_gap": 4.0 } }"#)
            .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.propagation_pass_budget, 8);
        assert_eq!(settings.layout.task_gap, 4.0);
        assert_eq!(settings.layout.task_height, 40.0);
        assert_eq!(settings.max_components, 10);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = Settings::default();
        settings.quarter_min_weeks = 60;
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }
}
