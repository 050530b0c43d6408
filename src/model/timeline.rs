use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{PlanError, Result};
use crate::model::MilestoneKind;

/// Controls what granularity the timeline axis displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Weeks,
    Quarters,
}

impl ViewMode {
    /// Pixel scale used by this mode.
    pub fn pixels_per_week(self, settings: &Settings) -> f64 {
        match self {
            ViewMode::Weeks => settings.pixels_per_week_weeks,
            ViewMode::Quarters => settings.pixels_per_week_quarters,
        }
    }

    /// Status reports are too dense to show at quarter granularity.
    pub fn shows(self, kind: MilestoneKind) -> bool {
        !(self == ViewMode::Quarters && kind == MilestoneKind::StatusReport)
    }
}

/// The visible slice of the program and its pixel scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewWindow {
    pub program_start: NaiveDate,
    /// Number of weeks on the axis. Always > 0.
    pub view_weeks: u32,
    /// Always finite and > 0.
    pub pixels_per_week: f64,
    #[serde(default)]
    pub mode: ViewMode,
}

impl ViewWindow {
    pub fn new(program_start: NaiveDate, view_weeks: u32, pixels_per_week: f64) -> Result<Self> {
        let window = Self {
            program_start,
            view_weeks,
            pixels_per_week,
            mode: ViewMode::Weeks,
        };
        window.validate()?;
        Ok(window)
    }

    /// Window for `mode` with the scale taken from `settings`.
    pub fn for_mode(
        program_start: NaiveDate,
        view_weeks: u32,
        mode: ViewMode,
        settings: &Settings,
    ) -> Result<Self> {
        let mut window = Self::new(program_start, view_weeks, mode.pixels_per_week(settings))?;
        window.mode = mode;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.view_weeks == 0 {
            return Err(PlanError::InvalidViewWindow(
                "view must span at least one week".into(),
            ));
        }
        if !self.pixels_per_week.is_finite() || self.pixels_per_week <= 0.0 {
            return Err(PlanError::InvalidViewWindow(format!(
                "pixels per week must be positive (got {})",
                self.pixels_per_week
            )));
        }
        Ok(())
    }

    /// Convert a week offset to an x-pixel offset from the program start.
    pub fn week_to_x(&self, week: f64) -> f64 {
        week * self.pixels_per_week
    }

    /// Convert an x-pixel offset back to a (fractional) week offset.
    pub fn x_to_week(&self, x: f64) -> f64 {
        x / self.pixels_per_week
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f64 {
        self.week_to_x(self.view_weeks as f64)
    }

    /// Whether a week offset falls on the visible axis (both ends inclusive).
    pub fn contains_week(&self, week: f64) -> bool {
        (0.0..=self.view_weeks as f64).contains(&week)
    }
}
