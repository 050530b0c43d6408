use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type MilestoneId = Uuid;

/// The kinds of milestone a roadmap can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneKind {
    #[default]
    #[serde(rename = "Go-Live")]
    GoLive,
    #[serde(rename = "Go/No Go")]
    GoNoGo,
    #[serde(rename = "Roll out")]
    RollOut,
    #[serde(rename = "Status Report")]
    StatusReport,
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MilestoneKind::GoLive => "Go-Live",
            MilestoneKind::GoNoGo => "Go/No Go",
            MilestoneKind::RollOut => "Roll out",
            MilestoneKind::StatusReport => "Status Report",
        };
        f.write_str(label)
    }
}

/// Spacing between recurring occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Weekly,
    Biweekly,
}

impl Frequency {
    pub fn step_days(self) -> u64 {
        match self {
            Frequency::Weekly => 7,
            Frequency::Biweekly => 14,
        }
    }
}

/// When a milestone happens: once, or repeatedly between two dates.
///
/// This is the resolved form; plans store the raw date fields and the engine
/// decides the timing from the milestone type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneTiming {
    Recurring {
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency: Frequency,
    },
    Point {
        date: NaiveDate,
    },
}

/// A milestone as stored in a plan.
///
/// Dates are kept as written (`YYYY-MM-DD`). A cleared date input leaves an
/// empty string behind, which only invalidates this milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: MilestoneId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: MilestoneKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
}

impl Milestone {
    pub fn point(name: impl Into<String>, kind: MilestoneKind, date: NaiveDate) -> Self {
        let mut milestone = Self::blank(name, kind);
        milestone.set_timing(MilestoneTiming::Point { date });
        milestone
    }

    /// A status report repeating from `start_date` through `end_date` inclusive.
    pub fn recurring(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        let mut milestone = Self::blank(name, MilestoneKind::StatusReport);
        milestone.set_timing(MilestoneTiming::Recurring {
            start_date,
            end_date,
            frequency,
        });
        milestone
    }

    /// What a freshly added milestone looks like: a go-live on the program start.
    pub fn new_default(program_start: NaiveDate) -> Self {
        Self::point("New Milestone", MilestoneKind::GoLive, program_start)
    }

    fn blank(name: impl Into<String>, kind: MilestoneKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            date: None,
            start_date: None,
            end_date: None,
            frequency: None,
        }
    }

    /// Status reports with both range ends filled in repeat; everything else
    /// is a single point on `date`.
    pub fn is_recurring(&self) -> bool {
        self.kind == MilestoneKind::StatusReport
            && filled(&self.start_date)
            && filled(&self.end_date)
    }

    /// Overwrite the date fields with `timing`.
    pub fn set_timing(&mut self, timing: MilestoneTiming) {
        match timing {
            MilestoneTiming::Point { date } => {
                self.date = Some(date.to_string());
                self.start_date = None;
                self.end_date = None;
                self.frequency = None;
            }
            MilestoneTiming::Recurring {
                start_date,
                end_date,
                frequency,
            } => {
                self.date = None;
                self.start_date = Some(start_date.to_string());
                self.end_date = Some(end_date.to_string());
                self.frequency = Some(frequency);
            }
        }
    }

    pub fn apply_patch(&mut self, patch: &MilestonePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(timing) = patch.timing {
            self.set_timing(timing);
        }
    }
}

fn filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestonePatch {
    pub name: Option<String>,
    pub kind: Option<MilestoneKind>,
    pub timing: Option<MilestoneTiming>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<Milestone> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deserializes_both_shapes() {
        let parsed = parse(
            r#"[
            {"id":"6f1c1f38-3f7e-4a4e-9c57-2f5d1b1f0a01","name":"Program Kickoff","type":"Go-Live","date":"2025-01-05"},
            {"id":"6f1c1f38-3f7e-4a4e-9c57-2f5d1b1f0a02","name":"Weekly Status","type":"Status Report",
             "startDate":"2025-01-10","endDate":"2025-03-01","frequency":"biweekly"}
        ]"#,
        );
        assert!(!parsed[0].is_recurring());
        assert!(parsed[1].is_recurring());
        assert_eq!(parsed[1].frequency, Some(Frequency::Biweekly));
    }

    #[test]
    fn only_status_reports_recur() {
        let parsed = parse(
            r#"[{"id":"6f1c1f38-3f7e-4a4e-9c57-2f5d1b1f0a03","name":"Launch","type":"Go-Live",
                "date":"2025-02-01","startDate":"2025-01-10","endDate":"2025-03-01"}]"#,
        );
        assert!(!parsed[0].is_recurring());
    }

    #[test]
    fn cleared_date_still_loads() {
        let parsed = parse(
            r#"[{"id":"6f1c1f38-3f7e-4a4e-9c57-2f5d1b1f0a04","name":"Status","type":"Status Report",
                "startDate":"2025-01-10","endDate":""}]"#,
        );
        assert_eq!(parsed[0].end_date.as_deref(), Some(""));
        assert!(!parsed[0].is_recurring());
    }

    #[test]
    fn set_timing_replaces_the_other_shape() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut m = Milestone::recurring("Status", start, start, Frequency::Weekly);
        m.set_timing(MilestoneTiming::Point { date: start });
        assert_eq!(m.date.as_deref(), Some("2025-01-01"));
        assert!(m.start_date.is_none() && m.end_date.is_none() && m.frequency.is_none());
    }

    #[test]
    fn default_milestone_is_a_go_live_on_the_program_start() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let m = Milestone::new_default(start);
        assert_eq!(m.name, "New Milestone");
        assert_eq!(m.kind, MilestoneKind::GoLive);
        assert_eq!(m.date.as_deref(), Some("2025-04-07"));
    }
}
