//! Expansion of milestones into dated occurrences on the visible axis.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::warn;

use super::calendar::{parse_date, week_offset_of};
use crate::error::{PlanError, Result};
use crate::model::{Frequency, Milestone, MilestoneId, MilestoneKind, MilestoneTiming, ViewWindow};

/// One concrete, dated instance of a milestone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    pub milestone_id: MilestoneId,
    pub name: String,
    pub kind: MilestoneKind,
    pub date: NaiveDate,
    pub week_offset: f64,
    pub is_recurring: bool,
}

impl Occurrence {
    pub fn x(&self, window: &ViewWindow) -> f64 {
        window.week_to_x(self.week_offset)
    }
}

/// Dates from `start` through `end` inclusive, `frequency` apart.
#[derive(Debug, Clone)]
pub struct RecurrenceDates {
    next: Option<NaiveDate>,
    end: NaiveDate,
    step: Days,
}

impl RecurrenceDates {
    pub fn new(start: NaiveDate, end: NaiveDate, frequency: Frequency) -> Self {
        Self {
            next: Some(start),
            end,
            step: Days::new(frequency.step_days()),
        }
    }
}

impl Iterator for RecurrenceDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = current.checked_add_days(self.step);
        if self.next.is_none() {
            warn!(%current, "recurrence step leaves the calendar range, stopping");
        }
        Some(current)
    }
}

/// A milestone left off the axis because one of its dates could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedMilestone {
    pub milestone_id: MilestoneId,
    pub name: String,
    pub reason: String,
}

impl SkippedMilestone {
    pub fn error(&self) -> PlanError {
        PlanError::InvalidDate(self.reason.clone())
    }
}

/// Occurrences of a set of milestones plus the ones that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Expansion {
    pub occurrences: Vec<Occurrence>,
    pub skipped: Vec<SkippedMilestone>,
}

/// Decide how a stored milestone repeats and parse its dates.
///
/// Only a status report with both `startDate` and `endDate` filled in is
/// recurring; anything else is a point on `date`.
pub fn resolve_timing(milestone: &Milestone) -> Result<MilestoneTiming> {
    if milestone.is_recurring() {
        return Ok(MilestoneTiming::Recurring {
            start_date: parse_field(milestone, "startDate", &milestone.start_date)?,
            end_date: parse_field(milestone, "endDate", &milestone.end_date)?,
            frequency: milestone.frequency.unwrap_or_default(),
        });
    }
    Ok(MilestoneTiming::Point {
        date: parse_field(milestone, "date", &milestone.date)?,
    })
}

fn parse_field(milestone: &Milestone, field: &str, value: &Option<String>) -> Result<NaiveDate> {
    let raw = value.as_deref().unwrap_or_default();
    parse_date(raw).map_err(|_| {
        PlanError::InvalidDate(format!(
            "milestone '{}' has an unreadable {field} '{raw}'",
            milestone.name
        ))
    })
}

/// Occurrences of one milestone that fall on `[0, view_weeks]`.
///
/// Fails with `InvalidDate` when the milestone's dates cannot be read.
pub fn expand_milestone(milestone: &Milestone, window: &ViewWindow) -> Result<Vec<Occurrence>> {
    let occurrence = |date: NaiveDate, week_offset: f64, is_recurring: bool| Occurrence {
        milestone_id: milestone.id,
        name: milestone.name.clone(),
        kind: milestone.kind,
        date,
        week_offset,
        is_recurring,
    };

    let occurrences = match resolve_timing(milestone)? {
        MilestoneTiming::Point { date } => {
            let offset = week_offset_of(date, window.program_start);
            if window.contains_week(offset) {
                vec![occurrence(date, offset, false)]
            } else {
                Vec::new()
            }
        }
        MilestoneTiming::Recurring {
            start_date,
            end_date,
            frequency,
        } => {
            let limit = f64::from(window.view_weeks);
            RecurrenceDates::new(start_date, end_date, frequency)
                .map(|date| (date, week_offset_of(date, window.program_start)))
                // Dates only grow, so nothing after the window end can qualify.
                .take_while(|&(_, offset)| offset <= limit)
                .filter(|&(_, offset)| window.contains_week(offset))
                .map(|(date, offset)| occurrence(date, offset, true))
                .collect()
        }
    };
    Ok(occurrences)
}

/// All occurrences, in milestone order. A milestone with an unreadable date
/// is skipped and reported; the rest still expand.
pub fn expand_milestones<'a>(
    milestones: impl IntoIterator<Item = &'a Milestone>,
    window: &ViewWindow,
) -> Expansion {
    let mut expansion = Expansion::default();
    for milestone in milestones {
        match expand_milestone(milestone, window) {
            Ok(occurrences) => expansion.occurrences.extend(occurrences),
            Err(err) => {
                warn!(id = %milestone.id, name = %milestone.name, %err, "skipping milestone");
                let reason = match err {
                    PlanError::InvalidDate(reason) => reason,
                    other => other.to_string(),
                };
                expansion.skipped.push(SkippedMilestone {
                    milestone_id: milestone.id,
                    name: milestone.name.clone(),
                    reason,
                });
            }
        }
    }
    expansion
}

/// Like [`expand_milestones`], minus the kinds the window's view mode hides.
pub fn visible_occurrences<'a>(
    milestones: impl IntoIterator<Item = &'a Milestone>,
    window: &ViewWindow,
) -> Expansion {
    expand_milestones(
        milestones
            .into_iter()
            .filter(|m| window.mode.shows(m.kind)),
        window,
    )
}
