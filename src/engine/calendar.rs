//! Date <-> week-offset conversion and axis bucketing.
//!
//! All week offsets are measured from the program start. Activities use
//! whole weeks; milestone dates may land mid-week, so offsets here are `f64`.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::error::{PlanError, Result};
use crate::model::{ViewMode, ViewWindow};

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| PlanError::InvalidDate(format!("'{s}': {e}")))
}

/// Fractional number of weeks from `program_start` to `date`.
pub fn week_offset_of(date: NaiveDate, program_start: NaiveDate) -> f64 {
    (date - program_start).num_days() as f64 / 7.0
}

/// The date `weeks` whole weeks after (or before) `program_start`.
pub fn date_at_week(program_start: NaiveDate, weeks: i64) -> Result<NaiveDate> {
    let days = weeks.checked_mul(7).ok_or_else(|| out_of_range(program_start, weeks))?;
    let shifted = if days >= 0 {
        program_start.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        program_start.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| out_of_range(program_start, weeks))
}

fn out_of_range(program_start: NaiveDate, weeks: i64) -> PlanError {
    PlanError::InvalidDate(format!("{program_start} + {weeks} weeks is out of range"))
}

/// One labelled span on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    /// Start of the period as `MM/dd`, for the date row under the header.
    pub date_label: String,
    /// Calendar start of the period (before clipping).
    pub start: NaiveDate,
    /// Offset of the visible part, clipped to `[0, view_weeks]`.
    pub start_week: f64,
    pub width_weeks: f64,
}

impl Bucket {
    pub fn left(&self, pixels_per_week: f64) -> f64 {
        self.start_week * pixels_per_week
    }

    pub fn width(&self, pixels_per_week: f64) -> f64 {
        self.width_weeks * pixels_per_week
    }
}

/// Axis rows for one view mode: the main header row and an optional
/// finer-grained row beneath it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub primary: Vec<Bucket>,
    pub secondary: Vec<Bucket>,
}

pub fn axis(window: &ViewWindow) -> Result<Axis> {
    match window.mode {
        ViewMode::Weeks => Ok(Axis {
            primary: week_buckets(window.program_start, window.view_weeks)?,
            secondary: Vec::new(),
        }),
        ViewMode::Quarters => Ok(Axis {
            primary: quarter_buckets(window.program_start, window.view_weeks)?,
            secondary: month_buckets(window.program_start, window.view_weeks)?,
        }),
    }
}

/// One bucket per visible week, labelled `W1`, `W2`, ...
pub fn week_buckets(program_start: NaiveDate, view_weeks: u32) -> Result<Vec<Bucket>> {
    (0..view_weeks)
        .map(|i| {
            let start = date_at_week(program_start, i64::from(i))?;
            Ok(Bucket {
                label: format!("W{}", i + 1),
                date_label: date_label(start),
                start,
                start_week: f64::from(i),
                width_weeks: 1.0,
            })
        })
        .collect()
}

/// Calendar quarters intersecting the window, starting from the quarter that
/// contains `program_start`.
pub fn quarter_buckets(program_start: NaiveDate, view_weeks: u32) -> Result<Vec<Bucket>> {
    let first_month = (program_start.month0() / 3) * 3 + 1;
    let first = NaiveDate::from_ymd_opt(program_start.year(), first_month, 1)
        .ok_or_else(|| PlanError::InvalidDate(format!("no quarter start for {program_start}")))?;

    walk_periods(program_start, view_weeks, first, Months::new(3), |d| {
        format!("Q{} {}", d.month0() / 3 + 1, d.year())
    })
}

/// Calendar months intersecting the window.
pub fn month_buckets(program_start: NaiveDate, view_weeks: u32) -> Result<Vec<Bucket>> {
    let first = program_start
        .with_day(1)
        .ok_or_else(|| PlanError::InvalidDate(format!("no month start for {program_start}")))?;

    walk_periods(program_start, view_weeks, first, Months::new(1), |d| {
        d.format("%b %Y").to_string()
    })
}

fn date_label(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

fn walk_periods(
    program_start: NaiveDate,
    view_weeks: u32,
    first: NaiveDate,
    step: Months,
    label: impl Fn(NaiveDate) -> String,
) -> Result<Vec<Bucket>> {
    let window_end = date_at_week(program_start, i64::from(view_weeks))?;
    let limit = f64::from(view_weeks);

    let mut buckets = Vec::new();
    let mut current = first;
    while current < window_end {
        let next = current.checked_add_months(step).ok_or_else(|| {
            PlanError::InvalidDate(format!("period after {current} is out of range"))
        })?;

        let start_week = week_offset_of(current, program_start).max(0.0);
        let end_week = week_offset_of(next, program_start).min(limit);
        if end_week > start_week {
            buckets.push(Bucket {
                label: label(current),
                date_label: date_label(current),
                start: current,
                start_week,
                width_weeks: end_week - start_week,
            });
        }
        current = next;
    }
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_date(" 2025-01-10 ").unwrap(), date(2025, 1, 10));
        assert!(matches!(parse_date("2025-02-30"), Err(PlanError::InvalidDate(_))));
        assert!(matches!(parse_date("next tuesday"), Err(PlanError::InvalidDate(_))));
    }

    #[test]
    fn offsets_round_trip_through_dates() {
        let start = date(2025, 1, 1);
        assert!(approx(week_offset_of(date(2025, 1, 10), start), 9.0 / 7.0));
        assert!(approx(week_offset_of(date(2024, 12, 25), start), -1.0));
        let d = date_at_week(start, 3).unwrap();
        assert_eq!(d, date(2025, 1, 22));
        assert!(approx(week_offset_of(d, start), 3.0));
        assert_eq!(date_at_week(start, -1).unwrap(), date(2024, 12, 25));
    }

    #[test]
    fn date_arithmetic_overflow_is_invalid_date() {
        assert!(matches!(
            date_at_week(NaiveDate::MAX, 1),
            Err(PlanError::InvalidDate(_))
        ));
        assert!(matches!(
            quarter_buckets(NaiveDate::MAX, 4),
            Err(PlanError::InvalidDate(_))
        ));
    }

    #[test]
    fn quarters_clip_to_window() {
        let buckets = quarter_buckets(date(2025, 2, 15), 26).unwrap();
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Q1 2025", "Q2 2025", "Q3 2025"]);

        // Q1 started before the program, so its visible part begins at 0.
        assert_eq!(buckets[0].start_week, 0.0);
        assert!(approx(buckets[0].width_weeks, 45.0 / 7.0));

        let last = buckets.last().unwrap();
        assert!(approx(last.start_week + last.width_weeks, 26.0));
        assert!(buckets.iter().all(|b| b.width_weeks > 0.0));
    }

    #[test]
    fn quarter_starting_on_window_end_is_not_emitted() {
        // 2025-01-01 + 13 weeks = 2025-04-02, so Q2 is one day wide.
        let buckets = quarter_buckets(date(2025, 1, 1), 13).unwrap();
        assert_eq!(buckets.len(), 2);
        assert!(approx(buckets[1].width_weeks, 1.0 / 7.0));

        // 2024-12-23 + 1 week = 2024-12-30: Q1 2025 never becomes visible.
        let buckets = quarter_buckets(date(2024, 12, 23), 1).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Q4 2024");
    }

    #[test]
    fn months_cover_partial_months() {
        let buckets = month_buckets(date(2025, 1, 15), 4).unwrap();
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Jan 2025", "Feb 2025"]);
        assert_eq!(buckets[1].date_label, "02/01");
        assert!(approx(buckets[0].width_weeks, 17.0 / 7.0));
        assert!(approx(buckets[1].start_week + buckets[1].width_weeks, 4.0));
    }

    #[test]
    fn weeks_are_labelled_from_one() {
        let buckets = week_buckets(date(2025, 1, 1), 3).unwrap();
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[2].label, "W3");
        assert_eq!(buckets[2].start, date(2025, 1, 15));
        assert_eq!(buckets[2].date_label, "01/15");
        assert_eq!(buckets[2].left(60.0), 120.0);
    }
}
