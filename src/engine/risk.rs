use serde::Serialize;

use crate::model::{Activity, ActivityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFinding {
    pub level: RiskLevel,
    pub activity_id: ActivityId,
    pub message: String,
}

/// Flag every activity that ends after the last visible week.
pub fn evaluate_risks<'a>(
    activities: impl IntoIterator<Item = &'a Activity>,
    view_weeks: u32,
) -> Vec<RiskFinding> {
    activities
        .into_iter()
        .filter(|a| a.end_week() > view_weeks)
        .map(|a| RiskFinding {
            level: RiskLevel::High,
            activity_id: a.id,
            message: format!("\"{}\" overruns program timeline.", a.name),
        })
        .collect()
}
