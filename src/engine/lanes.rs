//! First-fit lane packing for the activities of one track.
//!
//! Activities are visited by ascending start week (ties keep their original
//! order) and each one takes the lowest lane whose previous occupant has
//! already ended. Touching ranges may share a lane; overlapping ranges never do.
//! First-fit is not always lane-minimal, but it never reshuffles activities that
//! an edit did not touch.

use serde::Serialize;

use crate::config::LayoutMetrics;
use crate::model::{Activity, ActivityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaneAssignment {
    pub activity_id: ActivityId,
    pub lane: usize,
}

/// Result of packing one track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackPacking {
    /// In packing order (ascending start week).
    pub assignments: Vec<LaneAssignment>,
    pub lane_count: usize,
}

impl TrackPacking {
    pub fn lane_of(&self, activity: ActivityId) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.activity_id == activity)
            .map(|a| a.lane)
    }

    pub fn height(&self, metrics: &LayoutMetrics) -> f64 {
        track_height(self.lane_count, metrics)
    }
}

pub fn pack_lanes<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> TrackPacking {
    let mut sorted: Vec<&Activity> = activities.into_iter().collect();
    // `sort_by_key` is stable, which is what keeps equal starts in input order.
    sorted.sort_by_key(|a| a.start_week);

    let mut lane_ends: Vec<u32> = Vec::new();
    let mut assignments = Vec::with_capacity(sorted.len());

    for activity in sorted {
        let lane = match lane_ends.iter().position(|&end| end <= activity.start_week) {
            Some(lane) => lane,
            None => {
                lane_ends.push(0);
                lane_ends.len() - 1
            }
        };
        lane_ends[lane] = activity.end_week();
        assignments.push(LaneAssignment {
            activity_id: activity.id,
            lane,
        });
    }

    TrackPacking {
        assignments,
        lane_count: lane_ends.len(),
    }
}

/// Rendered height of a track. An empty track still reserves one lane.
pub fn track_height(lane_count: usize, metrics: &LayoutMetrics) -> f64 {
    let lanes = lane_count.max(1) as f64;
    metrics.row_padding * 2.0 + lanes * metrics.task_height + (lanes - 1.0) * metrics.task_gap
}

/// Top edge of a lane relative to its track.
pub fn lane_top(lane: usize, metrics: &LayoutMetrics) -> f64 {
    metrics.row_padding + lane as f64 * (metrics.task_height + metrics.task_gap)
}
