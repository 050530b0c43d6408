//! Pixel geometry for a whole plan: tracks stacked in component order, bars
//! placed in their lanes, and connectors for dependency arrows.
//!
//! Coordinates are relative to the chart origin (left edge = program start,
//! top edge = first track).

use std::collections::HashMap;

use serde::Serialize;

use super::lanes::{lane_top, pack_lanes};
use crate::config::LayoutMetrics;
use crate::model::{ActivityId, ComponentId, DependencyId, DependencyKind, Plan};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackGeometry {
    pub component_id: ComponentId,
    pub top: f64,
    pub height: f64,
    pub lane_count: usize,
    pub activity_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub activity_id: ActivityId,
    pub component_id: ComponentId,
    pub lane: usize,
    /// Top edge within the track.
    pub local_top: f64,
    pub absolute_top: f64,
    pub center_y: f64,
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

/// Arrow from the end of the predecessor bar to the start of the successor bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub dependency_id: DependencyId,
    pub kind: DependencyKind,
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Board {
    pub tracks: Vec<TrackGeometry>,
    pub bars: Vec<BarGeometry>,
    pub connectors: Vec<Connector>,
    pub total_height: f64,
}

impl Board {
    pub fn track(&self, component: ComponentId) -> Option<&TrackGeometry> {
        self.tracks.iter().find(|t| t.component_id == component)
    }

    pub fn bar(&self, activity: ActivityId) -> Option<&BarGeometry> {
        self.bars.iter().find(|b| b.activity_id == activity)
    }
}

pub fn layout_board(plan: &Plan, metrics: &LayoutMetrics) -> Board {
    let ppw = plan.view.pixels_per_week;
    let mut board = Board::default();
    let mut current_y = 0.0;

    for component in &plan.components {
        let packing = pack_lanes(plan.activities_in(component.id));
        let height = packing.height(metrics);

        for assignment in &packing.assignments {
            let Some(activity) = plan.activity(assignment.activity_id) else {
                continue;
            };
            let local_top = lane_top(assignment.lane, metrics);
            board.bars.push(BarGeometry {
                activity_id: activity.id,
                component_id: component.id,
                lane: assignment.lane,
                local_top,
                absolute_top: current_y + local_top,
                center_y: current_y + local_top + metrics.task_height / 2.0,
                x: f64::from(activity.start_week) * ppw,
                width: f64::from(activity.duration) * ppw,
                height: metrics.task_height,
            });
        }

        board.tracks.push(TrackGeometry {
            component_id: component.id,
            top: current_y,
            height,
            lane_count: packing.lane_count,
            activity_count: packing.assignments.len(),
        });
        current_y += height;
    }
    board.total_height = current_y;

    let bars: HashMap<ActivityId, &BarGeometry> =
        board.bars.iter().map(|b| (b.activity_id, b)).collect();
    let connectors = plan
        .dependencies
        .iter()
        .filter_map(|dep| {
            let from = bars.get(&dep.from)?;
            let to = bars.get(&dep.to)?;
            Some(Connector {
                dependency_id: dep.id,
                kind: dep.kind,
                from: Point {
                    x: from.x + from.width,
                    y: from.center_y,
                },
                to: Point {
                    x: to.x,
                    y: to.center_y,
                },
            })
        })
        .collect();
    board.connectors = connectors;

    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activity, Component, Dependency, ViewWindow};
    use chrono::NaiveDate;

    fn plan() -> Plan {
        let view = ViewWindow::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 24, 60.0).unwrap();
        Plan::new("board", view)
    }

    #[test]
    fn tracks_stack_and_bars_sit_in_lanes() {
        let mut plan = plan();
        let first = Component::new("First", "blue");
        let second = Component::new("Second", "amber");
        let x = Activity::new(first.id, "X", 0, 4);
        let y = Activity::new(first.id, "Y", 2, 3);
        let z = Activity::new(second.id, "Z", 5, 2);
        plan.dependencies.push(Dependency::new(x.id, z.id, DependencyKind::Blocker));
        plan.components = vec![first.clone(), second.clone()];
        plan.activities = vec![x.clone(), y.clone(), z.clone()];

        let metrics = LayoutMetrics::default();
        let board = layout_board(&plan, &metrics);

        let t1 = board.track(first.id).unwrap();
        let t2 = board.track(second.id).unwrap();
        assert_eq!(t1.top, 0.0);
        assert_eq!(t1.height, 48.0 + 80.0 + 10.0);
        assert_eq!(t2.top, t1.height);
        assert_eq!(board.total_height, t1.height + 88.0);

        let by = board.bar(y.id).unwrap();
        assert_eq!(by.lane, 1);
        assert_eq!(by.absolute_top, 74.0);
        assert_eq!(by.x, 120.0);
        assert_eq!(by.width, 180.0);

        let bz = board.bar(z.id).unwrap();
        assert_eq!(bz.absolute_top, t1.height + 24.0);

        assert_eq!(board.connectors.len(), 1);
        let c = &board.connectors[0];
        assert_eq!(c.from, Point { x: 240.0, y: 44.0 });
        assert_eq!(c.to, Point { x: 300.0, y: bz.center_y });
    }

    #[test]
    fn orphan_activities_get_no_geometry() {
        let mut plan = plan();
        let track = Component::new("Track", "blue");
        let orphan = Activity::new(uuid::Uuid::new_v4(), "Orphan", 0, 1);
        let kept = Activity::new(track.id, "Kept", 0, 1);
        plan.dependencies.push(Dependency::new(orphan.id, kept.id, DependencyKind::Normal));
        plan.components.push(track);
        plan.activities = vec![orphan.clone(), kept];

        let board = layout_board(&plan, &LayoutMetrics::default());
        assert!(board.bar(orphan.id).is_none());
        assert_eq!(board.bars.len(), 1);
        assert!(board.connectors.is_empty());
    }
}
