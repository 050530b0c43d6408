// tests/scenarios.rs

mod common;

use nexus_plan::config::Settings;
use nexus_plan::engine::interaction::week_delta;
use nexus_plan::engine::lanes::pack_lanes;
use nexus_plan::engine::recurrence::expand_milestone;
use nexus_plan::engine::{derive, DragGesture, DragSession, GestureKind, PlanCommand};
use nexus_plan::error::PlanError;
use nexus_plan::model::{DependencyKind, Frequency, Milestone, MilestoneKind, ViewMode};

use crate::common::{date, id_of, init_tracing, start_of, PlanBuilder};

#[test]
fn blocker_raises_successor_start() {
    init_tracing();
    let plan = PlanBuilder::new(date(2025, 1, 1), 24)
        .component("Backend")
        .activity("A", 0, 8)
        .activity("B", 5, 4)
        .edge("A", "B", DependencyKind::Blocker)
        .build();

    let t = plan.propagated(&Settings::default());
    assert_eq!(start_of(&t.plan, "B"), 8);
    assert_eq!(t.plan.activity(id_of(&t.plan, "B")).unwrap().duration, 4);
}

#[test]
fn overlap_forces_new_lane_and_gap_is_reused() {
    let plan = PlanBuilder::new(date(2025, 1, 1), 24)
        .component("Track")
        .activity("X", 0, 4)
        .activity("Y", 2, 3)
        .activity("Z", 5, 2)
        .build();
    let packing = pack_lanes(&plan.activities);
    assert_eq!(packing.lane_of(id_of(&plan, "X")), Some(0));
    assert_eq!(packing.lane_of(id_of(&plan, "Y")), Some(1));
    assert_eq!(packing.lane_of(id_of(&plan, "Z")), Some(0));
}

#[test]
fn weekly_status_report_expands_to_three_occurrences() {
    let plan = PlanBuilder::new(date(2025, 1, 1), 24).build();
    let report = Milestone::recurring("Status", date(2025, 1, 10), date(2025, 1, 24), Frequency::Weekly);
    let occ = expand_milestone(&report, &plan.view).unwrap();
    let offsets: Vec<String> = occ.iter().map(|o| format!("{:.2}", o.week_offset)).collect();
    assert_eq!(offsets, ["1.29", "2.29", "3.29"]);
}

#[test]
fn drag_of_130_pixels_is_two_weeks() {
    assert_eq!(week_delta(130.0, 60.0), 2);
}

#[test]
fn dragging_a_predecessor_pushes_its_successor() {
    init_tracing();
    let settings = Settings::default();
    let plan = PlanBuilder::new(date(2025, 1, 1), 24)
        .component("Backend")
        .activity("A", 0, 2)
        .activity("B", 2, 2)
        .edge("A", "B", DependencyKind::Normal)
        .build();
    let a = plan.activity(id_of(&plan, "A")).unwrap().clone();

    let mut session = DragSession::new();
    session.begin(DragGesture::begin(&a, GestureKind::Move, 10.0));
    let mut last = None;
    for x in [40.0, 100.0, 190.0] {
        if let Some(p) = session.update(x, plan.view.pixels_per_week) {
            last = Some(p);
        }
    }
    let proposal = session.finish().expect("gesture moved the bar");
    assert_eq!(Some(proposal), last);
    assert_eq!(proposal.start_week, 3);

    let t = plan.apply(PlanCommand::CommitDrag(proposal), &settings).unwrap();
    assert_eq!(start_of(&t.plan, "A"), 3);
    assert_eq!(start_of(&t.plan, "B"), 5);
    assert_eq!(t.propagation.unwrap().moved, vec![id_of(&plan, "B")]);
}

#[test]
fn derive_produces_every_view() {
    init_tracing();
    let settings = Settings::default();
    let mut plan = PlanBuilder::new(date(2025, 1, 1), 24)
        .component("Backend")
        .activity("Long", 20, 8)
        .activity("Short", 0, 2)
        .build();
    plan.milestones = vec![
        Milestone::point("Kickoff", MilestoneKind::GoLive, date(2025, 1, 5)),
        Milestone::recurring("Status", date(2025, 1, 10), date(2025, 3, 1), Frequency::Weekly),
    ];

    let derived = derive(&plan, &settings).unwrap();
    assert_eq!(derived.board.tracks.len(), 1);
    assert_eq!(derived.board.bars.len(), 2);
    assert_eq!(derived.axis.primary.len(), 24);
    assert!(derived.axis.secondary.is_empty());
    assert_eq!(derived.risks.len(), 1);
    assert_eq!(derived.risks[0].activity_id, id_of(&plan, "Long"));
    // Kickoff plus Jan 10 .. Feb 28 weekly.
    assert_eq!(derived.occurrences.len(), 1 + 8);

    let quarters = plan
        .apply(PlanCommand::SetViewMode(ViewMode::Quarters), &settings)
        .unwrap()
        .plan;
    let derived = derive(&quarters, &settings).unwrap();
    assert_eq!(quarters.view.view_weeks, 52);
    assert!(derived.risks.is_empty());
    assert_eq!(derived.occurrences.len(), 1);
    let labels: Vec<&str> = derived.axis.primary.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["Q1 2025", "Q2 2025", "Q3 2025", "Q4 2025"]);
    assert_eq!(derived.axis.secondary.len(), 12);
}

#[test]
fn rejected_edges_are_reported_to_the_caller() {
    let settings = Settings::default();
    let plan = PlanBuilder::new(date(2025, 1, 1), 24)
        .component("Backend")
        .activity("A", 0, 2)
        .activity("B", 2, 2)
        .edge("A", "B", DependencyKind::Normal)
        .build();
    let (a, b) = (id_of(&plan, "A"), id_of(&plan, "B"));

    let dup = plan.apply(
        PlanCommand::AddDependency {
            from: a,
            to: b,
            kind: DependencyKind::Blocker,
        },
        &settings,
    );
    assert!(matches!(dup, Err(PlanError::DuplicateDependency { .. })));

    let own = plan.apply(
        PlanCommand::AddDependency {
            from: b,
            to: b,
            kind: DependencyKind::Blocker,
        },
        &settings,
    );
    assert!(matches!(own, Err(PlanError::SelfDependency(id)) if id == b));
}

#[test]
fn sample_plan_propagates_cleanly() {
    let settings = Settings::default();
    let view = nexus_plan::model::ViewWindow::for_mode(
        date(2025, 1, 1),
        settings.default_view_weeks,
        ViewMode::Weeks,
        &settings,
    )
    .unwrap();
    let t = nexus_plan::model::Plan::sample(view).propagated(&settings);
    let report = t.propagation.unwrap();
    assert!(report.is_satisfied());
    assert_eq!(start_of(&t.plan, "UI Design"), 8);
    assert_eq!(start_of(&t.plan, "API Development"), 8);
    assert_eq!(start_of(&t.plan, "App Integration"), 12);
}
