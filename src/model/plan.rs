use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::activity::{Activity, ActivityId, Dependency, DependencyKind};
use super::component::{Component, ComponentId, COLOR_TAGS};
use super::milestone::{Frequency, Milestone, MilestoneKind};
use super::timeline::ViewWindow;

/// A roadmap snapshot: the four entity collections plus the view window.
///
/// Snapshots are treated as values. Mutations go through
/// [`Plan::apply`](crate::engine::commands) and produce a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub name: String,
    pub components: Vec<Component>,
    pub activities: Vec<Activity>,
    pub dependencies: Vec<Dependency>,
    pub milestones: Vec<Milestone>,
    pub view: ViewWindow,
}

impl Plan {
    pub fn new(name: impl Into<String>, view: ViewWindow) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            activities: Vec::new(),
            dependencies: Vec::new(),
            milestones: Vec::new(),
            view,
        }
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Activities on one track, in plan order.
    pub fn activities_in(&self, component: ComponentId) -> impl Iterator<Item = &Activity> {
        self.activities
            .iter()
            .filter(move |a| a.component_id == component)
    }

    /// Dependencies whose successor is `activity`.
    pub fn dependencies_into(&self, activity: ActivityId) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(move |d| d.to == activity)
    }

    /// Generate a sample roadmap for demonstration.
    pub fn sample(view: ViewWindow) -> Self {
        let mut plan = Plan::new("Sample Roadmap", view);

        let backend = Component::new("Backend Infrastructure", COLOR_TAGS[0]);
        let mobile = Component::new("Mobile App Dev", COLOR_TAGS[1]);
        let web = Component::new("Web Portal", COLOR_TAGS[2]);
        let qa = Component::new("QA & Compliance", COLOR_TAGS[3]);

        let architecture = Activity::new(backend.id, "System Architecture", 0, 8);
        let database = Activity::new(backend.id, "Database Setup", 2, 4);
        let ui_design = Activity::new(mobile.id, "UI Design", 5, 4);
        let integration = Activity::new(mobile.id, "App Integration", 10, 4);
        let api = Activity::new(web.id, "API Development", 5, 5);
        let review = Activity::new(qa.id, "Compliance Review Meeting", 2, 1);

        plan.dependencies = vec![
            Dependency::new(architecture.id, ui_design.id, DependencyKind::Blocker),
            Dependency::new(architecture.id, api.id, DependencyKind::Blocker),
            Dependency::new(database.id, api.id, DependencyKind::Normal),
            Dependency::new(ui_design.id, integration.id, DependencyKind::Blocker),
        ];

        plan.components = vec![backend, mobile, web, qa];
        plan.activities = vec![architecture, database, ui_design, integration, api, review];

        if let (Some(kickoff), Some(status_from), Some(status_to)) = (
            NaiveDate::from_ymd_opt(2025, 1, 5),
            NaiveDate::from_ymd_opt(2025, 1, 10),
            NaiveDate::from_ymd_opt(2025, 3, 1),
        ) {
            plan.milestones = vec![
                Milestone::point("Program Kickoff", MilestoneKind::GoLive, kickoff),
                Milestone::recurring("Weekly Status", status_from, status_to, Frequency::Weekly),
            ];
        }

        plan
    }
}
