#![allow(dead_code)]

use std::sync::Once;

use chrono::NaiveDate;
use nexus_plan::model::{Activity, ActivityId, Component, Dependency, DependencyKind, Plan, ViewWindow};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Enable levels with e.g. `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Small builder for plans with named activities.
pub struct PlanBuilder {
    plan: Plan,
}

impl PlanBuilder {
    pub fn new(program_start: NaiveDate, view_weeks: u32) -> Self {
        let view = ViewWindow::new(program_start, view_weeks, 60.0).expect("valid view");
        Self {
            plan: Plan::new("test plan", view),
        }
    }

    pub fn component(mut self, name: &str) -> Self {
        self.plan.components.push(Component::new(name, "slate"));
        self
    }

    /// Add an activity to the most recently added component.
    pub fn activity(mut self, name: &str, start_week: u32, duration: u32) -> Self {
        let component = self
            .plan
            .components
            .last()
            .expect("add a component first")
            .id;
        self.plan
            .activities
            .push(Activity::new(component, name, start_week, duration));
        self
    }

    pub fn edge(mut self, from: &str, to: &str, kind: DependencyKind) -> Self {
        let from = id_of(&self.plan, from);
        let to = id_of(&self.plan, to);
        self.plan.dependencies.push(Dependency::new(from, to, kind));
        self
    }

    pub fn build(self) -> Plan {
        self.plan
    }
}

pub fn id_of(plan: &Plan, name: &str) -> ActivityId {
    plan.activities
        .iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| panic!("no activity named {name}"))
        .id
}

pub fn start_of(plan: &Plan, name: &str) -> u32 {
    plan.activity(id_of(plan, name)).expect("activity").start_week
}
