//! Mutations as values.
//!
//! `Plan::apply` never modifies the snapshot it is called on: it returns a new
//! snapshot, or an error with the original left as it was. Every mutation that
//! touches activities or dependency edges re-runs propagation before returning.

use chrono::NaiveDate;
use tracing::debug;

use super::interaction::DragProposal;
use super::propagate::{propagate_in_place, PropagationReport};
use crate::config::Settings;
use crate::error::{PlanError, Result};
use crate::model::{
    Activity, ActivityId, ActivityPatch, Component, ComponentId, Dependency, DependencyId,
    DependencyKind, Milestone, MilestoneId, MilestonePatch, Plan, ViewMode,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PlanCommand {
    AddComponent {
        name: String,
        color_tag: Option<String>,
    },
    RenameComponent {
        id: ComponentId,
        name: String,
    },
    /// Also removes the component's activities and every edge touching them.
    RemoveComponent(ComponentId),
    AddActivity {
        component_id: ComponentId,
        name: String,
        start_week: u32,
        duration: u32,
    },
    EditActivity {
        id: ActivityId,
        patch: ActivityPatch,
    },
    RemoveActivity(ActivityId),
    AddDependency {
        from: ActivityId,
        to: ActivityId,
        kind: DependencyKind,
    },
    RemoveDependency(DependencyId),
    AddMilestone(Milestone),
    /// "New Milestone", a go-live on the program start.
    AddDefaultMilestone,
    EditMilestone {
        id: MilestoneId,
        patch: MilestonePatch,
    },
    RemoveMilestone(MilestoneId),
    SetProgramStart(NaiveDate),
    SetViewWeeks(u32),
    SetViewMode(ViewMode),
    CommitDrag(DragProposal),
}

impl PlanCommand {
    fn touches_schedule(&self) -> bool {
        matches!(
            self,
            PlanCommand::RemoveComponent(_)
                | PlanCommand::AddActivity { .. }
                | PlanCommand::EditActivity { .. }
                | PlanCommand::RemoveActivity(_)
                | PlanCommand::AddDependency { .. }
                | PlanCommand::RemoveDependency(_)
                | PlanCommand::CommitDrag(_)
        )
    }
}

/// Outcome of a successful mutation.
#[derive(Debug, Clone)]
pub struct Transition {
    pub plan: Plan,
    /// Present when the mutation touched activities or edges.
    pub propagation: Option<PropagationReport>,
}

impl Plan {
    pub fn apply(&self, command: PlanCommand, settings: &Settings) -> Result<Transition> {
        let mut next = self.clone();
        next.mutate(&command, settings)?;

        let propagation = command.touches_schedule().then(|| {
            propagate_in_place(
                &mut next.activities,
                &next.dependencies,
                settings.propagation_pass_budget,
            )
        });

        debug!(?command, "applied plan command");
        Ok(Transition {
            plan: next,
            propagation,
        })
    }

    /// Run propagation over the current snapshot, e.g. right after loading.
    pub fn propagated(&self, settings: &Settings) -> Transition {
        let mut next = self.clone();
        let report = propagate_in_place(
            &mut next.activities,
            &next.dependencies,
            settings.propagation_pass_budget,
        );
        Transition {
            plan: next,
            propagation: Some(report),
        }
    }

    fn mutate(&mut self, command: &PlanCommand, settings: &Settings) -> Result<()> {
        match command {
            PlanCommand::AddComponent { name, color_tag } => {
                if self.components.len() >= settings.max_components {
                    return Err(PlanError::ComponentLimit(settings.max_components));
                }
                let name = non_empty(name)?;
                let tag = color_tag
                    .clone()
                    .unwrap_or_else(|| crate::model::component::DEFAULT_COLOR_TAG.to_string());
                self.components.push(Component::new(name, tag));
            }
            PlanCommand::RenameComponent { id, name } => {
                let name = non_empty(name)?;
                let component = self
                    .components
                    .iter_mut()
                    .find(|c| c.id == *id)
                    .ok_or(PlanError::UnknownComponent(*id))?;
                component.name = name;
            }
            PlanCommand::RemoveComponent(id) => {
                if self.component(*id).is_none() {
                    return Err(PlanError::UnknownComponent(*id));
                }
                self.components.retain(|c| c.id != *id);
                let removed: Vec<ActivityId> = self
                    .activities
                    .iter()
                    .filter(|a| a.component_id == *id)
                    .map(|a| a.id)
                    .collect();
                self.activities.retain(|a| a.component_id != *id);
                self.dependencies
                    .retain(|d| !removed.contains(&d.from) && !removed.contains(&d.to));
            }
            PlanCommand::AddActivity {
                component_id,
                name,
                start_week,
                duration,
            } => {
                if self.component(*component_id).is_none() {
                    return Err(PlanError::UnknownComponent(*component_id));
                }
                if *duration == 0 {
                    return Err(PlanError::InvalidDuration);
                }
                let name = non_empty(name)?;
                self.activities
                    .push(Activity::new(*component_id, name, *start_week, *duration));
            }
            PlanCommand::EditActivity { id, patch } => {
                let mut patch = patch.clone();
                if let Some(name) = &patch.name {
                    patch.name = Some(non_empty(name)?);
                }
                self.activity_mut(*id)?.apply_patch(&patch);
            }
            PlanCommand::RemoveActivity(id) => {
                if self.activity(*id).is_none() {
                    return Err(PlanError::UnknownActivity(*id));
                }
                self.activities.retain(|a| a.id != *id);
                self.dependencies.retain(|d| d.from != *id && d.to != *id);
            }
            PlanCommand::AddDependency { from, to, kind } => {
                if from == to {
                    return Err(PlanError::SelfDependency(*from));
                }
                for id in [from, to] {
                    if self.activity(*id).is_none() {
                        return Err(PlanError::UnknownActivity(*id));
                    }
                }
                if self
                    .dependencies
                    .iter()
                    .any(|d| d.from == *from && d.to == *to)
                {
                    return Err(PlanError::DuplicateDependency {
                        from: *from,
                        to: *to,
                    });
                }
                self.dependencies.push(Dependency::new(*from, *to, *kind));
            }
            PlanCommand::RemoveDependency(id) => {
                let before = self.dependencies.len();
                self.dependencies.retain(|d| d.id != *id);
                if self.dependencies.len() == before {
                    return Err(PlanError::UnknownDependency(*id));
                }
            }
            PlanCommand::AddMilestone(milestone) => {
                let mut milestone = milestone.clone();
                milestone.name = non_empty(&milestone.name)?;
                self.milestones.push(milestone);
            }
            PlanCommand::AddDefaultMilestone => {
                self.milestones
                    .push(Milestone::new_default(self.view.program_start));
            }
            PlanCommand::EditMilestone { id, patch } => {
                let mut patch = patch.clone();
                if let Some(name) = &patch.name {
                    patch.name = Some(non_empty(name)?);
                }
                self.milestones
                    .iter_mut()
                    .find(|m| m.id == *id)
                    .ok_or(PlanError::UnknownMilestone(*id))?
                    .apply_patch(&patch);
            }
            PlanCommand::RemoveMilestone(id) => {
                let before = self.milestones.len();
                self.milestones.retain(|m| m.id != *id);
                if self.milestones.len() == before {
                    return Err(PlanError::UnknownMilestone(*id));
                }
            }
            PlanCommand::SetProgramStart(date) => {
                self.view.program_start = *date;
            }
            PlanCommand::SetViewWeeks(weeks) => {
                let mut view = self.view.clone();
                view.view_weeks = *weeks;
                view.validate()?;
                self.view = view;
            }
            PlanCommand::SetViewMode(mode) => {
                self.view.mode = *mode;
                self.view.pixels_per_week = mode.pixels_per_week(settings);
                if *mode == ViewMode::Quarters {
                    self.view.view_weeks = self.view.view_weeks.max(settings.quarter_min_weeks);
                }
                self.view.validate()?;
            }
            PlanCommand::CommitDrag(proposal) => {
                self.activity_mut(proposal.activity_id)?
                    .apply_patch(&proposal.patch());
            }
        }
        Ok(())
    }

    fn activity_mut(&mut self, id: ActivityId) -> Result<&mut Activity> {
        self.activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(PlanError::UnknownActivity(id))
    }
}

fn non_empty(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlanError::EmptyName);
    }
    Ok(trimmed.to_string())
}
