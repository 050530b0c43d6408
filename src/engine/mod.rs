//! The timeline engine: pure functions over a [`Plan`] snapshot.
//!
//! Derived data is always recomputed from the current snapshot; [`Memo`] can
//! skip the work when the snapshot has not changed.

pub mod board;
pub mod calendar;
pub mod commands;
pub mod interaction;
pub mod lanes;
pub mod memo;
pub mod propagate;
pub mod recurrence;
pub mod risk;

use serde::Serialize;

pub use board::{layout_board, Board};
pub use calendar::Axis;
pub use commands::{PlanCommand, Transition};
pub use interaction::{DragGesture, DragProposal, DragSession, GestureKind};
pub use memo::Memo;
pub use propagate::{propagate, PropagationReport};
pub use recurrence::{Expansion, Occurrence, SkippedMilestone};
pub use risk::{RiskFinding, RiskLevel};

use crate::config::Settings;
use crate::error::Result;
use crate::model::Plan;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derived {
    pub board: Board,
    pub risks: Vec<RiskFinding>,
    /// Filtered by the view mode.
    pub occurrences: Vec<Occurrence>,
    /// Milestones whose dates could not be read.
    pub skipped_milestones: Vec<SkippedMilestone>,
    pub axis: Axis,
}

/// Derive layout, risks, milestone occurrences and axis buckets.
///
/// Expects an already propagated plan; see [`Plan::apply`].
pub fn derive(plan: &Plan, settings: &Settings) -> Result<Derived> {
    plan.view.validate()?;
    let expansion = recurrence::visible_occurrences(&plan.milestones, &plan.view);
    Ok(Derived {
        board: layout_board(plan, &settings.layout),
        risks: risk::evaluate_risks(&plan.activities, plan.view.view_weeks),
        occurrences: expansion.occurrences,
        skipped_milestones: expansion.skipped,
        axis: calendar::axis(&plan.view)?,
    })
}

/// Memoized [`derive`], keyed on the snapshot and the settings.
pub type DerivedCache = Memo<(Plan, Settings), Derived>;

pub fn derive_cached<'a>(
    cache: &'a mut DerivedCache,
    plan: &Plan,
    settings: &Settings,
) -> Result<&'a Derived> {
    cache.get_or_try_compute(&(plan.clone(), settings.clone()), |(plan, settings)| {
        derive(plan, settings)
    })
}
