use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::model::Plan;

/// Save a plan to a JSON file.
pub fn save_plan(plan: &Plan, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, json)?;
    info!(?path, "saved plan");
    Ok(())
}

/// Load a plan from a JSON file. The view window is validated; activities are
/// returned as stored (callers propagate before rendering).
pub fn load_plan(path: &Path) -> Result<Plan> {
    let json = std::fs::read_to_string(path)?;
    let mut plan: Plan = serde_json::from_str(&json)?;
    plan.view.validate()?;
    for activity in plan.activities.iter_mut().filter(|a| a.duration == 0) {
        warn!(id = %activity.id, name = %activity.name, "zero duration on load, using one week");
        activity.duration = 1;
    }
    info!(
        ?path,
        components = plan.components.len(),
        activities = plan.activities.len(),
        "loaded plan"
    );
    Ok(plan)
}
