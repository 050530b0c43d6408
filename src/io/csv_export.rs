use std::io::Write;
use std::path::Path;

use crate::engine::calendar::date_at_week;
use crate::engine::lanes::pack_lanes;
use crate::error::Result;
use crate::model::Plan;

/// Write the schedule as a semicolon-delimited report.
///
/// Columns: Component ; Activity ; Start Week ; Duration ; Start Date ; End Date ; Lane
/// Rows follow component order, then lane-packing order within a track.
/// Dates are formatted as DD/MM/YYYY; the end date is the last day of the
/// final week. Returns the number of activities written.
pub fn write_schedule<W: Write>(plan: &Plan, writer: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record([
        "Component",
        "Activity",
        "Start Week",
        "Duration",
        "Start Date",
        "End Date",
        "Lane",
    ])?;

    let mut written = 0;
    for component in &plan.components {
        let packing = pack_lanes(plan.activities_in(component.id));
        for assignment in &packing.assignments {
            let Some(activity) = plan.activity(assignment.activity_id) else {
                continue;
            };
            let start = date_at_week(plan.view.program_start, i64::from(activity.start_week))?;
            let end = date_at_week(plan.view.program_start, i64::from(activity.end_week()))?
                .pred_opt()
                .unwrap_or(start);
            let start_week = activity.start_week.to_string();
            let duration = activity.duration.to_string();
            let start_date = start.format("%d/%m/%Y").to_string();
            let end_date = end.format("%d/%m/%Y").to_string();
            let lane = assignment.lane.to_string();
            wtr.write_record([
                component.name.as_str(),
                activity.name.as_str(),
                start_week.as_str(),
                duration.as_str(),
                start_date.as_str(),
                end_date.as_str(),
                lane.as_str(),
            ])?;
            written += 1;
        }
    }

    wtr.flush()?;
    Ok(written)
}

/// Export the schedule report to a file.
pub fn export_schedule(plan: &Plan, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    write_schedule(plan, file)
}
