//! Roadmap timeline engine.
//!
//! Components (tracks) hold activities scheduled in whole weeks from a program
//! start; dependency edges push successors past their predecessors; milestones
//! (one-off or recurring) sit on the same axis. The [`engine`] module holds the
//! pure layout and scheduling functions, [`model`] the plain data they consume.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;

use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::Settings;
use crate::engine::{derive, Derived, PlanCommand};
use crate::error::Result;
use crate::model::{Plan, ViewMode, ViewWindow};

/// High-level entry point used by `main.rs`.
///
/// Loads (or synthesises) a plan, applies view overrides from the command
/// line, propagates dependencies, prints the derived layout and optionally
/// writes the CSV report and the propagated plan.
pub fn run(args: CliArgs) -> Result<()> {
    let settings = match &args.settings {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };

    let mut plan = match &args.plan {
        Some(path) => io::load_plan(path)?,
        None => {
            let start = args
                .program_start
                .unwrap_or_else(|| chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default());
            let view =
                ViewWindow::for_mode(start, settings.default_view_weeks, ViewMode::Weeks, &settings)?;
            Plan::sample(view)
        }
    };

    let mut overrides = Vec::new();
    if let Some(start) = args.program_start {
        overrides.push(PlanCommand::SetProgramStart(start));
    }
    if let Some(mode) = args.view_mode {
        overrides.push(PlanCommand::SetViewMode(mode.into()));
    }
    if let Some(weeks) = args.view_weeks {
        overrides.push(PlanCommand::SetViewWeeks(weeks));
    }
    for command in overrides {
        plan = plan.apply(command, &settings)?.plan;
    }

    let transition = plan.propagated(&settings);
    if let Some(err) = transition.propagation.as_ref().and_then(|r| r.unsatisfiable()) {
        warn!(%err, "schedule still violates some dependencies");
    }
    let plan = transition.plan;

    let derived = derive(&plan, &settings)?;
    print_report(&plan, &derived);

    if let Some(path) = &args.csv {
        let rows = io::export_schedule(&plan, path)?;
        info!(?path, rows, "wrote schedule report");
    }
    if let Some(path) = &args.save {
        io::save_plan(&plan, path)?;
    }
    Ok(())
}

fn print_report(plan: &Plan, derived: &Derived) {
    println!("{} ({} from {})", plan.name, weeks_label(plan.view.view_weeks), plan.view.program_start);
    println!();

    println!("axis:");
    let row = |buckets: &[engine::calendar::Bucket]| {
        buckets
            .iter()
            .map(|b| b.label.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    };
    println!("  {}", row(derived.axis.primary.as_slice()));
    if !derived.axis.secondary.is_empty() {
        println!("  {}", row(derived.axis.secondary.as_slice()));
    }
    println!();

    println!("tracks ({}):", derived.board.tracks.len());
    for track in &derived.board.tracks {
        let name = plan
            .component(track.component_id)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        println!(
            "  - {name}: {} activities, {} lanes, height {}",
            track.activity_count,
            track.lane_count.max(1),
            track.height
        );
        for bar in derived.board.bars.iter().filter(|b| b.component_id == track.component_id) {
            if let Some(activity) = plan.activity(bar.activity_id) {
                println!(
                    "      lane {}: {} [W{}..W{})",
                    bar.lane,
                    activity.name,
                    activity.start_week,
                    activity.end_week()
                );
            }
        }
    }
    println!();

    println!("milestones ({}):", derived.occurrences.len());
    for occ in &derived.occurrences {
        println!(
            "  - {} ({}) {} @ week {:.2}",
            occ.name, occ.kind, occ.date, occ.week_offset
        );
    }
    for skipped in &derived.skipped_milestones {
        println!("  ! {}: {}", skipped.name, skipped.error());
    }
    println!();

    if derived.risks.is_empty() {
        println!("risks: none, on track");
    } else {
        println!("risks ({}):", derived.risks.len());
        for risk in &derived.risks {
            println!("  - [{:?}] {}", risk.level, risk.message);
        }
    }
}

fn weeks_label(weeks: u32) -> String {
    if weeks == 1 {
        "1 week".to_string()
    } else {
        format!("{weeks} weeks")
    }
}
