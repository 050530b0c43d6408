//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::engine::calendar::parse_date;
use crate::model::ViewMode;

/// Command-line arguments for `nexus-plan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nexus-plan",
    version,
    about = "Lay out a roadmap: lanes, dependency propagation, milestones and risks.",
    long_about = None
)]
pub struct CliArgs {
    /// Plan file (JSON). Without one, a sample roadmap is used.
    #[arg(value_name = "PLAN")]
    pub plan: Option<PathBuf>,

    /// Axis granularity.
    #[arg(long, value_enum, value_name = "MODE")]
    pub view_mode: Option<ViewModeArg>,

    /// Number of visible weeks.
    #[arg(long, value_name = "N")]
    pub view_weeks: Option<u32>,

    /// Program start date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE", value_parser = parse_program_start)]
    pub program_start: Option<NaiveDate>,

    /// Write the schedule report as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Save the propagated plan as JSON.
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Settings file; defaults to the OS config directory.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `NEXUS_PLAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ViewModeArg {
    Weeks,
    Quarters,
}

impl From<ViewModeArg> for ViewMode {
    fn from(arg: ViewModeArg) -> Self {
        match arg {
            ViewModeArg::Weeks => ViewMode::Weeks,
            ViewModeArg::Quarters => ViewMode::Quarters,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_program_start(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
