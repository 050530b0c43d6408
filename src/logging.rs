//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `NEXUS_PLAN_LOG` environment variable (any `EnvFilter` directive,
//!    e.g. "debug" or "nexus_plan::engine=trace")
//! 3. default to `info`

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "NEXUS_PLAN_LOG";

/// Initialise the global logging subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> bool {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level.as_directive()),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
