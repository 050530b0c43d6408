//! Crate-wide error type.
//!
//! Nothing in the engine is fatal: every variant describes an operation that
//! was rejected or truncated while the previous snapshot stays valid.

use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("dependency {from} -> {to} already exists")]
    DuplicateDependency { from: Uuid, to: Uuid },

    #[error("activity {0} cannot depend on itself")]
    SelfDependency(Uuid),

    /// Propagation could not satisfy every edge. The activities listed sit on
    /// a dependency cycle; the best-effort schedule is still returned.
    #[error("constraints unsatisfiable across {} activities", activities.len())]
    ConstraintUnsatisfiable { activities: Vec<Uuid> },

    #[error("unknown component {0}")]
    UnknownComponent(Uuid),

    #[error("unknown activity {0}")]
    UnknownActivity(Uuid),

    #[error("unknown dependency {0}")]
    UnknownDependency(Uuid),

    #[error("unknown milestone {0}")]
    UnknownMilestone(Uuid),

    #[error("a plan holds at most {0} components")]
    ComponentLimit(usize),

    #[error("name must not be empty")]
    EmptyName,

    #[error("duration must be at least one week")]
    InvalidDuration,

    #[error("invalid view window: {0}")]
    InvalidViewWindow(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
