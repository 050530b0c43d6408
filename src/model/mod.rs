pub mod activity;
pub mod component;
pub mod milestone;
pub mod plan;
pub mod timeline;

pub use activity::{Activity, ActivityId, ActivityPatch, Dependency, DependencyId, DependencyKind};
pub use component::{Component, ComponentId};
pub use milestone::{Frequency, Milestone, MilestoneId, MilestoneKind, MilestonePatch, MilestoneTiming};
pub use plan::Plan;
pub use timeline::{ViewMode, ViewWindow};
