use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::component::ComponentId;

pub type ActivityId = Uuid;
pub type DependencyId = Uuid;

/// Visual flavour of a dependency link.
///
/// Both kinds enforce the same start-time floor during propagation; the kind
/// only changes how the connector is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Blocker,
    #[default]
    Normal,
}

/// A precedence link: `to` may not start before `from` ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub id: DependencyId,
    pub from: ActivityId,
    pub to: ActivityId,
    #[serde(rename = "type", default)]
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(from: ActivityId, to: ActivityId, kind: DependencyKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            from,
            to,
            kind,
        }
    }
}

/// A unit of work placed on a component's track.
///
/// Schedule is expressed in whole weeks from the program start. The end week
/// is exclusive: an activity occupies `[start_week, start_week + duration)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    pub component_id: ComponentId,
    pub name: String,
    pub start_week: u32,
    /// Always at least 1.
    pub duration: u32,
}

impl Activity {
    /// Create a new activity. A zero duration is bumped to one week.
    pub fn new(
        component_id: ComponentId,
        name: impl Into<String>,
        start_week: u32,
        duration: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            component_id,
            name: name.into(),
            start_week,
            duration: duration.max(1),
        }
    }

    /// Exclusive end week.
    pub fn end_week(&self) -> u32 {
        self.start_week.saturating_add(self.duration)
    }

    /// Whether the two half-open week ranges share any week.
    pub fn overlaps(&self, other: &Activity) -> bool {
        self.start_week < other.end_week() && other.start_week < self.end_week()
    }

    pub fn apply_patch(&mut self, patch: &ActivityPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(start) = patch.start_week {
            self.start_week = start;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration.max(1);
        }
    }
}

/// Partial update for an activity. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPatch {
    pub name: Option<String>,
    pub start_week: Option<u32>,
    pub duration: Option<u32>,
}

impl ActivityPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.start_week.is_none() && self.duration.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_ranges_do_not_overlap() {
        let c = Uuid::new_v4();
        let a = Activity::new(c, "a", 0, 4);
        let b = Activity::new(c, "b", 4, 2);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&Activity::new(c, "c", 3, 1)));
    }

    #[test]
    fn patch_clamps_duration() {
        let mut a = Activity::new(Uuid::new_v4(), "a", 2, 3);
        a.apply_patch(&ActivityPatch {
            duration: Some(0),
            ..Default::default()
        });
        assert_eq!(a.duration, 1);
        assert_eq!(a.start_week, 2);
    }

    #[test]
    fn dependency_kind_uses_type_field() {
        let dep = Dependency::new(Uuid::new_v4(), Uuid::new_v4(), DependencyKind::Blocker);
        let json = serde_json::to_value(&dep).unwrap();
        assert_eq!(json["type"], "blocker");
    }
}
