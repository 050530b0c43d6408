//! Pointer drags turned into whole-week schedule proposals.
//!
//! The UI owns the [`DragSession`] for the lifetime of a gesture, feeds it raw
//! pointer x coordinates, and commits the final proposal through
//! `PlanCommand::CommitDrag`. Nothing here touches a plan.

use serde::{Deserialize, Serialize};

use crate::model::{Activity, ActivityId, ActivityPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    /// Drag the bar: shifts the start week.
    Move,
    /// Drag the right edge: changes the duration.
    Resize,
}

/// Reference values captured when the pointer went down.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub activity_id: ActivityId,
    pub kind: GestureKind,
    pub start_x: f64,
    pub original_start: u32,
    pub original_duration: u32,
}

impl DragGesture {
    pub fn begin(activity: &Activity, kind: GestureKind, start_x: f64) -> Self {
        Self {
            activity_id: activity.id,
            kind,
            start_x,
            original_start: activity.start_week,
            original_duration: activity.duration,
        }
    }

    /// Proposed schedule for the pointer currently at `pointer_x`.
    pub fn propose(&self, pointer_x: f64, pixels_per_week: f64) -> DragProposal {
        let delta = week_delta(pointer_x - self.start_x, pixels_per_week);
        let (start_week, duration) =
            translate(self.kind, self.original_start, self.original_duration, delta);
        DragProposal {
            activity_id: self.activity_id,
            start_week,
            duration,
        }
    }

    fn unchanged(&self, proposal: &DragProposal) -> bool {
        proposal.start_week == self.original_start && proposal.duration == self.original_duration
    }
}

/// A candidate schedule for the dragged activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragProposal {
    pub activity_id: ActivityId,
    pub start_week: u32,
    pub duration: u32,
}

impl DragProposal {
    pub fn patch(&self) -> ActivityPatch {
        ActivityPatch {
            name: None,
            start_week: Some(self.start_week),
            duration: Some(self.duration),
        }
    }
}

/// Pixels to whole weeks, rounding halves towards positive infinity.
///
/// A non-positive or non-finite scale yields no movement.
pub fn week_delta(pixel_delta: f64, pixels_per_week: f64) -> i64 {
    if !pixels_per_week.is_finite() || pixels_per_week <= 0.0 || !pixel_delta.is_finite() {
        return 0;
    }
    (pixel_delta / pixels_per_week + 0.5).floor() as i64
}

/// Apply a week delta to the reference values. Start never goes below 0 and
/// duration never below 1.
pub fn translate(kind: GestureKind, original_start: u32, original_duration: u32, delta: i64) -> (u32, u32) {
    let clamp = |value: i64, floor: i64| value.clamp(floor, i64::from(u32::MAX)) as u32;
    match kind {
        GestureKind::Move => (
            clamp(i64::from(original_start).saturating_add(delta), 0),
            original_duration,
        ),
        GestureKind::Resize => (
            original_start,
            clamp(i64::from(original_duration).saturating_add(delta), 1),
        ),
    }
}

/// Transient gesture state held by the UI between pointer down and release.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    gesture: Option<DragGesture>,
    last: Option<DragProposal>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture. Any gesture still in flight is discarded.
    pub fn begin(&mut self, gesture: DragGesture) {
        self.gesture = Some(gesture);
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        self.gesture.as_ref()
    }

    /// Feed a pointer position. Returns a proposal only when it differs from
    /// the one previously returned (or from the original values, initially).
    pub fn update(&mut self, pointer_x: f64, pixels_per_week: f64) -> Option<DragProposal> {
        let gesture = self.gesture.as_ref()?;
        let proposal = gesture.propose(pointer_x, pixels_per_week);
        let previous_same = match &self.last {
            Some(last) => *last == proposal,
            None => gesture.unchanged(&proposal),
        };
        if previous_same {
            return None;
        }
        self.last = Some(proposal);
        Some(proposal)
    }

    /// Pointer released: hand back the final proposal, once. `None` when the
    /// gesture ended where it started.
    pub fn finish(&mut self) -> Option<DragProposal> {
        let gesture = self.gesture.take()?;
        self.last.take().filter(|p| !gesture.unchanged(p))
    }

    /// Abnormal end (focus loss, escape): drop everything.
    pub fn cancel(&mut self) {
        self.gesture = None;
        self.last = None;
    }
}
