//! Timed cross-fades from a captured pose to a new context

use std::sync::Arc;

use super::clip::AnimationClip;
use super::types::{JointPose, Lerp};

/// Per-joint poses captured when a slot switches contexts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    poses: Vec<Option<JointPose>>,
}

impl Snapshot {
    /// Capture `num_joints` poses from a sampling function
    pub fn capture(num_joints: usize, sample: impl FnMut(usize) -> Option<JointPose>) -> Self {
        Self {
            poses: (0..num_joints).map(sample).collect(),
        }
    }

    /// Captured pose of a joint, if that joint was driven
    pub fn get(&self, joint: usize) -> Option<JointPose> {
        self.poses.get(joint).copied().flatten()
    }

    /// Number of joints captured
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

/// Cross-fade from a snapshot into the slot's current context
///
/// When an in-between clip is present the fade passes through its first
/// frame at the halfway point.
#[derive(Debug, Clone)]
pub struct AnimationTransition {
    previous: Snapshot,
    in_between: Option<Arc<AnimationClip>>,
    duration: f32,
    progress: f32,
}

impl AnimationTransition {
    /// Start a transition; `duration` is raised to `min_duration` if shorter
    pub fn new(
        previous: Snapshot,
        duration: f32,
        min_duration: f32,
        in_between: Option<Arc<AnimationClip>>,
    ) -> Self {
        let duration = if duration.is_finite() {
            duration.max(min_duration)
        } else {
            min_duration
        };
        debug_assert!(duration > 0.0, "transition duration must be positive");

        Self {
            previous,
            in_between,
            duration,
            progress: 0.0,
        }
    }

    /// Advance by `dt` frames; returns true once the transition has finished
    pub fn advance(&mut self, dt: f32) -> bool {
        self.progress += dt.max(0.0);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= self.duration
    }

    /// Fraction of the transition elapsed, in `[0, 1]`
    pub fn weight(&self) -> f32 {
        (self.progress / self.duration).clamp(0.0, 1.0)
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn in_between(&self) -> Option<&Arc<AnimationClip>> {
        self.in_between.as_ref()
    }

    /// Blend the captured pose of a joint towards the next context's pose
    pub fn blend(&self, joint: usize, next: Option<JointPose>) -> Option<JointPose> {
        let previous = self.previous.get(joint);
        let t = self.weight();

        let Some(midpoint) = self
            .in_between
            .as_ref()
            .and_then(|clip| clip.sample(joint, 0.0))
        else {
            return blend_optional(previous, next, t);
        };

        if t < 0.5 {
            blend_optional(previous, Some(midpoint), t * 2.0)
        } else {
            blend_optional(Some(midpoint), next, t * 2.0 - 1.0)
        }
    }
}

fn blend_optional(from: Option<JointPose>, to: Option<JointPose>, t: f32) -> Option<JointPose> {
    match (from, to) {
        (Some(from), Some(to)) => Some(from.lerp(&to, t)),
        (from, None) => from,
        (None, to) => to,
    }
}
