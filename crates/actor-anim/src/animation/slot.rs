//! One animation layer of an actor

use std::mem;
use std::sync::Arc;

use log::{debug, trace};

use super::clip::AnimationClip;
use super::context::AnimationContext;
use super::transition::{AnimationTransition, Snapshot};
use super::types::JointPose;
use crate::config::AnimationConfig;

/// What a slot is currently playing
#[derive(Debug, Clone, Default)]
pub enum SlotState {
    /// Nothing assigned
    #[default]
    Empty,
    /// A single context playing on its own
    Active(AnimationContext),
    /// A context fading in over a snapshot of whatever played before it
    Transitioning {
        transition: AnimationTransition,
        context: AnimationContext,
    },
}

impl SlotState {
    /// The context currently assigned to the slot
    pub fn context(&self) -> Option<&AnimationContext> {
        match self {
            Self::Empty => None,
            Self::Active(context) | Self::Transitioning { context, .. } => Some(context),
        }
    }

    /// The in-flight transition, if any
    pub fn transition(&self) -> Option<&AnimationTransition> {
        match self {
            Self::Transitioning { transition, .. } => Some(transition),
            _ => None,
        }
    }
}

/// Result of offering a new context to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    /// The context replaced the previous one immediately
    Replaced,
    /// The context is fading in over the previous pose
    Blending,
    /// The slot was already looping this clip at low priority
    Unchanged,
}

/// Drives a single slot: owns its state and applies the replacement rules
#[derive(Debug, Clone)]
pub struct SkeletonAnimator {
    slot: usize,
    state: SlotState,
}

impl SkeletonAnimator {
    /// Create an empty animator for the given slot
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            state: SlotState::Empty,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    /// The context currently assigned to this slot
    pub fn current(&self) -> Option<&AnimationContext> {
        self.state.context()
    }

    /// The in-flight transition, if any
    pub fn transition(&self) -> Option<&AnimationTransition> {
        self.state.transition()
    }

    /// Offer a new context to this slot
    ///
    /// `in_between` is the already resolved in-between clip for the new
    /// context's transition, if it asked for one.
    pub fn set_next_animation(
        &mut self,
        next: AnimationContext,
        config: &AnimationConfig,
        in_between: Option<Arc<AnimationClip>>,
    ) -> SlotChange {
        let requested_in = next.transition_params().map(|p| p.transition_in_time);

        let Some(current) = self.state.context() else {
            debug!("Slot {}: start '{}'", self.slot, next.clip_id());
            self.state = SlotState::Active(next);
            return SlotChange::Replaced;
        };

        if requested_in == Some(0.0) {
            debug!("Slot {}: cut to '{}'", self.slot, next.clip_id());
            self.state = SlotState::Active(next);
            return SlotChange::Replaced;
        }

        if current.clip_id() == next.clip_id() && current.loop_params().low_priority {
            trace!("Slot {}: '{}' already looping", self.slot, next.clip_id());
            return SlotChange::Unchanged;
        }

        if config.is_non_blending(self.slot) {
            debug!("Slot {}: replace with '{}'", self.slot, next.clip_id());
            self.state = SlotState::Active(next);
            return SlotChange::Replaced;
        }

        let duration = match requested_in {
            Some(frames) if frames > 0.0 => frames,
            _ => current
                .transition_out_time()
                .unwrap_or(config.default_transition_frames),
        };

        let num_joints = current.clip().num_joints().max(next.clip().num_joints());
        let snapshot = Snapshot::capture(num_joints, |joint| self.joint_transform(joint));

        debug!(
            "Slot {}: blend '{}' -> '{}' over {duration} frames",
            self.slot,
            current.clip_id(),
            next.clip_id()
        );

        let transition = AnimationTransition::new(
            snapshot,
            duration,
            config.min_transition_frames,
            in_between,
        );
        self.state = SlotState::Transitioning {
            transition,
            context: next,
        };
        SlotChange::Blending
    }

    /// Advance the slot by `dt` frames
    pub fn update(&mut self, dt: f32) {
        self.state = match mem::take(&mut self.state) {
            SlotState::Empty => SlotState::Empty,
            SlotState::Active(mut context) => {
                context.advance(dt);
                SlotState::Active(context)
            }
            SlotState::Transitioning {
                mut transition,
                mut context,
            } => {
                context.advance(dt);
                if transition.advance(dt) {
                    trace!("Slot {}: transition to '{}' done", self.slot, context.clip_id());
                    SlotState::Active(context)
                } else {
                    SlotState::Transitioning {
                        transition,
                        context,
                    }
                }
            }
        };
    }

    /// Local pose this slot contributes for a joint
    pub fn joint_transform(&self, joint: usize) -> Option<JointPose> {
        match &self.state {
            SlotState::Empty => None,
            SlotState::Active(context) => context.sample(joint),
            SlotState::Transitioning {
                transition,
                context,
            } => transition.blend(joint, context.sample(joint)),
        }
    }

    /// Drop whatever the slot is playing
    pub fn clear(&mut self) {
        self.state = SlotState::Empty;
    }
}
