//! Per-actor coordinator over the fixed animation slots
//!
//! Each clip plays in the slot selected by its id. Higher slots override
//! lower ones joint by joint; while a higher slot is still fading in or is
//! fading out, the pose of the next lower contributing slot shows through.

use std::sync::Arc;

use log::{debug, warn};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use super::clip::AnimationClip;
use super::context::{AnimationContext, LoopParams, TransitionParams, VisibilityOverride};
use super::library::ClipLibrary;
use super::slot::{SkeletonAnimator, SlotChange};
use super::types::{JointPose, Lerp};
use crate::clip_id::{ClipId, clamp_slot};
use crate::config::{AnimationConfig, NUM_SLOTS};

/// Identifies one registration of a context into a slot
///
/// A ticket stays valid until the slot's context is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackTicket {
    pub slot: usize,
    pub serial: u64,
}

/// A set of clips to play together, described by id
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct AnimationRequest {
    pub clips: Vec<ClipId>,
    pub loop_params: LoopParams,
    pub transition_params: Option<TransitionParams>,
    pub visibility: Option<VisibilityOverride>,
}

impl AnimationRequest {
    /// Request a single clip with default loop settings
    pub fn clip(id: impl Into<ClipId>) -> Self {
        Self {
            clips: vec![id.into()],
            ..Self::default()
        }
    }

    pub fn with_loop(mut self, loop_params: LoopParams) -> Self {
        self.loop_params = loop_params;
        self
    }

    pub fn with_transition(mut self, transition_params: TransitionParams) -> Self {
        self.transition_params = Some(transition_params);
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityOverride) -> Self {
        self.visibility = Some(visibility);
        self
    }
}

/// Owns every slot of one actor and resolves the final local pose per joint
#[derive(Debug, Clone)]
pub struct AnimationBlender {
    animators: [Option<SkeletonAnimator>; NUM_SLOTS],
    library: Arc<ClipLibrary>,
    config: AnimationConfig,
    next_serial: u64,
}

impl AnimationBlender {
    /// Create a blender with no slots in use
    pub fn new(library: Arc<ClipLibrary>, config: AnimationConfig) -> Self {
        Self {
            animators: Default::default(),
            library,
            config,
            next_serial: 1,
        }
    }

    pub fn library(&self) -> &Arc<ClipLibrary> {
        &self.library
    }

    /// Swap in a reloaded clip library
    ///
    /// Playing contexts keep the clips they started with.
    pub fn set_library(&mut self, library: Arc<ClipLibrary>) {
        self.library = library;
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Register clips into their slots
    ///
    /// A clip only replaces its slot's context when `override_predicate`
    /// accepts the slot's animator. Returns a ticket for every clip that is
    /// now playing, including low-priority loops that were left running.
    pub fn register(
        &mut self,
        clips: &[Arc<AnimationClip>],
        loop_params: LoopParams,
        transition_params: Option<&TransitionParams>,
        visibility: Option<&VisibilityOverride>,
        override_predicate: impl Fn(&SkeletonAnimator) -> bool,
    ) -> Vec<PlaybackTicket> {
        self.register_with(
            clips,
            loop_params,
            transition_params,
            visibility,
            false,
            override_predicate,
        )
    }

    /// Register every clip of a request, looking clip ids up in the library
    ///
    /// Unknown ids are skipped. `locks_actor` marks the new contexts as
    /// belonging to a blocking routine.
    pub fn play(&mut self, request: &AnimationRequest, locks_actor: bool) -> Vec<PlaybackTicket> {
        let clips: Vec<_> = request
            .clips
            .iter()
            .filter_map(|id| {
                let clip = self.library.get(id).cloned();
                if clip.is_none() {
                    warn!("Skipping unknown clip '{id}'");
                }
                clip
            })
            .collect();

        self.register_with(
            &clips,
            request.loop_params,
            request.transition_params.as_ref(),
            request.visibility.as_ref(),
            locks_actor,
            |_| true,
        )
    }

    fn register_with(
        &mut self,
        clips: &[Arc<AnimationClip>],
        loop_params: LoopParams,
        transition_params: Option<&TransitionParams>,
        visibility: Option<&VisibilityOverride>,
        locks_actor: bool,
        override_predicate: impl Fn(&SkeletonAnimator) -> bool,
    ) -> Vec<PlaybackTicket> {
        let mut tickets = Vec::with_capacity(clips.len());

        for clip in clips {
            let slot = clip.id().slot_index();
            let in_between = transition_params
                .and_then(|params| params.in_between.as_ref())
                .and_then(|id| self.resolve_in_between(id, slot));

            let animator = self.animators[slot].get_or_insert_with(|| SkeletonAnimator::new(slot));
            if !override_predicate(animator) {
                debug!("Slot {slot}: registration of '{}' declined", clip.id());
                continue;
            }

            let serial = self.next_serial;
            let mut context =
                AnimationContext::new(clip.clone(), loop_params, transition_params.cloned())
                    .with_visibility(visibility.cloned());
            context.set_serial(serial);
            context.set_locks_actor(locks_actor);

            match animator.set_next_animation(context, &self.config, in_between) {
                SlotChange::Replaced | SlotChange::Blending => {
                    self.next_serial += 1;
                    tickets.push(PlaybackTicket { slot, serial });
                }
                SlotChange::Unchanged => {
                    if let Some(current) = animator.current() {
                        tickets.push(PlaybackTicket {
                            slot,
                            serial: current.serial(),
                        });
                    }
                }
            }
        }

        tickets
    }

    fn resolve_in_between(&self, id: &ClipId, slot: usize) -> Option<Arc<AnimationClip>> {
        let clip = self.library.get(id).cloned();
        if clip.is_none() {
            warn!("Slot {slot}: in-between clip '{id}' not found");
        }
        clip
    }

    /// Advance every slot by `dt` frames
    pub fn update(&mut self, dt: f32) {
        for animator in self.animators.iter_mut().flatten() {
            animator.update(dt);
        }
    }

    /// Final local pose of a joint, or None when no slot drives it
    pub fn joint_transform(&self, joint: usize) -> Option<JointPose> {
        let mut contributions = self.animators.iter().rev().flatten().filter_map(|animator| {
            animator
                .joint_transform(joint)
                .map(|pose| (animator, pose))
        });

        let (high_animator, high) = contributions.next()?;
        match contributions.next() {
            None => Some(high),
            Some((_, low)) => Some(cross_slot_interpolation(high_animator, high, low)),
        }
    }

    /// Visibility overrides of every assigned context, lowest slot first
    pub fn visibility_overrides(&self) -> Vec<&VisibilityOverride> {
        self.animators
            .iter()
            .flatten()
            .filter_map(|animator| animator.current()?.visibility())
            .collect()
    }

    /// True while a context started by a blocking routine is still playing
    pub fn is_animation_locked(&self) -> bool {
        self.animators
            .iter()
            .flatten()
            .filter_map(SkeletonAnimator::current)
            .any(|context| context.locks_actor() && !context.is_complete())
    }

    /// Check whether the context a ticket refers to has stopped playing
    ///
    /// Replaced contexts count as finished.
    pub fn is_finished(&self, ticket: PlaybackTicket) -> bool {
        match self.animator(ticket.slot).and_then(SkeletonAnimator::current) {
            Some(context) if context.serial() == ticket.serial => context.is_complete(),
            _ => true,
        }
    }

    /// Animator of a slot, if the slot has been used; the index is clamped
    pub fn animator(&self, slot: usize) -> Option<&SkeletonAnimator> {
        self.animators[clamp_slot(slot)].as_ref()
    }

    /// Stop every slot
    pub fn clear(&mut self) {
        for animator in self.animators.iter_mut().flatten() {
            animator.clear();
        }
    }
}

/// Reveal the lower slot while the higher one fades in or out
fn cross_slot_interpolation(
    high_animator: &SkeletonAnimator,
    high: JointPose,
    low: JointPose,
) -> JointPose {
    let Some(context) = high_animator.current() else {
        return high;
    };

    let delta = context.fade_in_weight().max(context.fade_out_weight());
    if delta <= 0.0 {
        high
    } else if delta >= 1.0 {
        low
    } else {
        high.lerp(&low, delta)
    }
}
