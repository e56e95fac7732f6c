//! One animated actor: routine queue, slot blender and solved skeleton

use std::sync::Arc;

use log::trace;

use crate::animation::{
    AnimationBlender, AnimationRequest, ClipLibrary, PlaybackTicket, VisibilityOverride,
    WorldTransform,
};
use crate::config::AnimationConfig;
use crate::error::{AnimError, Result};
use crate::scheduler::{
    ActorRoutineQueue, Routine, RoutineContext, RoutineOptions, RoutinePlayer, RoutineSource,
};
use crate::skeleton::{JointHierarchy, JointRuntimeState, SkeletonInstance};

impl RoutinePlayer for AnimationBlender {
    type Handle = Vec<PlaybackTicket>;

    fn play(&mut self, _context: &RoutineContext, routine: Routine, blocking: bool) -> Self::Handle {
        Self::play(self, &routine.animation, blocking)
    }

    fn is_finished(&self, handle: &Self::Handle) -> bool {
        handle.iter().all(|&ticket| Self::is_finished(self, ticket))
    }

    fn is_animation_locked(&self) -> bool {
        Self::is_animation_locked(self)
    }
}

/// Check that every clip in a library matches the skeleton's joint count
fn validate_library(hierarchy: &JointHierarchy, library: &ClipLibrary) -> Result<()> {
    for clip in library.iter() {
        if clip.num_joints() != hierarchy.len() {
            return Err(AnimError::JointCountMismatch {
                expected: hierarchy.len(),
                actual: clip.num_joints(),
            });
        }
    }
    Ok(())
}

/// A skeletal actor ticked once per frame
///
/// Each [`update`](Self::update) runs the routine queue, advances the
/// blender and re-solves the skeleton, in that order.
#[derive(Debug)]
pub struct Actor {
    id: u64,
    blender: AnimationBlender,
    skeleton: SkeletonInstance,
    routines: ActorRoutineQueue<Vec<PlaybackTicket>>,
}

impl Actor {
    /// Create an actor posed at the bind pose
    ///
    /// Fails if any clip in the library disagrees with the skeleton on the
    /// number of joints.
    pub fn new(
        id: u64,
        hierarchy: Arc<JointHierarchy>,
        library: Arc<ClipLibrary>,
        config: AnimationConfig,
    ) -> Result<Self> {
        validate_library(&hierarchy, &library)?;
        Ok(Self {
            id,
            routines: ActorRoutineQueue::new(config.not_ready_expiry_frames),
            blender: AnimationBlender::new(library, config),
            skeleton: SkeletonInstance::new(hierarchy),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn hierarchy(&self) -> &Arc<JointHierarchy> {
        self.skeleton.hierarchy()
    }

    pub fn blender(&self) -> &AnimationBlender {
        &self.blender
    }

    pub fn blender_mut(&mut self) -> &mut AnimationBlender {
        &mut self.blender
    }

    /// Swap in a reloaded clip library
    pub fn set_library(&mut self, library: Arc<ClipLibrary>) -> Result<()> {
        validate_library(self.skeleton.hierarchy(), &library)?;
        self.blender.set_library(library);
        Ok(())
    }

    /// Advance the actor by `elapsed` frames
    pub fn update(&mut self, elapsed: f32) {
        trace!("Actor {}: tick {elapsed}", self.id);
        self.routines.update(elapsed, &mut self.blender);
        self.blender.update(elapsed);
        self.skeleton.solve(&self.blender);
    }

    /// Play clips directly, bypassing the routine queue
    pub fn play(&mut self, request: &AnimationRequest) -> Vec<PlaybackTicket> {
        self.blender.play(request, false)
    }

    /// Queue a routine for this actor
    pub fn enqueue_routine(&mut self, source: impl Into<RoutineSource>, options: RoutineOptions) {
        self.routines
            .enqueue(RoutineContext::new(self.id), source, options);
    }

    /// Queue a routine aimed at another actor
    pub fn enqueue_targeted_routine(
        &mut self,
        target_id: u64,
        source: impl Into<RoutineSource>,
        options: RoutineOptions,
    ) {
        self.routines.enqueue(
            RoutineContext::new(self.id).with_target(target_id),
            source,
            options,
        );
    }

    /// Drop every queued routine and forget the playing one
    pub fn cancel_routines(&mut self) {
        self.routines.cancel_all();
    }

    pub fn has_pending_or_active_routine(&self) -> bool {
        self.routines.has_pending_or_active_routine()
    }

    /// Check whether normal-priority routines are currently held back
    pub fn is_animation_locked(&self) -> bool {
        self.blender.is_animation_locked()
    }

    /// Model-space transform of a joint as of the last update
    pub fn joint_world_transform(&self, joint: usize) -> Option<WorldTransform> {
        self.skeleton.world_transform(joint)
    }

    /// Every solved joint as of the last update
    pub fn joint_states(&self) -> &[JointRuntimeState] {
        self.skeleton.states()
    }

    pub fn visibility_overrides(&self) -> Vec<&VisibilityOverride> {
        self.blender.visibility_overrides()
    }
}
