//! Forward kinematics from local joint poses to model-space transforms

use std::sync::Arc;

use glam::{Quat, Vec3};

use super::hierarchy::JointHierarchy;
use crate::animation::{
    AnimationBlender, JointPose, WorldTransform, rotate_vector, safe_normalize,
    sanitize_rotation, sanitize_translation,
};

/// Anything that can supply an animated local pose per joint
pub trait PoseSource {
    /// Local pose of a joint relative to its bind pose, or None for the bind pose
    fn joint_transform(&self, joint: usize) -> Option<JointPose>;
}

impl PoseSource for AnimationBlender {
    fn joint_transform(&self, joint: usize) -> Option<JointPose> {
        AnimationBlender::joint_transform(self, joint)
    }
}

impl PoseSource for [Option<JointPose>] {
    fn joint_transform(&self, joint: usize) -> Option<JointPose> {
        self.get(joint).copied().flatten()
    }
}

/// Pose source that leaves every joint in its bind pose
#[derive(Debug, Clone, Copy, Default)]
pub struct BindPose;

impl PoseSource for BindPose {
    fn joint_transform(&self, _joint: usize) -> Option<JointPose> {
        None
    }
}

/// Solved model-space state of one joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointRuntimeState {
    pub world_position: Vec3,
    pub world_rotation: Quat,
}

impl Default for JointRuntimeState {
    fn default() -> Self {
        Self {
            world_position: Vec3::ZERO,
            world_rotation: Quat::IDENTITY,
        }
    }
}

impl From<JointRuntimeState> for WorldTransform {
    fn from(state: JointRuntimeState) -> Self {
        Self {
            position: state.world_position,
            rotation: state.world_rotation,
        }
    }
}

/// Walks a hierarchy root to leaf, composing local poses with parent transforms
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseSolver;

impl PoseSolver {
    /// Solve every joint of `hierarchy` into `states`
    ///
    /// `states` must hold one entry per joint. Non-finite animated values are
    /// replaced by the bind pose contribution so they never reach the output.
    pub fn solve<S: PoseSource + ?Sized>(
        &self,
        hierarchy: &JointHierarchy,
        source: &S,
        states: &mut [JointRuntimeState],
    ) {
        debug_assert_eq!(hierarchy.len(), states.len());

        for (index, joint) in hierarchy.joints().iter().enumerate().take(states.len()) {
            let animated = source.joint_transform(index);

            let local_rotation = safe_normalize(
                sanitize_rotation(animated.map(|pose| pose.rotation)) * joint.bind_rotation,
            );
            let local_translation =
                joint.bind_translation + sanitize_translation(animated.map(|pose| pose.translation));

            states[index] = match joint.parent.map(|p| p as usize) {
                Some(parent) => {
                    let parent = states[parent];
                    JointRuntimeState {
                        world_position: parent.world_position
                            + rotate_vector(parent.world_rotation, local_translation),
                        world_rotation: safe_normalize(parent.world_rotation * local_rotation),
                    }
                }
                None => JointRuntimeState {
                    world_position: local_translation,
                    world_rotation: local_rotation,
                },
            };
        }
    }
}

/// Per-actor runtime state of a skeleton
///
/// Joint states are allocated once and reused every tick.
#[derive(Debug, Clone)]
pub struct SkeletonInstance {
    hierarchy: Arc<JointHierarchy>,
    states: Vec<JointRuntimeState>,
    solver: PoseSolver,
}

impl SkeletonInstance {
    /// Create an instance posed at the bind pose
    pub fn new(hierarchy: Arc<JointHierarchy>) -> Self {
        let mut instance = Self {
            states: vec![JointRuntimeState::default(); hierarchy.len()],
            hierarchy,
            solver: PoseSolver,
        };
        instance.solve(&BindPose);
        instance
    }

    /// Re-solve every joint from the given pose source
    pub fn solve<S: PoseSource + ?Sized>(&mut self, source: &S) {
        self.solver.solve(&self.hierarchy, source, &mut self.states);
    }

    pub fn hierarchy(&self) -> &Arc<JointHierarchy> {
        &self.hierarchy
    }

    pub fn states(&self) -> &[JointRuntimeState] {
        &self.states
    }

    /// Model-space transform of a joint
    pub fn world_transform(&self, joint: usize) -> Option<WorldTransform> {
        self.states.get(joint).copied().map(WorldTransform::from)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
