//! Shared builders for integration tests

use std::sync::Arc;

use actor_anim::{AnimationClip, ClipLibrary, Joint, JointHierarchy, JointPose, JointTrack};
use glam::{Quat, Vec3};

/// Clip that holds one translation on joint 0 and leaves other joints undriven
pub fn constant_clip(id: &str, num_joints: usize, translation: Vec3) -> AnimationClip {
    let mut tracks = vec![None; num_joints];
    tracks[0] = Some(JointTrack::constant(JointPose::from_translation(translation)));
    AnimationClip::new(id, 10.0, tracks).unwrap()
}

/// Clip whose joint 0 moves one unit along X per frame
pub fn slide_clip(id: &str, num_joints: usize, length: usize) -> AnimationClip {
    let keys = (0..=length)
        .map(|i| JointPose::from_translation(Vec3::new(i as f32, 0.0, 0.0)))
        .collect();
    let mut tracks = vec![None; num_joints];
    tracks[0] = JointTrack::uniform(keys);
    AnimationClip::new(id, length as f32, tracks).unwrap()
}

/// Straight chain of `len` joints, each one unit above its parent
pub fn chain(len: u32) -> Arc<JointHierarchy> {
    let joints = (0..len)
        .map(|i| match i {
            0 => Joint::root(Quat::IDENTITY, Vec3::ZERO),
            _ => Joint::child(i - 1, Quat::IDENTITY, Vec3::Y),
        })
        .collect();
    Arc::new(JointHierarchy::new(joints).unwrap())
}

pub fn library(clips: impl IntoIterator<Item = AnimationClip>) -> Arc<ClipLibrary> {
    Arc::new(clips.into_iter().collect())
}

/// Route library logs to the test harness; repeat calls are ignored
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
