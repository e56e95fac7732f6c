//! Forward kinematics and sanitization

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::sync::Arc;

use actor_anim::skeleton::{BindPose, JointRuntimeState};
use actor_anim::{
    Actor, AnimationClip, AnimationConfig, AnimationRequest, ClipLibrary, Joint, JointHierarchy,
    JointPose, JointTrack, PoseSolver, SkeletonInstance,
};
use glam::{Quat, Vec3};
use rstest::rstest;

use crate::support::{chain, library};

/// Compose bind poses down the parent chain without the solver
fn composed_bind_pose(hierarchy: &JointHierarchy) -> Vec<(Vec3, Quat)> {
    let mut world: Vec<(Vec3, Quat)> = Vec::with_capacity(hierarchy.len());
    for joint in hierarchy.joints() {
        let entry = match joint.parent {
            Some(parent) => {
                let (position, rotation) = world[parent as usize];
                (
                    position + rotation * joint.bind_translation,
                    rotation * joint.bind_rotation,
                )
            }
            None => (joint.bind_translation, joint.bind_rotation),
        };
        world.push(entry);
    }
    world
}

fn single_root() -> JointHierarchy {
    JointHierarchy::new(vec![Joint::root(Quat::from_rotation_x(1.0), Vec3::ONE)]).unwrap()
}

fn branching() -> JointHierarchy {
    JointHierarchy::new(vec![
        Joint::root(Quat::from_rotation_y(FRAC_PI_4), Vec3::new(0.0, 1.0, 0.0)),
        Joint::child(0, Quat::from_rotation_z(FRAC_PI_2), Vec3::new(0.5, 0.0, 0.0)),
        Joint::child(0, Quat::from_rotation_x(-FRAC_PI_4), Vec3::new(-0.5, 0.0, 0.0)),
        Joint::child(1, Quat::IDENTITY, Vec3::new(1.0, 0.0, 0.0)),
        Joint::child(2, Quat::from_rotation_y(0.3), Vec3::new(0.0, -1.0, 0.2)),
        Joint::root(Quat::IDENTITY, Vec3::new(3.0, 0.0, 0.0)),
    ])
    .unwrap()
}

#[rstest]
#[case::single_root(single_root())]
#[case::straight_chain((*chain(6)).clone())]
#[case::branching(branching())]
fn test_bind_pose_round_trip(#[case] hierarchy: JointHierarchy) {
    let expected = composed_bind_pose(&hierarchy);
    let instance = SkeletonInstance::new(Arc::new(hierarchy));

    for (joint, (position, rotation)) in expected.into_iter().enumerate() {
        let solved = instance.world_transform(joint).unwrap();
        assert!(
            solved.position.abs_diff_eq(position, 1e-5),
            "joint {joint}: {:?} != {position:?}",
            solved.position
        );
        assert!(
            solved.rotation.abs_diff_eq(rotation, 1e-5)
                || solved.rotation.abs_diff_eq(-rotation, 1e-5)
        );
    }
}

#[test]
fn test_idle_actor_matches_bind_pose() {
    let hierarchy = Arc::new(branching());
    let mut actor = Actor::new(
        7,
        hierarchy.clone(),
        Arc::new(ClipLibrary::new()),
        AnimationConfig::default(),
    )
    .unwrap();
    actor.update(1.0);

    let mut states = vec![JointRuntimeState::default(); hierarchy.len()];
    PoseSolver.solve(&hierarchy, &BindPose, &mut states);
    assert_eq!(actor.joint_states(), states.as_slice());
}

#[test]
fn test_nan_keyframe_yields_finite_transforms() {
    let skeleton = chain(3);
    let bad = JointPose::new(
        Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0),
        Vec3::new(f32::NAN, 0.0, f32::INFINITY),
    );
    let clip = AnimationClip::new(
        "broken0",
        4.0,
        vec![None, Some(JointTrack::constant(bad)), None],
    )
    .unwrap();
    let mut actor = Actor::new(1, skeleton, library([clip]), AnimationConfig::default()).unwrap();

    actor.play(&AnimationRequest::clip("broken0"));
    actor.update(1.0);

    for state in actor.joint_states() {
        assert!(state.world_position.is_finite());
        assert!((state.world_rotation.length() - 1.0).abs() < 1e-5);
    }
    // Joint 1 falls back to its bind pose
    let tip = actor.joint_world_transform(2).unwrap();
    assert!(tip.position.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-5));
}

#[test]
fn test_negative_pool_offset_leaves_joint_at_bind_pose() {
    let pool = vec![JointPose::from_translation(Vec3::X); 4];
    let clip = AnimationClip::from_keyframe_pool("pooled0", 1.0, &pool, &[0, -1, 3], 2).unwrap();

    assert!(clip.has_track(0));
    assert!(!clip.has_track(1));
    assert!(!clip.has_track(2));
    assert!(clip.sample(1, 0.5).is_none());

    let mut actor = Actor::new(1, chain(3), library([clip]), AnimationConfig::default()).unwrap();
    actor.play(&AnimationRequest::clip("pooled0"));
    actor.update(0.5);

    let root = actor.joint_world_transform(0).unwrap();
    assert!(root.position.abs_diff_eq(Vec3::X, 1e-5));
    let tip = actor.joint_world_transform(2).unwrap();
    assert!(tip.position.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-5));
}

#[test]
fn test_forward_parent_is_rejected() {
    let joints = vec![
        Joint::root(Quat::IDENTITY, Vec3::ZERO),
        Joint::child(2, Quat::IDENTITY, Vec3::ZERO),
        Joint::child(0, Quat::IDENTITY, Vec3::ZERO),
    ];
    assert!(JointHierarchy::new(joints).is_err());
}
