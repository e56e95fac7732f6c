//! Slot blending through the public blender API

use std::sync::Arc;

use actor_anim::animation::{AnimationContext, nlerp};
use actor_anim::{
    AnimationBlender, AnimationClip, AnimationConfig, AnimationRequest, JointPose, JointTrack,
    LoopParams, TransitionParams, VisibilityOverride,
};
use glam::{Quat, Vec3};
use pretty_assertions::assert_eq;

use crate::support::{constant_clip, library, slide_clip};

#[test]
fn test_nlerp_takes_shortest_path() {
    let a = Quat::from_xyzw(0.0, 0.0, 0.0, 1.0);
    let b = Quat::from_xyzw(0.0, 0.0, 0.0, -1.0);
    let mid = nlerp(a, b, 0.5);
    assert!((mid.w - 1.0).abs() < 1e-6);
}

#[test]
fn test_loop_freezes_on_last_frame() {
    let clip = Arc::new(slide_clip("slide0", 1, 5));
    let mut context = AnimationContext::new(clip, LoopParams::times(1), None);
    context.advance(10.0);

    assert!(context.is_done_looping());
    let pose = context.sample(0).unwrap();
    assert!((pose.translation.x - 5.0).abs() < 1e-5);
}

#[test]
fn test_slot_chosen_by_clip_suffix() {
    let mut blender = AnimationBlender::new(
        library([constant_clip("wave3", 1, Vec3::X)]),
        AnimationConfig::default(),
    );
    let tickets = blender.play(&AnimationRequest::clip("wave3"), false);

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].slot, 3);
    assert_eq!(blender.animator(3).map(|animator| animator.slot()), Some(3));
    assert!(blender.animator(0).is_none());
}

#[test]
fn test_cross_fade_midpoint() {
    let mut blender = AnimationBlender::new(
        library([
            constant_clip("idle0", 1, Vec3::ZERO),
            constant_clip("run0", 1, Vec3::new(2.0, 0.0, 0.0)),
        ]),
        AnimationConfig::default(),
    );

    blender.play(&AnimationRequest::clip("idle0"), false);
    blender.update(1.0);
    blender.play(
        &AnimationRequest::clip("run0").with_transition(TransitionParams::fade_in(2.0)),
        false,
    );
    blender.update(1.0);

    let pose = blender.joint_transform(0).unwrap();
    assert!((pose.translation.x - 1.0).abs() < 1e-5);

    blender.update(1.0);
    let pose = blender.joint_transform(0).unwrap();
    assert!((pose.translation.x - 2.0).abs() < 1e-5);
}

#[test]
fn test_cross_fade_passes_through_in_between_clip() {
    let mut blender = AnimationBlender::new(
        library([
            constant_clip("idle0", 1, Vec3::ZERO),
            constant_clip("run0", 1, Vec3::new(2.0, 0.0, 0.0)),
            constant_clip("bridge0", 1, Vec3::new(0.0, 4.0, 0.0)),
        ]),
        AnimationConfig::default(),
    );

    blender.play(&AnimationRequest::clip("idle0"), false);
    blender.update(1.0);
    let mut transition = TransitionParams::fade_in(4.0);
    transition.in_between = Some("bridge0".into());
    blender.play(&AnimationRequest::clip("run0").with_transition(transition), false);

    // A quarter of the way: halfway from the idle pose to the bridge pose
    blender.update(1.0);
    let pose = blender.joint_transform(0).unwrap();
    assert!(pose.translation.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-5));

    // Halfway: exactly the bridge clip's first frame
    blender.update(1.0);
    let pose = blender.joint_transform(0).unwrap();
    assert!(pose.translation.abs_diff_eq(Vec3::new(0.0, 4.0, 0.0), 1e-5));

    blender.update(2.0);
    let pose = blender.joint_transform(0).unwrap();
    assert!(pose.translation.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
}

#[test]
fn test_undriven_joint_falls_through_to_lower_slot() {
    let mut blender = AnimationBlender::new(
        library([
            constant_clip("base0", 2, Vec3::new(1.0, 0.0, 0.0)),
            // Drives joint 1 only
            AnimationClip::new(
                "upper2",
                10.0,
                vec![
                    None,
                    Some(JointTrack::constant(JointPose::from_translation(Vec3::Z))),
                ],
            )
            .unwrap(),
        ]),
        AnimationConfig::default(),
    );
    blender.play(&AnimationRequest::clip("base0"), false);
    blender.play(&AnimationRequest::clip("upper2"), false);
    blender.update(1.0);

    let root = blender.joint_transform(0).unwrap();
    assert!(root.translation.abs_diff_eq(Vec3::X, 1e-6));
    let upper = blender.joint_transform(1).unwrap();
    assert!(upper.translation.abs_diff_eq(Vec3::Z, 1e-6));
    assert!(blender.joint_transform(2).is_none());
}

#[test]
fn test_low_priority_idle_is_not_restarted() {
    let mut blender = AnimationBlender::new(
        library([slide_clip("idle0", 1, 10)]),
        AnimationConfig::default(),
    );
    let request =
        AnimationRequest::clip("idle0").with_loop(LoopParams::looping().low_priority());

    let first = blender.play(&request, false);
    blender.update(4.0);
    let second = blender.play(&request, false);
    blender.update(1.0);

    assert_eq!(first, second);
    let pose = blender.joint_transform(0).unwrap();
    assert!((pose.translation.x - 5.0).abs() < 1e-5);
}

#[test]
fn test_wildcard_selects_variants() {
    let clips = library([
        constant_clip("idle0", 1, Vec3::ZERO),
        constant_clip("idle1", 1, Vec3::ZERO),
        constant_clip("idle10", 1, Vec3::ZERO),
        constant_clip("walk0", 1, Vec3::ZERO),
    ]);
    let ids: Vec<_> = clips
        .find("idle?")
        .iter()
        .map(|clip| clip.id().as_str().to_owned())
        .collect();
    assert_eq!(ids, vec!["idle0", "idle1"]);
}

#[test]
fn test_visibility_overrides_follow_active_contexts() {
    let mut blender = AnimationBlender::new(
        library([
            constant_clip("sheath1", 1, Vec3::ZERO),
            constant_clip("draw1", 1, Vec3::ZERO),
        ]),
        AnimationConfig::default(),
    );
    blender.play(
        &AnimationRequest::clip("sheath1").with_visibility(VisibilityOverride::hide("weapon")),
        false,
    );
    assert_eq!(
        blender.visibility_overrides(),
        vec![&VisibilityOverride::hide("weapon")]
    );

    blender.play(
        &AnimationRequest::clip("draw1").with_transition(TransitionParams::fade_in(0.0)),
        false,
    );
    assert!(blender.visibility_overrides().is_empty());
}
