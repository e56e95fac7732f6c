//! Scripted multi-tick scenarios
//!
//! The same script must produce bit-identical joint transforms however
//! often, and on whichever thread, it is replayed.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;
use std::thread;

use actor_anim::{
    Actor, AnimationClip, AnimationConfig, AnimationRequest, ClipLibrary, JointPose, JointTrack,
    LoopParams, Routine, RoutineOptions, TransitionParams,
};
use glam::{Quat, Vec3};

use crate::support::{chain, init_logging};

const TICKS: [f32; 12] = [1.0, 0.5, 0.25, 2.0, 1.0, 0.75, 3.0, 0.1, 1.0, 1.0, 4.0, 0.33];

fn swinging_clip(id: &str, length: usize, axis: Vec3) -> AnimationClip {
    let keys: Vec<_> = (0..=length)
        .map(|i| {
            let t = i as f32 / length as f32;
            JointPose::new(Quat::from_axis_angle(axis, t * FRAC_PI_2), axis * t)
        })
        .collect();
    let tracks = vec![
        JointTrack::uniform(keys.clone()),
        JointTrack::uniform(keys.iter().rev().copied().collect()),
        None,
        JointTrack::uniform(keys),
    ];
    AnimationClip::new(id, length as f32, tracks).unwrap()
}

fn clip_library() -> Arc<ClipLibrary> {
    Arc::new(
        [
            swinging_clip("idle0", 8, Vec3::Y),
            swinging_clip("run0", 6, Vec3::X),
            swinging_clip("wave2", 4, Vec3::Z),
            swinging_clip("bridge0", 1, Vec3::Z),
        ]
        .into_iter()
        .collect(),
    )
}

/// Play the fixed script and collect the bit patterns of every solved joint
fn run_script() -> Vec<u32> {
    init_logging();
    let mut actor = Actor::new(9, chain(4), clip_library(), AnimationConfig::default()).unwrap();
    let mut bits = Vec::new();

    actor.play(&AnimationRequest::clip("idle0").with_loop(LoopParams::looping().low_priority()));
    for (tick, &elapsed) in TICKS.iter().enumerate() {
        match tick {
            2 => actor.enqueue_routine(
                Routine::new(
                    "wave",
                    AnimationRequest::clip("wave2")
                        .with_loop(LoopParams::times(1))
                        .with_transition(TransitionParams::fade_in(2.0).with_fade_out(1.5)),
                ),
                RoutineOptions::blocking(),
            ),
            5 => {
                let mut transition = TransitionParams::fade_in(3.0);
                transition.in_between = Some("bridge0".into());
                actor.play(&AnimationRequest::clip("run0").with_transition(transition));
            }
            _ => {}
        }

        actor.update(elapsed);
        for state in actor.joint_states() {
            bits.extend(state.world_position.to_array().map(f32::to_bits));
            bits.extend(state.world_rotation.to_array().map(f32::to_bits));
        }
    }
    bits
}

#[test]
fn test_replay_is_bit_reproducible() {
    let first = run_script();
    let second = run_script();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_actors_replay_identically_on_worker_threads() {
    let expected = run_script();
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(run_script)).collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}

#[test]
fn test_actor_moves_to_worker_thread() {
    let mut actor = Actor::new(2, chain(4), clip_library(), AnimationConfig::default()).unwrap();
    actor.play(&AnimationRequest::clip("run0"));

    let actor = thread::spawn(move || {
        actor.update(3.0);
        actor
    })
    .join()
    .unwrap();

    let tip = actor.joint_world_transform(3).unwrap();
    assert!(tip.position.is_finite());
    assert!((tip.rotation.length() - 1.0).abs() < 1e-5);
}
