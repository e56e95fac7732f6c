//! Routine scheduling against the public queue and actor APIs

use std::sync::{Arc, Mutex};

use actor_anim::{
    Actor, ActorRoutineQueue, AnimationConfig, AnimationRequest, ClipLibrary, LoopParams, Routine,
    RoutineContext, RoutineOptions, RoutineOutcome, RoutinePlayer, RoutineSource,
};
use glam::Vec3;
use pretty_assertions::assert_eq;

use crate::support::{chain, constant_clip, library, slide_clip};

/// Player that only records what it was asked to play
#[derive(Default)]
struct Recorder {
    played: Vec<String>,
}

impl RoutinePlayer for Recorder {
    type Handle = ();

    fn play(&mut self, _context: &RoutineContext, routine: Routine, _blocking: bool) -> Self::Handle {
        self.played.push(routine.name);
    }

    fn is_finished(&self, _handle: &()) -> bool {
        true
    }

    fn is_animation_locked(&self) -> bool {
        false
    }
}

fn routine(name: &str, clip: &str) -> Routine {
    Routine::new(name, AnimationRequest::clip(clip))
}

fn recording_callback(log: &Arc<Mutex<Vec<RoutineOutcome>>>) -> RoutineOptions {
    let log = log.clone();
    RoutineOptions::default().on_done(move |outcome| log.lock().unwrap().push(outcome))
}

fn actor() -> Actor {
    Actor::new(
        3,
        chain(2),
        library([
            slide_clip("swing1", 2, 4),
            constant_clip("stance1", 2, Vec3::X),
            constant_clip("walk0", 2, Vec3::Z),
        ]),
        AnimationConfig::default(),
    )
    .unwrap()
}

#[test]
fn test_high_priority_routine_plays_first() {
    let mut queue = ActorRoutineQueue::default();
    let mut player = Recorder::default();
    let context = RoutineContext::new(1);

    queue.enqueue(context, routine("normal", "walk0"), RoutineOptions::default());
    queue.enqueue(
        context,
        routine("high", "walk0"),
        RoutineOptions::default().high_priority(),
    );
    queue.update(1.0, &mut player);

    assert_eq!(player.played, vec!["high", "normal"]);
}

#[test]
fn test_null_routine_callback_fires_exactly_once() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut actor = actor();

    actor.enqueue_routine(RoutineSource::Immediate(None), recording_callback(&log));
    assert!(log.lock().unwrap().is_empty());

    actor.update(1.0);
    actor.update(1.0);
    actor.update(1.0);

    assert_eq!(*log.lock().unwrap(), vec![RoutineOutcome::Abandoned]);
    assert!(!actor.has_pending_or_active_routine());
}

#[test]
fn test_expired_routine_callback_fires_while_locked() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut actor = actor();

    actor.enqueue_routine(
        Routine::new(
            "swing",
            AnimationRequest::clip("swing1").with_loop(LoopParams::times(3)),
        ),
        RoutineOptions::blocking(),
    );
    actor.enqueue_routine(
        routine("walk", "walk0"),
        recording_callback(&log).expire_after(5.0),
    );

    actor.update(1.0);
    assert!(actor.is_animation_locked());
    actor.update(2.0);
    assert!(log.lock().unwrap().is_empty());

    actor.update(2.0);
    assert_eq!(*log.lock().unwrap(), vec![RoutineOutcome::Expired]);
    assert!(actor.blender().animator(0).is_none());
}

#[test]
fn test_overwritten_context_completes_blocking_routine() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut actor = actor();

    // Loops forever, so only an overwrite can end it
    let options = RoutineOptions {
        blocking: true,
        ..recording_callback(&log)
    };
    actor.enqueue_routine(routine("swing", "swing1"), options);
    actor.update(1.0);
    assert!(actor.is_animation_locked());

    actor.play(&AnimationRequest::clip("stance1"));
    assert!(!actor.is_animation_locked());
    actor.update(1.0);

    assert_eq!(*log.lock().unwrap(), vec![RoutineOutcome::Completed]);
    assert!(!actor.has_pending_or_active_routine());
}

#[test]
fn test_deferred_routine_waits_for_readiness() {
    let ready = Arc::new(Mutex::new(false));
    let mut actor = actor();

    let flag = ready.clone();
    actor.enqueue_routine(
        RoutineSource::deferred(
            move |_| *flag.lock().unwrap(),
            |_| Some(routine("walk", "walk0")),
        ),
        RoutineOptions::default(),
    );

    actor.update(10.0);
    assert!(actor.has_pending_or_active_routine());
    assert!(actor.blender().animator(0).is_none());

    *ready.lock().unwrap() = true;
    actor.update(1.0);
    assert!(!actor.has_pending_or_active_routine());
    let root = actor.joint_world_transform(0).unwrap();
    assert!(root.position.abs_diff_eq(Vec3::Z, 1e-5));
}

#[test]
fn test_never_ready_routine_is_dropped_after_configured_wait() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let config = AnimationConfig {
        not_ready_expiry_frames: 20.0,
        ..AnimationConfig::default()
    };
    let mut actor = Actor::new(3, chain(2), Arc::new(ClipLibrary::new()), config).unwrap();

    actor.enqueue_routine(
        RoutineSource::deferred(|_| false, |_| None),
        recording_callback(&log),
    );
    actor.update(19.0);
    assert!(actor.has_pending_or_active_routine());

    actor.update(1.0);
    assert_eq!(*log.lock().unwrap(), vec![RoutineOutcome::NeverReady]);
    assert!(!actor.has_pending_or_active_routine());
}
