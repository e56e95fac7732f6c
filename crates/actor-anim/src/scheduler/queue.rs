//! Per-actor queue of pending routines

use std::collections::VecDeque;
use std::fmt;

use log::{debug, trace, warn};

use super::routine::{
    Routine, RoutineCallback, RoutineContext, RoutineOptions, RoutineOutcome, RoutineSource,
};
use crate::config::NOT_READY_EXPIRY_FRAMES;

/// Plays dequeued routines and reports on their progress
///
/// The actor's pose system implements this; the scheduler never touches
/// animation state directly.
pub trait RoutinePlayer {
    /// Token identifying a routine that was started
    type Handle;

    /// Start playing a routine
    fn play(&mut self, context: &RoutineContext, routine: Routine, blocking: bool) -> Self::Handle;

    /// Check whether a started routine has stopped playing
    fn is_finished(&self, handle: &Self::Handle) -> bool;

    /// True while normal-priority routines must wait
    fn is_animation_locked(&self) -> bool;
}

struct QueueEntry {
    context: RoutineContext,
    source: RoutineSource,
    blocking: bool,
    high_priority: bool,
    expiry_frames: Option<f32>,
    callback: Option<RoutineCallback>,
    age: f32,
}

impl QueueEntry {
    fn is_expired(&self) -> bool {
        self.expiry_frames.is_some_and(|expiry| self.age >= expiry)
    }

    fn finish(self, outcome: RoutineOutcome) {
        fire(self.callback, outcome);
    }
}

struct ActiveRoutine<H> {
    name: String,
    handle: H,
    callback: Option<RoutineCallback>,
}

fn fire(callback: Option<RoutineCallback>, outcome: RoutineOutcome) {
    if let Some(callback) = callback {
        callback(outcome);
    }
}

/// Orders pending routines for one actor
///
/// High-priority entries always precede normal ones; each group keeps
/// insertion order. At most one blocking routine plays at a time.
pub struct ActorRoutineQueue<H> {
    entries: VecDeque<QueueEntry>,
    current: Option<ActiveRoutine<H>>,
    not_ready_expiry_frames: f32,
}

impl<H> fmt::Debug for ActorRoutineQueue<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRoutineQueue")
            .field("pending", &self.entries.len())
            .field("active", &self.active_routine_name())
            .field("not_ready_expiry_frames", &self.not_ready_expiry_frames)
            .finish()
    }
}

impl<H> Default for ActorRoutineQueue<H> {
    fn default() -> Self {
        Self::new(NOT_READY_EXPIRY_FRAMES)
    }
}

impl<H> ActorRoutineQueue<H> {
    /// Create an empty queue
    pub fn new(not_ready_expiry_frames: f32) -> Self {
        Self {
            entries: VecDeque::new(),
            current: None,
            not_ready_expiry_frames,
        }
    }

    /// Queue a routine behind every entry of equal or higher priority
    pub fn enqueue(
        &mut self,
        context: RoutineContext,
        source: impl Into<RoutineSource>,
        options: RoutineOptions,
    ) {
        let entry = QueueEntry {
            context,
            source: source.into(),
            blocking: options.blocking,
            high_priority: options.high_priority,
            expiry_frames: options.expiry_frames,
            callback: options.on_drop_or_complete,
            age: 0.0,
        };

        if entry.high_priority {
            let index = self
                .entries
                .iter()
                .position(|queued| !queued.high_priority)
                .unwrap_or(self.entries.len());
            self.entries.insert(index, entry);
        } else {
            self.entries.push_back(entry);
        }
    }

    /// Advance the queue by `elapsed_frames`, dispatching what may play now
    pub fn update<P>(&mut self, elapsed_frames: f32, player: &mut P)
    where
        P: RoutinePlayer<Handle = H>,
    {
        let elapsed_frames = elapsed_frames.max(0.0);
        for entry in &mut self.entries {
            entry.age += elapsed_frames;
        }

        loop {
            self.clear_finished(player);
            self.drop_expired();

            let Some(front) = self.entries.front_mut() else {
                return;
            };

            if !front.source.is_ready(&front.context) {
                if front.age >= self.not_ready_expiry_frames {
                    if let Some(entry) = self.entries.pop_front() {
                        warn!(
                            "Actor {}: routine never became ready after {:.1} frames",
                            entry.context.actor_id, entry.age
                        );
                        entry.finish(RoutineOutcome::NeverReady);
                    }
                }
                return;
            }

            if !front.high_priority && player.is_animation_locked() {
                trace!("Actor {}: routine waiting on animation lock", front.context.actor_id);
                return;
            }

            let Some(entry) = self.entries.pop_front() else {
                return;
            };
            let QueueEntry {
                context,
                source,
                blocking,
                callback,
                ..
            } = entry;

            let Some(routine) = source.resolve(&context) else {
                debug!("Actor {}: routine resolved to nothing", context.actor_id);
                fire(callback, RoutineOutcome::Abandoned);
                return;
            };

            debug!(
                "Actor {}: play '{}'{}",
                context.actor_id,
                routine.name,
                if blocking { " (blocking)" } else { "" }
            );
            let name = routine.name.clone();
            let handle = player.play(&context, routine, blocking);

            if blocking {
                if let Some(previous) = self.current.take() {
                    debug!("Actor {}: '{}' interrupted", context.actor_id, previous.name);
                    fire(previous.callback, RoutineOutcome::Interrupted);
                }
                self.current = Some(ActiveRoutine {
                    name,
                    handle,
                    callback,
                });
                return;
            }

            fire(callback, RoutineOutcome::Completed);
        }
    }

    fn clear_finished<P>(&mut self, player: &P)
    where
        P: RoutinePlayer<Handle = H>,
    {
        if let Some(active) = self
            .current
            .take_if(|active| player.is_finished(&active.handle))
        {
            trace!("Routine '{}' finished", active.name);
            fire(active.callback, RoutineOutcome::Completed);
        }
    }

    fn drop_expired(&mut self) {
        while self.entries.front().is_some_and(QueueEntry::is_expired) {
            if let Some(entry) = self.entries.pop_front() {
                debug!("Actor {}: routine expired", entry.context.actor_id);
                entry.finish(RoutineOutcome::Expired);
            }
        }
    }

    /// True while anything is queued or a blocking routine is playing
    pub fn has_pending_or_active_routine(&self) -> bool {
        !self.entries.is_empty() || self.current.is_some()
    }

    /// Check whether a blocking routine is currently playing
    pub fn has_active_routine(&self) -> bool {
        self.current.is_some()
    }

    /// Name of the blocking routine currently playing
    pub fn active_routine_name(&self) -> Option<&str> {
        self.current.as_ref().map(|active| active.name.as_str())
    }

    /// Number of queued routines
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every queued routine and stop tracking the playing one
    pub fn cancel_all(&mut self) {
        if let Some(active) = self.current.take() {
            fire(active.callback, RoutineOutcome::Interrupted);
        }
        for entry in self.entries.drain(..) {
            entry.finish(RoutineOutcome::Abandoned);
        }
    }
}
