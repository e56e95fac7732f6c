//! Routines and the options they are queued with

use std::fmt;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::animation::AnimationRequest;

/// Who a routine is played for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct RoutineContext {
    pub actor_id: u64,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub target_id: Option<u64>,
}

impl RoutineContext {
    pub fn new(actor_id: u64) -> Self {
        Self {
            actor_id,
            target_id: None,
        }
    }

    pub fn with_target(mut self, target_id: u64) -> Self {
        self.target_id = Some(target_id);
        self
    }
}

/// A named action that plays an animation request when dequeued
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Routine {
    pub name: String,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub animation: AnimationRequest,
}

impl Routine {
    pub fn new(name: impl Into<String>, animation: AnimationRequest) -> Self {
        Self {
            name: name.into(),
            animation,
        }
    }
}

/// Why a queued or playing routine left the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutineOutcome {
    /// Played to the end (non-blocking routines complete when dispatched)
    Completed,
    /// Replaced by another blocking routine while still playing
    Interrupted,
    /// Sat in the queue past its expiry
    Expired,
    /// Its provider never became ready
    NeverReady,
    /// There was nothing to play, or the queue was cancelled
    Abandoned,
}

/// Callback fired exactly once when a routine is dropped or completes
pub type RoutineCallback = Box<dyn FnOnce(RoutineOutcome) + Send>;

/// Readiness check for a deferred routine
pub type ReadyPredicate = Box<dyn FnMut(&RoutineContext) -> bool + Send>;

/// Resolves a deferred routine once it is ready
pub type RoutineProvider = Box<dyn FnOnce(&RoutineContext) -> Option<Routine> + Send>;

/// Where the routine to play comes from
pub enum RoutineSource {
    /// Already known; `None` is abandoned as soon as it reaches the front
    Immediate(Option<Routine>),
    /// Resolved lazily once `ready` reports true
    Deferred {
        ready: ReadyPredicate,
        resolve: RoutineProvider,
    },
}

impl RoutineSource {
    /// Wait for a readiness predicate, then resolve the routine
    pub fn deferred(
        ready: impl FnMut(&RoutineContext) -> bool + Send + 'static,
        resolve: impl FnOnce(&RoutineContext) -> Option<Routine> + Send + 'static,
    ) -> Self {
        Self::Deferred {
            ready: Box::new(ready),
            resolve: Box::new(resolve),
        }
    }

    pub(crate) fn is_ready(&mut self, context: &RoutineContext) -> bool {
        match self {
            Self::Immediate(_) => true,
            Self::Deferred { ready, .. } => ready(context),
        }
    }

    pub(crate) fn resolve(self, context: &RoutineContext) -> Option<Routine> {
        match self {
            Self::Immediate(routine) => routine,
            Self::Deferred { resolve, .. } => resolve(context),
        }
    }
}

impl From<Routine> for RoutineSource {
    fn from(routine: Routine) -> Self {
        Self::Immediate(Some(routine))
    }
}

impl From<Option<Routine>> for RoutineSource {
    fn from(routine: Option<Routine>) -> Self {
        Self::Immediate(routine)
    }
}

impl fmt::Debug for RoutineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(routine) => f.debug_tuple("Immediate").field(routine).finish(),
            Self::Deferred { .. } => f.write_str("Deferred"),
        }
    }
}

/// How a routine is queued
#[derive(Default)]
pub struct RoutineOptions {
    /// Occupies the scheduler until its animation finishes
    pub blocking: bool,
    /// Jumps ahead of normal routines and ignores the animation lock
    pub high_priority: bool,
    /// Queue age at which the routine is dropped unplayed
    pub expiry_frames: Option<f32>,
    pub on_drop_or_complete: Option<RoutineCallback>,
}

impl RoutineOptions {
    pub fn blocking() -> Self {
        Self {
            blocking: true,
            ..Self::default()
        }
    }

    pub fn high_priority(mut self) -> Self {
        self.high_priority = true;
        self
    }

    pub fn expire_after(mut self, frames: f32) -> Self {
        self.expiry_frames = Some(frames);
        self
    }

    pub fn on_done(mut self, callback: impl FnOnce(RoutineOutcome) + Send + 'static) -> Self {
        self.on_drop_or_complete = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for RoutineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutineOptions")
            .field("blocking", &self.blocking)
            .field("high_priority", &self.high_priority)
            .field("expiry_frames", &self.expiry_frames)
            .field("on_drop_or_complete", &self.on_drop_or_complete.is_some())
            .finish()
    }
}
