//! Per-actor scheduling of routines
//!
//! Routines (attack swings, emotes, scripted beats) wait in an
//! [`ActorRoutineQueue`] until they are ready and the actor is free to
//! play them. The queue hands each one to a [`RoutinePlayer`], usually the
//! actor's animation blender.

mod queue;
mod routine;

pub use queue::{ActorRoutineQueue, RoutinePlayer};
pub use routine::{
    ReadyPredicate, Routine, RoutineCallback, RoutineContext, RoutineOptions, RoutineOutcome,
    RoutineProvider, RoutineSource,
};
