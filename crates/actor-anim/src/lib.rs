//! Per-actor animation for skeletal character models
//!
//! An [`Actor`] ticks three stages in order each frame:
//! - [`scheduler`] dequeues routines (attack swings, emotes, scripted beats)
//!   and starts their animations
//! - [`animation`] advances the eight blending slots and resolves one local
//!   pose per joint
//! - [`skeleton`] composes local poses into model-space transforms
//!
//! Optional features:
//! - `serde-support`: serialization of ids, parameters, poses and skeletons,
//!   plus JSON [`scene`] loading

pub mod actor;
pub mod animation;
pub mod clip_id;
pub mod config;
pub mod error;
#[cfg(feature = "serde-support")]
pub mod scene;
pub mod scheduler;
pub mod skeleton;

// Re-export common types
pub use actor::Actor;
pub use animation::{
    AnimationBlender, AnimationClip, AnimationRequest, ClipLibrary, JointPose, JointTrack,
    LoopParams, PlaybackTicket, TransitionParams, VisibilityOverride, WorldTransform,
};
pub use clip_id::ClipId;
pub use config::{AnimationConfig, NUM_SLOTS};
pub use error::{AnimError, Result};
#[cfg(feature = "serde-support")]
pub use scene::Scene;
pub use scheduler::{
    ActorRoutineQueue, Routine, RoutineContext, RoutineOptions, RoutineOutcome, RoutinePlayer,
    RoutineSource,
};
pub use skeleton::{Joint, JointHierarchy, PoseSolver, SkeletonInstance};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
