//! Animation playback and slot blending
//!
//! This module covers everything between a loaded clip and the local pose
//! of a joint:
//! - Clips and keyframe sampling
//! - Playback contexts with loop and fade timing
//! - Cross-fade transitions inside a slot
//! - The per-actor blender that layers the eight slots
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use actor_anim::animation::{
//!     AnimationBlender, AnimationClip, AnimationRequest, ClipLibrary, JointPose, JointTrack,
//!     TransitionParams,
//! };
//! use actor_anim::AnimationConfig;
//! use glam::Vec3;
//!
//! let idle = AnimationClip::new("idle0", 10.0, vec![Some(JointTrack::constant(JointPose::IDENTITY))])?;
//! let run = AnimationClip::new(
//!     "run0",
//!     10.0,
//!     vec![Some(JointTrack::constant(JointPose::from_translation(Vec3::X)))],
//! )?;
//! let library: ClipLibrary = [idle, run].into_iter().collect();
//!
//! let mut blender = AnimationBlender::new(Arc::new(library), AnimationConfig::default());
//! blender.play(&AnimationRequest::clip("idle0"), false);
//! blender.play(
//!     &AnimationRequest::clip("run0").with_transition(TransitionParams::fade_in(4.0)),
//!     false,
//! );
//! blender.update(2.0);
//!
//! let pose = blender.joint_transform(0).unwrap();
//! assert!((pose.translation.x - 0.5).abs() < 1e-5);
//! # Ok::<(), actor_anim::AnimError>(())
//! ```

mod blender;
mod clip;
mod context;
mod interpolation;
mod library;
mod slot;
mod transition;
mod types;

pub use blender::{AnimationBlender, AnimationRequest, PlaybackTicket};
pub use clip::{AnimationClip, JointTrack};
pub use context::{AnimationContext, LoopParams, TransitionParams, VisibilityOverride};
pub use interpolation::{find_keyframe_index, interpolate_keys};
pub use library::ClipLibrary;
pub use slot::{SkeletonAnimator, SlotChange, SlotState};
pub use transition::{AnimationTransition, Snapshot};
pub use types::{
    JointPose, Lerp, QUAT_EPSILON, WorldTransform, nlerp, rotate_vector, safe_normalize,
    sanitize_rotation, sanitize_translation,
};
