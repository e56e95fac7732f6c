//! Tunable constants for blending and routine scheduling

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Number of animation slots every actor owns
pub const NUM_SLOTS: usize = 8;

/// Cross-fade length used when neither the new nor the outgoing context asks for one
pub const DEFAULT_TRANSITION_FRAMES: f32 = 7.5;

/// Age after which a queued routine whose provider never became ready is dropped
pub const NOT_READY_EXPIRY_FRAMES: f32 = 300.0;

/// Shortest transition the blender will create
pub const MIN_TRANSITION_FRAMES: f32 = 1e-3;

/// Slot that always replaces its context directly, without a cross-fade
pub const NON_BLENDING_SLOT: usize = 5;

/// Per-actor animation configuration
///
/// Every field defaults to the matching module constant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct AnimationConfig {
    /// Fallback cross-fade length in frames
    pub default_transition_frames: f32,
    /// Frames a queued routine may wait for its provider to become ready
    pub not_ready_expiry_frames: f32,
    /// Lower bound for every transition duration
    pub min_transition_frames: f32,
    /// Slot that never cross-fades (`None` lets every slot blend)
    pub non_blending_slot: Option<usize>,
}

impl AnimationConfig {
    /// Check whether the given slot replaces contexts without a transition
    pub fn is_non_blending(&self, slot: usize) -> bool {
        self.non_blending_slot == Some(slot)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            default_transition_frames: DEFAULT_TRANSITION_FRAMES,
            not_ready_expiry_frames: NOT_READY_EXPIRY_FRAMES,
            min_transition_frames: MIN_TRANSITION_FRAMES,
            non_blending_slot: Some(NON_BLENDING_SLOT),
        }
    }
}
