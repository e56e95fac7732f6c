use thiserror::Error;

/// Error types for building skeletons, clips and actors
///
/// Runtime data-quality problems (NaN samples, missing tracks, abandoned
/// routines) are never reported through this type; they degrade to the bind
/// pose or a dropped action instead.
#[derive(Error, Debug)]
pub enum AnimError {
    /// A joint names a parent that does not precede it in the hierarchy
    #[error("Invalid parent: joint {joint} references parent {parent}, which does not precede it")]
    InvalidParent { joint: usize, parent: u32 },

    /// Clip and skeleton disagree on the number of joints
    #[error("Joint count mismatch: skeleton has {expected} joints, clip has {actual}")]
    JointCountMismatch { expected: usize, actual: usize },

    /// Clip data that cannot be played at all
    #[error("Invalid clip: {0}")]
    InvalidClip(String),

    /// A clip id that is not present in the clip library
    #[error("Unknown clip: {0}")]
    UnknownClip(String),

    /// I/O error while reading a scene description
    #[cfg(feature = "serde-support")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed scene description
    #[cfg(feature = "serde-support")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using AnimError
pub type Result<T> = std::result::Result<T, AnimError>;
