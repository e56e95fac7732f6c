//! Immutable animation clips

use log::debug;

use super::interpolation::interpolate_keys;
use super::types::JointPose;
use crate::clip_id::ClipId;
use crate::error::{AnimError, Result};

/// Keyframes for one joint
///
/// `frames[i]` is the frame at which `keys[i]` is reached. Frames must be
/// ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct JointTrack {
    frames: Vec<f32>,
    keys: Vec<JointPose>,
}

impl JointTrack {
    /// Create a track from explicit key frames
    ///
    /// Returns None when the track would be empty.
    pub fn new(frames: Vec<f32>, keys: Vec<JointPose>) -> Option<Self> {
        if frames.is_empty() || keys.is_empty() {
            return None;
        }
        Some(Self { frames, keys })
    }

    /// Create a track with one key on every whole frame starting at frame 0
    pub fn uniform(keys: Vec<JointPose>) -> Option<Self> {
        let frames = (0..keys.len()).map(|i| i as f32).collect();
        Self::new(frames, keys)
    }

    /// Create a track that holds a single pose
    pub fn constant(pose: JointPose) -> Self {
        Self {
            frames: vec![0.0],
            keys: vec![pose],
        }
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the track has no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sample the track at a fractional frame
    pub fn sample(&self, frame: f32) -> Option<JointPose> {
        interpolate_keys(&self.frames, &self.keys, frame)
    }
}

/// Keyframe data for every joint of a skeleton over a fixed number of frames
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    id: ClipId,
    length: f32,
    tracks: Vec<Option<JointTrack>>,
}

impl AnimationClip {
    /// Create a clip from per-joint tracks
    ///
    /// A `None` track means the clip does not drive that joint.
    pub fn new(id: impl Into<ClipId>, length: f32, tracks: Vec<Option<JointTrack>>) -> Result<Self> {
        let id = id.into();
        if !length.is_finite() || length < 0.0 {
            return Err(AnimError::InvalidClip(format!(
                "clip '{id}' has length {length}"
            )));
        }
        Ok(Self { id, length, tracks })
    }

    /// Create a clip from a shared keyframe pool
    ///
    /// Joint `j` reads `keys_per_track` consecutive poses starting at
    /// `offsets[j]`. Negative offsets and offsets whose range runs past the
    /// end of the pool leave that joint without a track.
    pub fn from_keyframe_pool(
        id: impl Into<ClipId>,
        length: f32,
        pool: &[JointPose],
        offsets: &[i64],
        keys_per_track: usize,
    ) -> Result<Self> {
        let id = id.into();
        let tracks = offsets
            .iter()
            .enumerate()
            .map(|(joint, &offset)| {
                let track = usize::try_from(offset)
                    .ok()
                    .and_then(|start| pool.get(start..start.checked_add(keys_per_track)?))
                    .and_then(|keys| JointTrack::uniform(keys.to_vec()));
                if track.is_none() {
                    debug!("Clip '{id}': joint {joint} has no usable track at offset {offset}");
                }
                track
            })
            .collect();
        Self::new(id, length, tracks)
    }

    /// Clip identifier
    pub fn id(&self) -> &ClipId {
        &self.id
    }

    /// Length in frames
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Number of joints the clip carries tracks for (including absent ones)
    pub fn num_joints(&self) -> usize {
        self.tracks.len()
    }

    /// Check whether the clip drives the given joint
    pub fn has_track(&self, joint: usize) -> bool {
        matches!(self.tracks.get(joint), Some(Some(_)))
    }

    /// Sample the local transform of a joint at a fractional frame
    ///
    /// The frame is clamped into `[0, length]`. Joints without a track, or
    /// outside the clip, return None.
    pub fn sample(&self, joint: usize, frame: f32) -> Option<JointPose> {
        let track = self.tracks.get(joint)?.as_ref()?;
        track.sample(frame.clamp(0.0, self.length))
    }
}
