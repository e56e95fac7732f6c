//! Keyframe lookup and interpolation for joint tracks

use super::types::{JointPose, Lerp};

/// Find the index of the keyframe at or before the given frame
///
/// Returns None if the track has no keyframes. The returned index is the
/// earlier keyframe of the bracketing pair, so callers interpolate between
/// `[index]` and `[index + 1]`.
pub fn find_keyframe_index(frames: &[f32], frame: f32) -> Option<usize> {
    if frames.is_empty() {
        return None;
    }

    let last_index = frames.len() - 1;
    if last_index == 0 || frame >= frames[last_index] {
        return Some(last_index);
    }

    // Largest index where frames[index] <= frame
    let mut low = 0;
    let mut high = last_index;

    while low < high {
        let mid = (low + high).div_ceil(2);
        if frames[mid] <= frame {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Some(low)
}

/// Interpolate keyed poses at a fractional frame
///
/// Frames before the first key hold the first pose and frames after the last
/// key hold the last pose.
pub fn interpolate_keys(frames: &[f32], keys: &[JointPose], frame: f32) -> Option<JointPose> {
    let count = frames.len().min(keys.len());
    let index = find_keyframe_index(&frames[..count], frame)?;

    if index + 1 >= count {
        return Some(keys[index]);
    }

    let frame1 = frames[index];
    let frame2 = frames[index + 1];
    let t = if frame2 > frame1 {
        (frame - frame1) / (frame2 - frame1)
    } else {
        0.0
    };

    Some(keys[index].lerp(&keys[index + 1], t.clamp(0.0, 1.0)))
}
