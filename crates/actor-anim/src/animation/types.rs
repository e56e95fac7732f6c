//! Pose types and interpolation helpers shared by the blender and the solver

use glam::{Quat, Vec3};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Magnitude below which an interpolated quaternion collapses to identity
pub const QUAT_EPSILON: f32 = 1e-7;

/// Local transform of a single joint, relative to its bind pose
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct JointPose {
    pub rotation: Quat,
    pub translation: Vec3,
}

impl JointPose {
    /// Pose that leaves the bind pose untouched
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    /// Create a new joint pose
    pub const fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Pose with only a translation component
    pub const fn from_translation(translation: Vec3) -> Self {
        Self::new(Quat::IDENTITY, translation)
    }

    /// Pose with only a rotation component
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self::new(rotation, Vec3::ZERO)
    }
}

impl Default for JointPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Model-space transform of a joint after forward kinematics
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct WorldTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl WorldTransform {
    /// Transform at the origin with no rotation
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Map a point from joint space into model space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + rotate_vector(self.rotation, point)
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Trait for types that can be interpolated between two values
pub trait Lerp: Copy {
    /// Interpolate from `self` towards `other` by `t`
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        lerp_f32(*self, *other, t)
    }
}

impl Lerp for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            lerp_f32(self.x, other.x, t),
            lerp_f32(self.y, other.y, t),
            lerp_f32(self.z, other.z, t),
        )
    }
}

impl Lerp for Quat {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        nlerp(*self, *other, t)
    }
}

impl Lerp for JointPose {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            rotation: nlerp(self.rotation, other.rotation, t),
            translation: Lerp::lerp(&self.translation, &other.translation, t),
        }
    }
}

/// Normalized linear quaternion interpolation along the shortest arc
///
/// `b` is negated when the two rotations lie in opposite hemispheres. A
/// result too short to normalize collapses to the identity rotation.
pub fn nlerp(a: Quat, b: Quat, t: f32) -> Quat {
    let b = if a.dot(b) < 0.0 { -b } else { b };

    let x = lerp_f32(a.x, b.x, t);
    let y = lerp_f32(a.y, b.y, t);
    let z = lerp_f32(a.z, b.z, t);
    let w = lerp_f32(a.w, b.w, t);

    let len = (x * x + y * y + z * z + w * w).sqrt();
    if len <= QUAT_EPSILON || !len.is_finite() {
        Quat::IDENTITY
    } else {
        Quat::from_xyzw(x / len, y / len, z / len, w / len)
    }
}

/// Normalize a quaternion, falling back to identity when it has no usable length
pub fn safe_normalize(q: Quat) -> Quat {
    let len = q.length();
    if len <= QUAT_EPSILON || !len.is_finite() {
        Quat::IDENTITY
    } else {
        Quat::from_xyzw(q.x / len, q.y / len, q.z / len, q.w / len)
    }
}

/// Rotate a vector by a quaternion, renormalizing the quaternion first
pub fn rotate_vector(q: Quat, v: Vec3) -> Vec3 {
    safe_normalize(q) * v
}

/// Replace every non-finite axis of a sampled translation with zero
pub fn sanitize_translation(v: Option<Vec3>) -> Vec3 {
    v.map_or(Vec3::ZERO, |v| {
        Vec3::new(finite_or_zero(v.x), finite_or_zero(v.y), finite_or_zero(v.z))
    })
}

/// Replace a sampled rotation with identity unless every component is finite
pub fn sanitize_rotation(q: Option<Quat>) -> Quat {
    match q {
        Some(q) if q.is_finite() => q,
        _ => Quat::IDENTITY,
    }
}

fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
