//! Static joint hierarchy of a skeletal model

use glam::{Quat, Vec3};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::error::{AnimError, Result};

/// A joint with its bind pose relative to its parent
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Joint {
    /// Optional display name
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub name: Option<String>,
    /// Index of the parent joint (None for roots)
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub parent: Option<u32>,
    #[cfg_attr(feature = "serde-support", serde(default = "identity_rotation"))]
    pub bind_rotation: Quat,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub bind_translation: Vec3,
}

#[cfg(feature = "serde-support")]
fn identity_rotation() -> Quat {
    Quat::IDENTITY
}

impl Joint {
    /// Create a root joint
    pub fn root(bind_rotation: Quat, bind_translation: Vec3) -> Self {
        Self {
            name: None,
            parent: None,
            bind_rotation,
            bind_translation,
        }
    }

    /// Create a joint attached to `parent`
    pub fn child(parent: u32, bind_rotation: Quat, bind_translation: Vec3) -> Self {
        Self {
            name: None,
            parent: Some(parent),
            bind_rotation,
            bind_translation,
        }
    }

    /// Attach a display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Joints ordered so that every parent precedes its children
///
/// The ordering is checked once at construction; traversals rely on it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JointHierarchy {
    joints: Vec<Joint>,
}

impl JointHierarchy {
    /// Build a hierarchy, rejecting any joint whose parent does not precede it
    pub fn new(joints: Vec<Joint>) -> Result<Self> {
        for (index, joint) in joints.iter().enumerate() {
            if let Some(parent) = joint.parent
                && parent as usize >= index
            {
                return Err(AnimError::InvalidParent {
                    joint: index,
                    parent,
                });
            }
        }
        Ok(Self { joints })
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    /// Parent index of a joint
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.joints.get(index)?.parent.map(|p| p as usize)
    }

    /// Direct children of a joint, in index order
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.joints
            .iter()
            .enumerate()
            .skip(index + 1)
            .filter(move |(_, joint)| joint.parent == Some(index as u32))
            .map(|(child, _)| child)
    }

    /// Indices of all root joints
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.joints
            .iter()
            .enumerate()
            .filter(|(_, joint)| joint.is_root())
            .map(|(index, _)| index)
    }

    /// Number of joints between a joint and its root
    pub fn depth(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut current = self.parent(index);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }
}
