//! Id-keyed store of loaded clips

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use super::clip::AnimationClip;
use crate::clip_id::ClipId;
use crate::error::{AnimError, Result};

/// Clips available to an actor, keyed by their stable id
///
/// Reloading a clip under the same id replaces the stored copy; contexts
/// that are already playing keep the version they started with.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: BTreeMap<ClipId, Arc<AnimationClip>>,
}

impl ClipLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a clip, returning the shared handle
    pub fn insert(&mut self, clip: AnimationClip) -> Arc<AnimationClip> {
        let clip = Arc::new(clip);
        if self.clips.insert(clip.id().clone(), clip.clone()).is_some() {
            debug!("Replaced clip '{}'", clip.id());
        }
        clip
    }

    /// Look up a clip by id
    pub fn get(&self, id: &ClipId) -> Option<&Arc<AnimationClip>> {
        self.clips.get(id)
    }

    /// Look up a clip by id, failing if it is missing
    pub fn require(&self, id: &ClipId) -> Result<&Arc<AnimationClip>> {
        self.get(id)
            .ok_or_else(|| AnimError::UnknownClip(id.to_string()))
    }

    /// All clips whose id matches a `?` wildcard pattern, in id order
    pub fn find(&self, pattern: &str) -> Vec<&Arc<AnimationClip>> {
        self.clips
            .iter()
            .filter(|(id, _)| id.matches(pattern))
            .map(|(_, clip)| clip)
            .collect()
    }

    /// Iterate over all clips in id order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<AnimationClip>> {
        self.clips.values()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl FromIterator<AnimationClip> for ClipLibrary {
    fn from_iter<I: IntoIterator<Item = AnimationClip>>(iter: I) -> Self {
        let mut library = Self::new();
        for clip in iter {
            library.insert(clip);
        }
        library
    }
}
