//! Clip identifiers
//!
//! Clips are looked up by a stable string id rather than by the identity of a
//! loaded resource, so reloading a clip never invalidates a registration. The
//! last character of an id selects the animation slot the clip plays in.

use std::fmt;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::config::NUM_SLOTS;

/// Wildcard character accepted by [`ClipId::matches`]
pub const WILDCARD: u8 = b'?';

/// Stable identifier of an animation clip
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(transparent))]
pub struct ClipId(String);

impl ClipId {
    /// Create a new clip id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Slot this clip plays in
    ///
    /// The final character is read as a base-36 digit (`0-9`, then `a-z`
    /// case-insensitively) and clamped into `[0, NUM_SLOTS)`. Ids that end in
    /// anything else, or are empty, map to slot 0.
    pub fn slot_index(&self) -> usize {
        let digit = self
            .0
            .chars()
            .next_back()
            .and_then(|c| c.to_digit(36))
            .unwrap_or(0) as usize;
        clamp_slot(digit)
    }

    /// Match against a pattern of the same length where `?` matches any byte
    pub fn matches(&self, pattern: &str) -> bool {
        let id = self.0.as_bytes();
        let pattern = pattern.as_bytes();
        id.len() == pattern.len()
            && id
                .iter()
                .zip(pattern)
                .all(|(&c, &p)| p == WILDCARD || c == p)
    }
}

/// Clamp an arbitrary slot number into the valid slot range
pub fn clamp_slot(slot: usize) -> usize {
    slot.min(NUM_SLOTS - 1)
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClipId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ClipId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
