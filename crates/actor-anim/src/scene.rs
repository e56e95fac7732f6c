//! JSON scene descriptions for replaying an actor deterministically
//!
//! A scene bundles a skeleton, its clips, configuration overrides and a
//! script of steps. Replaying the same scene always produces the same
//! joint transforms.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::animation::{AnimationClip, AnimationRequest, ClipLibrary, JointPose, JointTrack};
use crate::clip_id::ClipId;
use crate::config::AnimationConfig;
use crate::error::{AnimError, Result};
use crate::scheduler::{Routine, RoutineOptions};
use crate::skeleton::{Joint, JointHierarchy};

/// Keyframes of one joint
///
/// Without `frames`, keys fall on consecutive whole frames from 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDefinition {
    #[serde(default)]
    pub frames: Option<Vec<f32>>,
    pub keys: Vec<JointPose>,
}

impl TrackDefinition {
    fn build(&self, clip: &ClipId, joint: usize) -> Result<Option<JointTrack>> {
        match &self.frames {
            None => Ok(JointTrack::uniform(self.keys.clone())),
            Some(frames) if frames.len() == self.keys.len() => {
                Ok(JointTrack::new(frames.clone(), self.keys.clone()))
            }
            Some(frames) => Err(AnimError::InvalidClip(format!(
                "clip '{clip}' joint {joint}: {} frames for {} keys",
                frames.len(),
                self.keys.len()
            ))),
        }
    }
}

/// A clip as written in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDefinition {
    pub id: ClipId,
    pub length: f32,
    /// One entry per joint; `null` leaves the joint undriven
    #[serde(default)]
    pub tracks: Vec<Option<TrackDefinition>>,
}

impl ClipDefinition {
    /// Build the playable clip
    pub fn build(&self) -> Result<AnimationClip> {
        let tracks = self
            .tracks
            .iter()
            .enumerate()
            .map(|(joint, track)| match track {
                Some(track) => track.build(&self.id, joint),
                None => Ok(None),
            })
            .collect::<Result<Vec<_>>>()?;
        AnimationClip::new(self.id.clone(), self.length, tracks)
    }
}

fn one() -> u32 {
    1
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SceneStep {
    /// Register clips directly with the blender
    Play { request: AnimationRequest },
    /// Queue a routine
    Enqueue {
        routine: Routine,
        #[serde(default)]
        blocking: bool,
        #[serde(default)]
        high_priority: bool,
        #[serde(default)]
        expiry_frames: Option<f32>,
        #[serde(default)]
        target: Option<u64>,
    },
    /// Advance the actor, `repeat` times in steps of `frames`
    Update {
        frames: f32,
        #[serde(default = "one")]
        repeat: u32,
    },
}

/// A complete replayable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub config: AnimationConfig,
    pub skeleton: Vec<Joint>,
    #[serde(default)]
    pub clips: Vec<ClipDefinition>,
    #[serde(default)]
    pub steps: Vec<SceneStep>,
}

impl Scene {
    /// Parse a scene from JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a scene from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Validated joint hierarchy
    pub fn hierarchy(&self) -> Result<JointHierarchy> {
        JointHierarchy::new(self.skeleton.clone())
    }

    /// Every clip of the scene, keyed by id
    pub fn library(&self) -> Result<ClipLibrary> {
        let mut library = ClipLibrary::new();
        for definition in &self.clips {
            library.insert(definition.build()?);
        }
        Ok(library)
    }

    /// Build a fresh actor at the bind pose
    pub fn build_actor(&self, id: u64) -> Result<Actor> {
        Actor::new(
            id,
            Arc::new(self.hierarchy()?),
            Arc::new(self.library()?),
            self.config,
        )
    }

    /// Run every step on a fresh actor
    ///
    /// `observe` is called after each individual update with the running
    /// update count and the actor. Unknown clip ids anywhere in the script,
    /// including routines and in-between clips, fail the replay before the
    /// first step runs instead of being skipped.
    pub fn replay(&self, mut observe: impl FnMut(usize, &Actor)) -> Result<Actor> {
        let mut actor = self.build_actor(1)?;
        self.check_clips(actor.blender().library())?;
        let mut updates = 0;

        for step in &self.steps {
            match step {
                SceneStep::Play { request } => {
                    actor.play(request);
                }
                SceneStep::Enqueue {
                    routine,
                    blocking,
                    high_priority,
                    expiry_frames,
                    target,
                } => {
                    let options = RoutineOptions {
                        blocking: *blocking,
                        high_priority: *high_priority,
                        expiry_frames: *expiry_frames,
                        on_drop_or_complete: None,
                    };
                    match target {
                        Some(target) => {
                            actor.enqueue_targeted_routine(*target, routine.clone(), options);
                        }
                        None => actor.enqueue_routine(routine.clone(), options),
                    }
                }
                SceneStep::Update { frames, repeat } => {
                    for _ in 0..*repeat {
                        actor.update(*frames);
                        updates += 1;
                        observe(updates, &actor);
                    }
                }
            }
        }

        Ok(actor)
    }

    fn check_clips(&self, library: &ClipLibrary) -> Result<()> {
        let requests = self.steps.iter().filter_map(|step| match step {
            SceneStep::Play { request } => Some(request),
            SceneStep::Enqueue { routine, .. } => Some(&routine.animation),
            SceneStep::Update { .. } => None,
        });

        for request in requests {
            let in_between = request
                .transition_params
                .as_ref()
                .and_then(|params| params.in_between.as_ref());
            for id in request.clips.iter().chain(in_between) {
                library.require(id)?;
            }
        }
        Ok(())
    }
}
