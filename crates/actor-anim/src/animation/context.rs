//! Playback state of a clip assigned to a slot

use std::sync::Arc;

use log::{debug, trace};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use super::clip::AnimationClip;
use super::types::JointPose;
use crate::clip_id::ClipId;

/// How a context loops
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct LoopParams {
    /// Frames one pass over the clip should take (`None` plays at clip speed,
    /// `Some(0.0)` holds frame 0)
    pub loop_duration: Option<f32>,
    /// Passes to play before freezing on the last frame (`None` or 0 loops forever)
    pub num_loops: Option<u32>,
    /// Re-registering the same clip does not restart a low-priority context
    pub low_priority: bool,
}

impl LoopParams {
    /// Loop forever at clip speed
    pub fn looping() -> Self {
        Self::default()
    }

    /// Play the given number of passes, then freeze
    pub fn times(num_loops: u32) -> Self {
        Self {
            num_loops: Some(num_loops),
            ..Self::default()
        }
    }

    /// Hold frame 0 indefinitely
    pub fn hold() -> Self {
        Self {
            loop_duration: Some(0.0),
            ..Self::default()
        }
    }

    /// Mark as a low-priority loop
    pub fn low_priority(mut self) -> Self {
        self.low_priority = true;
        self
    }
}

/// Cross-fade timing for a context entering or leaving a slot
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct TransitionParams {
    pub transition_in_time: f32,
    pub transition_out_time: f32,
    /// Clip whose first frame is blended through halfway into the transition
    pub in_between: Option<ClipId>,
    /// Start fading out before the final loop completes
    pub eager_transition_out: bool,
}

impl TransitionParams {
    /// Fade in over the given number of frames
    pub fn fade_in(frames: f32) -> Self {
        Self {
            transition_in_time: frames,
            ..Self::default()
        }
    }

    /// Set the fade-out time
    pub fn with_fade_out(mut self, frames: f32) -> Self {
        self.transition_out_time = frames;
        self
    }
}

/// Mesh visibility request carried by a playing context
///
/// The blender does not interpret these; it only reports the ones attached to
/// active contexts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct VisibilityOverride {
    /// Name of the mesh part the override applies to
    pub part: String,
    pub visible: bool,
}

impl VisibilityOverride {
    /// Hide the named mesh part
    pub fn hide(part: impl Into<String>) -> Self {
        Self {
            part: part.into(),
            visible: false,
        }
    }

    /// Show the named mesh part
    pub fn show(part: impl Into<String>) -> Self {
        Self {
            part: part.into(),
            visible: true,
        }
    }
}

/// A clip plus its playback state
#[derive(Debug, Clone)]
pub struct AnimationContext {
    clip: Arc<AnimationClip>,
    loop_params: LoopParams,
    transition_params: Option<TransitionParams>,
    visibility: Option<VisibilityOverride>,
    current_frame: f32,
    frames_since_complete: f32,
    total_lifetime: f32,
    loop_count: u32,
    complete: bool,
    serial: u64,
    locks_actor: bool,
}

impl AnimationContext {
    /// Create a context at frame 0
    pub fn new(
        clip: Arc<AnimationClip>,
        loop_params: LoopParams,
        transition_params: Option<TransitionParams>,
    ) -> Self {
        Self {
            clip,
            loop_params,
            transition_params,
            visibility: None,
            current_frame: 0.0,
            frames_since_complete: 0.0,
            total_lifetime: 0.0,
            loop_count: 0,
            complete: false,
            serial: 0,
            locks_actor: false,
        }
    }

    /// Attach a visibility override
    pub fn with_visibility(mut self, visibility: Option<VisibilityOverride>) -> Self {
        self.visibility = visibility;
        self
    }

    /// Advance playback by `dt` frames
    ///
    /// Negative, NaN and infinite `dt` advance nothing.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() {
            debug!("Context '{}': ignoring non-finite dt {dt}", self.clip.id());
            return;
        }
        let dt = dt.max(0.0);
        self.total_lifetime += dt;

        if self.complete {
            self.frames_since_complete += dt;
            return;
        }

        let length = self.clip.length();
        if self.loop_params.loop_duration == Some(0.0) || length <= 0.0 {
            self.current_frame = 0.0;
            self.mark_complete();
            return;
        }

        let frame = self.current_frame + dt * self.scaling_factor();
        if !frame.is_finite() {
            debug!("Context '{}': frame overflowed, holding", self.clip.id());
            return;
        }
        self.current_frame = frame;
        if frame > length {
            self.wrap(frame, length);
        }

        trace!(
            "Context '{}': frame {:.3} loop {}",
            self.clip.id(),
            self.current_frame,
            self.loop_count
        );
    }

    /// Fold `frame` back into `(0, length]`, counting whole passes in one step
    fn wrap(&mut self, frame: f32, length: f32) {
        // Whole passes completed; an exact multiple of `length` stays on the last frame
        let passes = ((frame / length).ceil() - 1.0).max(1.0);

        if let Some(num_loops) = self.loop_params.num_loops
            && num_loops != 0
        {
            let remaining = num_loops.saturating_sub(self.loop_count);
            if passes >= remaining as f32 {
                // Frames played past the end of the final pass
                let overshoot = frame - remaining as f32 * length;
                self.frames_since_complete = overshoot.max(0.0) / self.scaling_factor();
                self.loop_count = num_loops;
                self.current_frame = length;
                self.mark_complete();
                return;
            }
        }

        self.loop_count = self.loop_count.saturating_add(passes as u32);
        self.current_frame = match frame.rem_euclid(length) {
            r if r > 0.0 => r,
            _ => length,
        };
    }

    fn mark_complete(&mut self) {
        if !self.complete {
            trace!("Context '{}' complete", self.clip.id());
        }
        self.complete = true;
    }

    fn scaling_factor(&self) -> f32 {
        let length = self.clip.length();
        match self.loop_params.loop_duration {
            Some(duration) if duration > 0.0 => length / duration,
            _ => 1.0,
        }
    }

    /// Sample the clip for a joint at the current frame
    pub fn sample(&self, joint: usize) -> Option<JointPose> {
        self.clip.sample(joint, self.current_frame)
    }

    /// True unless the context is still working through a finite loop count
    ///
    /// A context without a loop count never needs to be waited on.
    pub fn is_done_looping(&self) -> bool {
        matches!(self.loop_params.num_loops, None | Some(0)) || self.complete
    }

    /// Check whether the context has frozen on its final pose
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// How far the context is still fading in, 1 at the start and 0 once faded in
    pub fn fade_in_weight(&self) -> f32 {
        match &self.transition_params {
            Some(params) if params.transition_in_time > 0.0 => {
                1.0 - self.total_lifetime / params.transition_in_time
            }
            _ => 0.0,
        }
    }

    /// How far the context has faded out, 0 while playing and 1 once gone
    ///
    /// Only contexts that are ready for a transition out contribute: complete
    /// ones, or eager ones on their final loop. Indefinite loops never fade.
    pub fn fade_out_weight(&self) -> f32 {
        let Some(params) = &self.transition_params else {
            return 0.0;
        };
        let out_time = params.transition_out_time;
        if out_time <= 0.0 {
            return 0.0;
        }

        if self.complete {
            if params.eager_transition_out {
                return 1.0 + self.frames_since_complete / out_time;
            }
            return self.frames_since_complete / out_time;
        }

        if params.eager_transition_out && self.is_on_final_loop() {
            let remaining = (self.clip.length() - self.current_frame) / self.scaling_factor();
            return 1.0 - remaining / out_time;
        }

        0.0
    }

    fn is_on_final_loop(&self) -> bool {
        matches!(self.loop_params.num_loops, Some(n) if n != 0 && self.loop_count + 1 >= n)
    }

    /// Transition-out time the context asks for, if positive
    pub fn transition_out_time(&self) -> Option<f32> {
        self.transition_params
            .as_ref()
            .map(|params| params.transition_out_time)
            .filter(|&t| t > 0.0)
    }

    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    pub fn clip_id(&self) -> &ClipId {
        self.clip.id()
    }

    pub fn loop_params(&self) -> &LoopParams {
        &self.loop_params
    }

    pub fn transition_params(&self) -> Option<&TransitionParams> {
        self.transition_params.as_ref()
    }

    pub fn visibility(&self) -> Option<&VisibilityOverride> {
        self.visibility.as_ref()
    }

    pub fn current_frame(&self) -> f32 {
        self.current_frame
    }

    pub fn frames_since_complete(&self) -> f32 {
        self.frames_since_complete
    }

    pub fn total_lifetime(&self) -> f32 {
        self.total_lifetime
    }

    /// Playback serial assigned when the context entered a slot
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub(crate) fn set_serial(&mut self, serial: u64) {
        self.serial = serial;
    }

    /// Whether the context was started by a blocking routine
    pub fn locks_actor(&self) -> bool {
        self.locks_actor
    }

    pub(crate) fn set_locks_actor(&mut self, locks_actor: bool) {
        self.locks_actor = locks_actor;
    }
}
