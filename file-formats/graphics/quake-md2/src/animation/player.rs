//! Keyframe playback state machine
//!
//! The player tracks the current and next frame of one animation plus an
//! interpolation fraction in `[0, 1)`. Each [`AnimationPlayer::update`]
//! advances the fraction by `dt * fps`; once it reaches 1 the player steps to
//! the next frame and the fraction restarts at 0 (any remainder is dropped).
//! The output is a per-corner linear blend of the two keyframes.

use glam::Vec3;
use log::{debug, warn};

use super::types::Animation;
use crate::error::{Md2Error, Result};
use crate::geometry::KeyFrame;

/// Playback rate used when none is configured
pub const DEFAULT_FRAMES_PER_SECOND: f32 = 10.0;

/// Upper bound for the playback rate
pub const MAX_FRAMES_PER_SECOND: f32 = 60.0;

/// Derived playback state of the active animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Frames advance on every update
    Playing,
    /// Playback rate is zero
    Paused,
    /// The animation has a single frame
    Frozen,
    /// A non-looping animation reached its last frame
    Stopped,
}

/// Playback state plus the interpolated vertex buffer it produces
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    animation_index: usize,
    current_frame: usize,
    next_frame: usize,
    interpolation: f32,
    frames_per_second: f32,
    skin_index: usize,
    vertices: Vec<Vec3>,
}

impl AnimationPlayer {
    /// Create a player positioned at the start of the first animation
    pub fn new(animations: &[Animation], key_frames: &[KeyFrame], frames_per_second: f32) -> Self {
        let (current_frame, next_frame) = animations
            .first()
            .map(|anim| (anim.start_frame, step_frame(anim.start_frame, anim)))
            .unwrap_or_default();

        let vertices = key_frames
            .get(current_frame)
            .map(|frame| frame.vertices.clone())
            .unwrap_or_default();

        Self {
            animation_index: 0,
            current_frame,
            next_frame,
            interpolation: 0.0,
            frames_per_second: clamp_frames_per_second(frames_per_second),
            skin_index: 0,
            vertices,
        }
    }

    pub fn animation_index(&self) -> usize {
        self.animation_index
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn next_frame(&self) -> usize {
        self.next_frame
    }

    /// Blend fraction between the current and next frame, in `[0, 1)`
    pub fn interpolation(&self) -> f32 {
        self.interpolation
    }

    pub fn frames_per_second(&self) -> f32 {
        self.frames_per_second
    }

    pub fn skin_index(&self) -> usize {
        self.skin_index
    }

    /// Interpolated positions produced by the last update
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Playback state of the active animation
    pub fn state(&self, animations: &[Animation]) -> PlaybackState {
        let Some(anim) = animations.get(self.animation_index) else {
            return PlaybackState::Frozen;
        };

        if self.frames_per_second <= 0.0 {
            PlaybackState::Paused
        } else if anim.is_single_frame() {
            PlaybackState::Frozen
        } else if !anim.looping && self.current_frame == anim.end_frame {
            PlaybackState::Stopped
        } else {
            PlaybackState::Playing
        }
    }

    /// Switch to another animation
    ///
    /// Selecting the active animation again changes nothing. Otherwise the
    /// next frame jumps to the new animation's first frame and the blend
    /// restarts; the current frame is kept, so the first blend runs from
    /// wherever the previous animation was.
    pub fn set_animation(&mut self, index: usize, animations: &[Animation]) -> Result<()> {
        let anim = animations
            .get(index)
            .ok_or(Md2Error::AnimationIndexOutOfRange {
                index,
                count: animations.len(),
            })?;

        if index != self.animation_index {
            debug!(
                "Switching animation {} -> {} ({})",
                self.animation_index, index, anim.name
            );
            self.animation_index = index;
            self.next_frame = anim.start_frame;
            self.interpolation = 0.0;
        }

        Ok(())
    }

    /// Record the skin used by the render side
    pub fn set_skin_index(&mut self, index: usize, skin_count: usize) -> Result<()> {
        if index >= skin_count {
            return Err(Md2Error::SkinIndexOutOfRange {
                index,
                count: skin_count,
            });
        }
        self.skin_index = index;
        Ok(())
    }

    /// Set the playback rate, clamped to `[0, 60]`
    pub fn set_frames_per_second(&mut self, frames_per_second: f32) {
        self.frames_per_second = clamp_frames_per_second(frames_per_second);
    }

    /// Advance playback by `delta_seconds` and recompute the blended vertices
    ///
    /// Does nothing while paused, frozen on a single frame or stopped at the
    /// end of a non-looping animation.
    pub fn update(
        &mut self,
        delta_seconds: f32,
        animations: &[Animation],
        key_frames: &[KeyFrame],
    ) {
        if self.state(animations) != PlaybackState::Playing {
            return;
        }
        let Some(anim) = animations.get(self.animation_index) else {
            return;
        };

        let delta_seconds = if delta_seconds.is_finite() && delta_seconds >= 0.0 {
            delta_seconds
        } else {
            warn!("Ignoring invalid frame delta {delta_seconds}");
            0.0
        };

        self.interpolation += delta_seconds * self.frames_per_second;
        if self.interpolation >= 1.0 {
            self.current_frame = self.next_frame;
            self.next_frame = step_frame(self.next_frame, anim);
            self.interpolation = 0.0;
        }

        self.blend(key_frames);
    }

    fn blend(&mut self, key_frames: &[KeyFrame]) {
        let (Some(current), Some(next)) = (
            key_frames.get(self.current_frame),
            key_frames.get(self.next_frame),
        ) else {
            return;
        };

        let t = self.interpolation;
        self.vertices.clear();
        self.vertices.extend(
            current
                .vertices
                .iter()
                .zip(&next.vertices)
                .map(|(a, b)| a.lerp(*b, t)),
        );
    }
}

/// Frame that follows `frame` within `anim`
///
/// Past the last frame a looping animation wraps to its start and a
/// non-looping one stays on its last frame.
fn step_frame(frame: usize, anim: &Animation) -> usize {
    let next = frame + 1;
    if next <= anim.end_frame {
        next
    } else if anim.looping {
        anim.start_frame
    } else {
        anim.end_frame
    }
}

fn clamp_frames_per_second(frames_per_second: f32) -> f32 {
    if frames_per_second.is_nan() {
        warn!("Frame rate is NaN, pausing playback");
        return 0.0;
    }
    frames_per_second.clamp(0.0, MAX_FRAMES_PER_SECOND)
}
