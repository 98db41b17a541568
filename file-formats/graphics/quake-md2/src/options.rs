//! Load-time configuration

use crate::animation::DEFAULT_FRAMES_PER_SECOND;
use crate::coordinate::CoordinateSystem;

/// Options controlling how a model is decoded and initially played
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    /// Axis convention applied to every decoded position
    pub coordinate_system: CoordinateSystem,
    /// Initial playback rate, clamped to `[0, 60]`
    pub frames_per_second: f32,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coordinate_system(mut self, coordinate_system: CoordinateSystem) -> Self {
        self.coordinate_system = coordinate_system;
        self
    }

    pub fn with_frames_per_second(mut self, frames_per_second: f32) -> Self {
        self.frames_per_second = frames_per_second;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            coordinate_system: CoordinateSystem::YUp,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
        }
    }
}
