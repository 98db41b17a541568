//! Animation data types

/// A named, contiguous run of frames
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    /// Name derived from the frame-name prefix
    pub name: String,
    /// First frame index
    pub start_frame: usize,
    /// Last frame index (inclusive)
    pub end_frame: usize,
    /// Whether playback wraps back to `start_frame`
    pub looping: bool,
}

impl Animation {
    /// Number of frames in the animation
    pub fn frame_count(&self) -> usize {
        self.end_frame - self.start_frame + 1
    }

    /// Whether the animation consists of a single frame
    pub fn is_single_frame(&self) -> bool {
        self.start_frame == self.end_frame
    }

    /// Whether `frame` lies within this animation
    pub fn contains(&self, frame: usize) -> bool {
        (self.start_frame..=self.end_frame).contains(&frame)
    }
}

/// Selects an animation by position or by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationId<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for AnimationId<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for AnimationId<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}
