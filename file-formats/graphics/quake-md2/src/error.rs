use std::io;
use thiserror::Error;

/// Error types for MD2 model loading and playback
#[derive(Error, Debug)]
pub enum Md2Error {
    /// I/O error while reading the byte stream or listing a directory
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A file could not be opened through the archive
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The stream ended before a section was fully read
    #[error("Unexpected end of stream while reading {section}")]
    Truncated {
        /// Section being read when the stream ran out
        section: &'static str,
    },

    /// Invalid ident in the file header
    #[error("Invalid magic number: expected '{expected}', got '{actual}'")]
    InvalidMagic { expected: String, actual: String },

    /// Header version field is not the supported one
    #[error("Unsupported version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: i32, actual: i32 },

    /// A header count is negative
    #[error("Negative {what} count: {count}")]
    NegativeCount { what: &'static str, count: i32 },

    /// A header count exceeds the format maximum
    #[error("Too many {what}: {count} (maximum {max})")]
    LimitExceeded {
        what: &'static str,
        count: i32,
        max: i32,
    },

    /// Skin dimensions cannot normalize texture coordinates
    #[error("Invalid skin dimensions: {width}x{height}")]
    InvalidSkinDimensions { width: i32, height: i32 },

    /// Declared frame size cannot hold the declared vertices
    #[error("Frame size {frame_size} is smaller than the {required} bytes needed per frame")]
    InvalidFrameSize { frame_size: i32, required: i64 },

    /// A section lies (partly) outside the stream
    #[error("Section {section} at offset {offset} with size {size} exceeds stream length {stream_len}")]
    SectionOutOfBounds {
        section: &'static str,
        offset: i64,
        size: i64,
        stream_len: u64,
    },

    /// The model declares no frames
    #[error("Model contains no frames")]
    NoFrames,

    /// A triangle references a vertex or texcoord that does not exist
    #[error("Triangle {triangle} references {kind} {index}, but only {count} exist")]
    InvalidIndex {
        kind: &'static str,
        triangle: usize,
        index: u16,
        count: usize,
    },

    /// Caller selected an animation index that does not exist
    #[error("Animation index {index} out of range ({count} animations)")]
    AnimationIndexOutOfRange { index: usize, count: usize },

    /// Caller selected an animation name that does not exist
    #[error("Unknown animation: {0}")]
    UnknownAnimation(String),

    /// Caller selected a skin index that does not exist
    #[error("Skin index {index} out of range ({count} skins)")]
    SkinIndexOutOfRange { index: usize, count: usize },
}

impl Md2Error {
    /// Whether this error is a caller-contract violation rather than a data error
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Self::AnimationIndexOutOfRange { .. }
                | Self::UnknownAnimation(_)
                | Self::SkinIndexOutOfRange { .. }
        )
    }

    /// Map an I/O error raised while reading `section`
    ///
    /// Short reads become [`Md2Error::Truncated`]; anything else stays an I/O error.
    pub(crate) fn reading(section: &'static str) -> impl Fn(io::Error) -> Self {
        move |err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                Self::Truncated { section }
            } else {
                Self::Io(err)
            }
        }
    }
}

/// Result type using Md2Error
pub type Result<T> = std::result::Result<T, Md2Error>;
