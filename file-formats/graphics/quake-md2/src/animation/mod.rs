//! MD2 keyframe animation
//!
//! MD2 files carry no animation table. Frames are grouped into named
//! animations by the non-digit prefix of their names ("run1".."run6" form the
//! "run" animation), and playback linearly blends the current keyframe into
//! the next one as time advances.
//!
//! # Example
//!
//! ```rust
//! use quake_md2::animation::segment_animations;
//!
//! let set = segment_animations(["stand1", "stand2", "run1", "run2", "run3"]);
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.index_of("run"), Some(1));
//! assert_eq!(set.get(1).map(|a| (a.start_frame, a.end_frame)), Some((2, 4)));
//! ```

mod player;
mod segment;
mod types;

pub use player::{
    AnimationPlayer, DEFAULT_FRAMES_PER_SECOND, MAX_FRAMES_PER_SECOND, PlaybackState,
};
pub use segment::{AnimationSet, animation_id, segment_animations};
pub use types::{Animation, AnimationId};
