//! Axis conventions for decoded vertex positions
//!
//! MD2 files store positions with Z pointing up. Most renderers expect Y up,
//! so the default [`CoordinateSystem::YUp`] applies a fixed axis swap to
//! every decoded position:
//!
//! - output.x = native x
//! - output.y = native z (vertical)
//! - output.z = native y (depth)
//!
//! The swap is applied once, at load time, to every keyframe. Texture
//! coordinates are unaffected.

use glam::Vec3;

/// Target axis convention for decoded positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateSystem {
    /// Y-up: native Z becomes Y and native Y becomes Z
    #[default]
    YUp,
    /// The file's native Z-up axes, unchanged
    ZUp,
}

/// Transform a position from native MD2 axes to the target convention
///
/// # Examples
///
/// ```rust
/// use glam::Vec3;
/// use quake_md2::coordinate::{CoordinateSystem, transform_position};
///
/// let native = Vec3::new(1.0, 2.0, 3.0); // x, depth, up
/// assert_eq!(transform_position(native, CoordinateSystem::YUp), Vec3::new(1.0, 3.0, 2.0));
/// assert_eq!(transform_position(native, CoordinateSystem::ZUp), native);
/// ```
pub fn transform_position(native: Vec3, target: CoordinateSystem) -> Vec3 {
    match target {
        CoordinateSystem::YUp => Vec3::new(native.x, native.z, native.y),
        CoordinateSystem::ZUp => native,
    }
}
