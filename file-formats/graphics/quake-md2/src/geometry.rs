//! Flattening of indexed triangles into per-corner vertex streams
//!
//! A single MD2 vertex can be paired with different texture coordinates in
//! different triangles, so the renderer gets a non-indexed stream: one entry
//! per triangle corner, in triangle order. Positions and texture coordinates
//! are flattened the same way, so entry `3 * n + corner` in both buffers
//! describes the same corner of triangle `n`.

use glam::{Vec2, Vec3};

use crate::chunks::{Md2Frame, Md2TexCoord, Md2Triangle};
use crate::coordinate::{CoordinateSystem, transform_position};

/// Decoded positions of one frame, one entry per triangle corner
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyFrame {
    pub vertices: Vec<Vec3>,
}

impl KeyFrame {
    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty frame
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v))),
        )
    }
}

/// Decompress a frame and flatten it over the triangle list
///
/// Triangle indices must already be validated against the frame's vertex
/// count.
pub fn unpack_key_frame(
    frame: &Md2Frame,
    triangles: &[Md2Triangle],
    coordinate_system: CoordinateSystem,
) -> KeyFrame {
    let vertices = triangles
        .iter()
        .flat_map(|tri| tri.vertex)
        .map(|index| {
            let packed = &frame.vertices[usize::from(index)];
            transform_position(frame.decompress(packed), coordinate_system)
        })
        .collect();

    KeyFrame { vertices }
}

/// Normalize texture coordinates by the skin size and flatten them
///
/// Computed once per model; all frames share the result.
pub fn scale_tex_coords(
    tex_coords: &[Md2TexCoord],
    triangles: &[Md2Triangle],
    skin_width: i32,
    skin_height: i32,
) -> Vec<Vec2> {
    let width = skin_width as f32;
    let height = skin_height as f32;

    triangles
        .iter()
        .flat_map(|tri| tri.st)
        .map(|index| {
            let st = &tex_coords[usize::from(index)];
            Vec2::new(f32::from(st.s) / width, f32::from(st.t) / height)
        })
        .collect()
}
