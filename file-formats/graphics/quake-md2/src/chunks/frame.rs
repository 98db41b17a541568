use byteorder::{LittleEndian, ReadBytesExt};
use glam::Vec3;
use std::io::Read;

use crate::common::read_fixed_name;
use crate::error::{Md2Error, Result};

/// Capacity of a frame name in bytes
pub const FRAME_NAME_SIZE: usize = 16;

/// Quantized vertex as stored in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Md2Vertex {
    /// Quantized position, to be scaled and translated by the owning frame
    pub position: [u8; 3],
    /// Index into the precomputed normal table
    pub normal_index: u8,
}

/// Animation frame: decompression parameters, name and packed vertices
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Md2Frame {
    pub scale: Vec3,
    pub translate: Vec3,
    pub name: String,
    pub vertices: Vec<Md2Vertex>,
}

impl Md2Frame {
    /// Parse a frame with `num_vertices` packed vertices
    ///
    /// Only the 40-byte frame header and the vertex records are read; any
    /// padding up to the header's frame size is left to the caller.
    pub fn parse<R: Read>(reader: &mut R, num_vertices: usize) -> Result<Self> {
        let mut scale = [0f32; 3];
        let mut translate = [0f32; 3];
        reader
            .read_f32_into::<LittleEndian>(&mut scale)
            .map_err(Md2Error::reading("frames"))?;
        reader
            .read_f32_into::<LittleEndian>(&mut translate)
            .map_err(Md2Error::reading("frames"))?;
        let name = read_fixed_name::<_, FRAME_NAME_SIZE>(reader, "frames")?;

        let mut packed = vec![0u8; num_vertices * 4];
        reader
            .read_exact(&mut packed)
            .map_err(Md2Error::reading("frame vertices"))?;

        let vertices = packed
            .chunks_exact(4)
            .map(|v| Md2Vertex {
                position: [v[0], v[1], v[2]],
                normal_index: v[3],
            })
            .collect();

        Ok(Self {
            scale: Vec3::from_array(scale),
            translate: Vec3::from_array(translate),
            name,
            vertices,
        })
    }

    /// Decompress a vertex in the file's native (Z-up) axes
    ///
    /// `value = scale * quantized + translate`, per axis.
    pub fn decompress(&self, vertex: &Md2Vertex) -> Vec3 {
        let quantized = Vec3::new(
            f32::from(vertex.position[0]),
            f32::from(vertex.position[1]),
            f32::from(vertex.position[2]),
        );
        self.scale * quantized + self.translate
    }
}
