use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

use crate::error::{Md2Error, Result};

/// Triangle referencing per-model vertex and texture coordinate arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Md2Triangle {
    /// Indices into a frame's vertex array
    pub vertex: [u16; 3],
    /// Indices into the texture coordinate array
    pub st: [u16; 3],
}

impl Md2Triangle {
    /// Parse a 12-byte triangle record
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut vertex = [0u16; 3];
        let mut st = [0u16; 3];
        reader
            .read_u16_into::<LittleEndian>(&mut vertex)
            .map_err(Md2Error::reading("triangles"))?;
        reader
            .read_u16_into::<LittleEndian>(&mut st)
            .map_err(Md2Error::reading("triangles"))?;
        Ok(Self { vertex, st })
    }

    /// Check that every corner resolves within the model's arrays
    pub fn validate_indices(
        &self,
        triangle: usize,
        num_vertices: usize,
        num_tex_coords: usize,
    ) -> Result<()> {
        if let Some(&index) = self.vertex.iter().find(|&&i| usize::from(i) >= num_vertices) {
            return Err(Md2Error::InvalidIndex {
                kind: "vertex",
                triangle,
                index,
                count: num_vertices,
            });
        }

        if let Some(&index) = self.st.iter().find(|&&i| usize::from(i) >= num_tex_coords) {
            return Err(Md2Error::InvalidIndex {
                kind: "texture coordinate",
                triangle,
                index,
                count: num_tex_coords,
            });
        }

        Ok(())
    }
}
