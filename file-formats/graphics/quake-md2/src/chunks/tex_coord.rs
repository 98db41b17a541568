use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

use crate::error::{Md2Error, Result};

/// Texture coordinate in skin pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Md2TexCoord {
    pub s: i16,
    pub t: i16,
}

impl Md2TexCoord {
    /// Parse a 4-byte texture coordinate record
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let s = reader
            .read_i16::<LittleEndian>()
            .map_err(Md2Error::reading("texture coordinates"))?;
        let t = reader
            .read_i16::<LittleEndian>()
            .map_err(Md2Error::reading("texture coordinates"))?;
        Ok(Self { s, t })
    }
}
