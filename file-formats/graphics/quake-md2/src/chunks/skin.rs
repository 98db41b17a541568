use std::io::Read;

use crate::common::read_fixed_name;
use crate::error::Result;

/// Capacity of a skin name in bytes
pub const SKIN_NAME_SIZE: usize = 64;

/// Skin entry from the file header section
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Md2Skin {
    /// Skin path as stored in the file, usually relative to the game root
    pub name: String,
}

impl Md2Skin {
    /// Parse a 64-byte skin record
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let name = read_fixed_name::<_, SKIN_NAME_SIZE>(reader, "skins")?;
        Ok(Self { name })
    }
}
