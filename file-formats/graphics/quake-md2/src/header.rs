//! MD2 file header and the structural checks that gate every allocation
//!
//! The header is 17 little-endian `i32` fields (68 bytes). Every count in it
//! comes from an untrusted stream, so [`Md2Header::validate`] must succeed
//! before any count is used to size a buffer or seek to a section.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

use crate::error::{Md2Error, Result};

/// Ident of an MD2 file ("IDP2")
pub const MD2_IDENT: [u8; 4] = *b"IDP2";

/// The only MD2 version in existence
pub const MD2_VERSION: i32 = 8;

/// Size of the header on disk in bytes
pub const HEADER_SIZE: usize = 68;

/// Maximum number of triangles in a model
pub const MAX_TRIANGLES: i32 = 4096;
/// Maximum number of vertices per frame
pub const MAX_VERTICES: i32 = 2048;
/// Maximum number of texture coordinates
pub const MAX_TEX_COORDS: i32 = 2048;
/// Maximum number of frames
pub const MAX_FRAMES: i32 = 512;
/// Maximum number of skins
pub const MAX_SKINS: i32 = 32;

/// Size of a skin record (fixed 64-byte name)
pub const SKIN_RECORD_SIZE: i64 = 64;
/// Size of a texture coordinate record
pub const TEX_COORD_RECORD_SIZE: i64 = 4;
/// Size of a triangle record
pub const TRIANGLE_RECORD_SIZE: i64 = 12;
/// Size of a packed vertex record
pub const VERTEX_RECORD_SIZE: i64 = 4;
/// Size of a frame header (scale, translate, name) before its vertices
pub const FRAME_HEADER_SIZE: i64 = 40;
/// Size of a GL command word
pub const GL_COMMAND_SIZE: i64 = 4;

/// MD2 model header
/// Based on: <http://tfc.duke.free.fr/coding/md2-specs-en.html>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Md2Header {
    /// Magic ident, "IDP2" read as a little-endian integer
    pub ident: i32,
    /// Format version (always 8)
    pub version: i32,
    /// Skin width in pixels
    pub skin_width: i32,
    /// Skin height in pixels
    pub skin_height: i32,
    /// Size of one frame record in bytes
    pub frame_size: i32,
    pub num_skins: i32,
    pub num_vertices: i32,
    pub num_tex_coords: i32,
    pub num_triangles: i32,
    pub num_gl_commands: i32,
    pub num_frames: i32,
    pub offset_skins: i32,
    pub offset_tex_coords: i32,
    pub offset_triangles: i32,
    pub offset_frames: i32,
    pub offset_gl_commands: i32,
    /// Offset of the end of the file
    pub offset_end: i32,
}

impl Md2Header {
    /// Decode the 68-byte header from a reader
    ///
    /// This only decodes the fields; call [`Md2Header::validate`] before
    /// trusting any of them.
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut fields = [0i32; 17];
        reader
            .read_i32_into::<LittleEndian>(&mut fields)
            .map_err(Md2Error::reading("header"))?;

        let [
            ident,
            version,
            skin_width,
            skin_height,
            frame_size,
            num_skins,
            num_vertices,
            num_tex_coords,
            num_triangles,
            num_gl_commands,
            num_frames,
            offset_skins,
            offset_tex_coords,
            offset_triangles,
            offset_frames,
            offset_gl_commands,
            offset_end,
        ] = fields;

        Ok(Self {
            ident,
            version,
            skin_width,
            skin_height,
            frame_size,
            num_skins,
            num_vertices,
            num_tex_coords,
            num_triangles,
            num_gl_commands,
            num_frames,
            offset_skins,
            offset_tex_coords,
            offset_triangles,
            offset_frames,
            offset_gl_commands,
            offset_end,
        })
    }

    /// The header ident as raw bytes
    pub fn ident_bytes(&self) -> [u8; 4] {
        self.ident.to_le_bytes()
    }

    /// Minimum frame record size needed for the declared vertex count
    pub fn required_frame_size(&self) -> i64 {
        FRAME_HEADER_SIZE + i64::from(self.num_vertices) * VERTEX_RECORD_SIZE
    }

    /// Validate magic, counts and section layout
    ///
    /// `stream_len` is the number of bytes available from the start of the
    /// header to the end of the stream.
    pub fn validate(&self, stream_len: u64) -> Result<()> {
        self.validate_magic()?;
        self.validate_counts()?;
        self.validate_layout(stream_len)
    }

    fn validate_magic(&self) -> Result<()> {
        if self.ident_bytes() != MD2_IDENT {
            return Err(Md2Error::InvalidMagic {
                expected: String::from_utf8_lossy(&MD2_IDENT).to_string(),
                actual: String::from_utf8_lossy(&self.ident_bytes()).to_string(),
            });
        }

        if self.version != MD2_VERSION {
            return Err(Md2Error::UnsupportedVersion {
                expected: MD2_VERSION,
                actual: self.version,
            });
        }

        Ok(())
    }

    fn validate_counts(&self) -> Result<()> {
        let limits = [
            ("skins", self.num_skins, MAX_SKINS),
            ("vertices", self.num_vertices, MAX_VERTICES),
            ("texture coordinates", self.num_tex_coords, MAX_TEX_COORDS),
            ("triangles", self.num_triangles, MAX_TRIANGLES),
            ("frames", self.num_frames, MAX_FRAMES),
        ];

        for (what, count, max) in limits {
            if count < 0 {
                return Err(Md2Error::NegativeCount { what, count });
            }
            if count > max {
                return Err(Md2Error::LimitExceeded { what, count, max });
            }
        }

        // Not bounded by the format, but never allowed to be negative
        if self.num_gl_commands < 0 {
            return Err(Md2Error::NegativeCount {
                what: "GL commands",
                count: self.num_gl_commands,
            });
        }

        if self.num_frames == 0 {
            return Err(Md2Error::NoFrames);
        }

        if i64::from(self.frame_size) < self.required_frame_size() {
            return Err(Md2Error::InvalidFrameSize {
                frame_size: self.frame_size,
                required: self.required_frame_size(),
            });
        }

        if self.num_triangles > 0 && (self.skin_width <= 0 || self.skin_height <= 0) {
            return Err(Md2Error::InvalidSkinDimensions {
                width: self.skin_width,
                height: self.skin_height,
            });
        }

        Ok(())
    }

    fn validate_layout(&self, stream_len: u64) -> Result<()> {
        let sections = [
            ("skins", self.offset_skins, self.num_skins, SKIN_RECORD_SIZE),
            (
                "texture coordinates",
                self.offset_tex_coords,
                self.num_tex_coords,
                TEX_COORD_RECORD_SIZE,
            ),
            (
                "triangles",
                self.offset_triangles,
                self.num_triangles,
                TRIANGLE_RECORD_SIZE,
            ),
            (
                "frames",
                self.offset_frames,
                self.num_frames,
                i64::from(self.frame_size),
            ),
            (
                "GL commands",
                self.offset_gl_commands,
                self.num_gl_commands,
                GL_COMMAND_SIZE,
            ),
        ];

        for (section, offset, count, record_size) in sections {
            let size = i64::from(count) * record_size;
            if size == 0 {
                continue;
            }
            check_range(section, i64::from(offset), size, stream_len)?;
        }

        check_range("end", i64::from(self.offset_end), 0, stream_len)
    }
}

fn check_range(section: &'static str, offset: i64, size: i64, stream_len: u64) -> Result<()> {
    let end = offset.checked_add(size);
    let in_bounds = offset >= 0
        && end.is_some_and(|end| u64::try_from(end).is_ok_and(|end| end <= stream_len));

    if in_bounds {
        Ok(())
    } else {
        Err(Md2Error::SectionOutOfBounds {
            section,
            offset,
            size,
            stream_len,
        })
    }
}
