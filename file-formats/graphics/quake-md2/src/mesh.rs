//! Decoded, immutable MD2 geometry
//!
//! [`Md2Mesh::parse`] reads the header, validates it, and only then reads the
//! sections in dependency order: skins, triangles, texture coordinates and
//! frames. Each section is read from `base + offset`, where `base` is the
//! stream position at which the header starts.

use glam::{Vec2, Vec3};
use log::{debug, trace};
use std::io::{Read, Seek, SeekFrom};

use crate::animation::{Animation, AnimationSet, segment_animations};
use crate::chunks::{Md2Frame, Md2Skin, Md2TexCoord, Md2Triangle};
use crate::coordinate::CoordinateSystem;
use crate::error::{Md2Error, Result};
use crate::geometry::{KeyFrame, scale_tex_coords, unpack_key_frame};
use crate::header::Md2Header;
use crate::options::ParseOptions;

/// Per-frame metadata kept after decoding
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameInfo {
    pub name: String,
    pub scale: Vec3,
    pub translate: Vec3,
}

/// Geometry and animation table decoded from an MD2 stream
#[derive(Debug, Clone)]
pub struct Md2Mesh {
    header: Md2Header,
    skins: Vec<Md2Skin>,
    triangles: Vec<Md2Triangle>,
    raw_tex_coords: Vec<Md2TexCoord>,
    frames: Vec<FrameInfo>,
    key_frames: Vec<KeyFrame>,
    tex_coords: Vec<Vec2>,
    animations: AnimationSet,
    coordinate_system: CoordinateSystem,
}

impl Md2Mesh {
    /// Decode a complete model from a reader
    ///
    /// Either the whole model is decoded or an error is returned; the reader
    /// position afterwards is unspecified.
    pub fn parse<R: Read + Seek>(reader: &mut R, options: &ParseOptions) -> Result<Self> {
        let base = reader.stream_position()?;
        let stream_end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(base))?;

        let header = Md2Header::parse(reader)?;
        header.validate(stream_end.saturating_sub(base))?;

        debug!(
            "MD2 header: {} skins, {} vertices, {} texcoords, {} triangles, {} frames",
            header.num_skins,
            header.num_vertices,
            header.num_tex_coords,
            header.num_triangles,
            header.num_frames
        );

        let num_vertices = count(header.num_vertices);
        let num_tex_coords = count(header.num_tex_coords);

        seek_section(reader, base, header.offset_skins)?;
        let skins = (0..count(header.num_skins))
            .map(|_| Md2Skin::parse(reader))
            .collect::<Result<Vec<_>>>()?;

        seek_section(reader, base, header.offset_triangles)?;
        let triangles = (0..count(header.num_triangles))
            .map(|_| Md2Triangle::parse(reader))
            .collect::<Result<Vec<_>>>()?;
        for (index, tri) in triangles.iter().enumerate() {
            tri.validate_indices(index, num_vertices, num_tex_coords)?;
        }

        seek_section(reader, base, header.offset_tex_coords)?;
        let raw_tex_coords = (0..num_tex_coords)
            .map(|_| Md2TexCoord::parse(reader))
            .collect::<Result<Vec<_>>>()?;

        let tex_coords = scale_tex_coords(
            &raw_tex_coords,
            &triangles,
            header.skin_width,
            header.skin_height,
        );

        let num_frames = count(header.num_frames);
        let frame_size = u64::from(header.frame_size.unsigned_abs());
        let mut frames = Vec::with_capacity(num_frames);
        let mut key_frames = Vec::with_capacity(num_frames);

        for index in 0..num_frames {
            let offset = section_start(base, header.offset_frames) + index as u64 * frame_size;
            reader.seek(SeekFrom::Start(offset))?;

            let frame = Md2Frame::parse(reader, num_vertices)?;
            trace!("Frame {index}: '{}'", frame.name);

            key_frames.push(unpack_key_frame(
                &frame,
                &triangles,
                options.coordinate_system,
            ));
            frames.push(FrameInfo {
                name: frame.name,
                scale: frame.scale,
                translate: frame.translate,
            });
        }

        let animations = segment_animations(frames.iter().map(|f| f.name.as_str()));
        debug!(
            "Decoded {} keyframes of {} vertices in {} animations",
            key_frames.len(),
            triangles.len() * 3,
            animations.len()
        );

        Ok(Self {
            header,
            skins,
            triangles,
            raw_tex_coords,
            frames,
            key_frames,
            tex_coords,
            animations,
            coordinate_system: options.coordinate_system,
        })
    }

    pub fn header(&self) -> &Md2Header {
        &self.header
    }

    /// Skin names as stored in the file
    pub fn skins(&self) -> &[Md2Skin] {
        &self.skins
    }

    pub fn triangles(&self) -> &[Md2Triangle] {
        &self.triangles
    }

    /// Texture coordinates in skin pixel space, as stored in the file
    pub fn raw_tex_coords(&self) -> &[Md2TexCoord] {
        &self.raw_tex_coords
    }

    pub fn frames(&self) -> &[FrameInfo] {
        &self.frames
    }

    pub fn key_frames(&self) -> &[KeyFrame] {
        &self.key_frames
    }

    /// Normalized texture coordinates, one per triangle corner
    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    pub fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    pub fn animation_index(&self, name: &str) -> Option<usize> {
        self.animations.index_of(name)
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    /// Number of entries in every keyframe and in the texture coordinates
    pub fn corner_count(&self) -> usize {
        self.triangles.len() * 3
    }

    pub(crate) fn animation_mut(&mut self, index: usize) -> Option<&mut Animation> {
        self.animations.get_mut(index)
    }
}

/// Convert a validated, non-negative header count
fn count(value: i32) -> usize {
    usize::try_from(value).unwrap_or_default()
}

fn section_start(base: u64, offset: i32) -> u64 {
    base + u64::from(offset.unsigned_abs())
}

fn seek_section<R: Seek>(reader: &mut R, base: u64, offset: i32) -> Result<()> {
    reader
        .seek(SeekFrom::Start(section_start(base, offset)))
        .map_err(Md2Error::Io)?;
    Ok(())
}
