//! Loaded MD2 model: decoded geometry plus live playback state

use glam::{Vec2, Vec3};
use log::info;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::animation::{Animation, AnimationId, AnimationPlayer, PlaybackState};
use crate::archive::ModelArchive;
use crate::error::{Md2Error, Result};
use crate::geometry::KeyFrame;
use crate::header::Md2Header;
use crate::mesh::Md2Mesh;
use crate::options::ParseOptions;
use crate::skin_resolver::{SkinRef, SkinResolver, header_skins};

/// An MD2 model ready for playback
///
/// Owns its decoded geometry, skin list and player state; nothing is shared
/// between instances. Not meant for concurrent use: callers sharing a model
/// across threads must serialize access themselves.
#[derive(Debug, Clone)]
pub struct Md2Model {
    mesh: Md2Mesh,
    skins: Vec<SkinRef>,
    player: AnimationPlayer,
}

impl Md2Model {
    /// Load a model from a byte stream with default options
    pub fn load<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        Self::load_with_options(reader, &ParseOptions::default())
    }

    /// Load a model from a byte stream
    ///
    /// Skins are taken verbatim from the file.
    pub fn load_with_options<R: Read + Seek>(
        reader: &mut R,
        options: &ParseOptions,
    ) -> Result<Self> {
        let mesh = Md2Mesh::parse(reader, options)?;
        let skins = header_skins(mesh.skins());
        Ok(Self::from_mesh(mesh, skins, options))
    }

    /// Load a model through an archive
    ///
    /// For directory-backed archives the skin list is resolved against the
    /// files that actually exist next to the model.
    pub fn load_from_archive<A: ModelArchive + ?Sized>(
        archive: &A,
        path: &str,
        options: &ParseOptions,
    ) -> Result<Self> {
        let mut stream = archive.open(path)?;
        let mesh = Md2Mesh::parse(&mut stream, options)?;
        let skins = SkinResolver::new(archive).resolve(path, mesh.skins())?;

        info!(
            "Loaded '{}' from {}: {} frames, {} animations, {} skins",
            path,
            archive.base_path().display(),
            mesh.key_frames().len(),
            mesh.animations().len(),
            skins.len()
        );

        Ok(Self::from_mesh(mesh, skins, options))
    }

    /// Load a model file from disk with default options
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Md2Error::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::load(&mut BufReader::new(file))
    }

    fn from_mesh(mesh: Md2Mesh, skins: Vec<SkinRef>, options: &ParseOptions) -> Self {
        let player = AnimationPlayer::new(
            mesh.animations().as_slice(),
            mesh.key_frames(),
            options.frames_per_second,
        );
        Self {
            mesh,
            skins,
            player,
        }
    }

    pub fn header(&self) -> &Md2Header {
        self.mesh.header()
    }

    pub fn mesh(&self) -> &Md2Mesh {
        &self.mesh
    }

    pub fn skins(&self) -> &[SkinRef] {
        &self.skins
    }

    pub fn animations(&self) -> &[Animation] {
        self.mesh.animations().as_slice()
    }

    pub fn key_frames(&self) -> &[KeyFrame] {
        self.mesh.key_frames()
    }

    /// Normalized texture coordinates, one per triangle corner
    pub fn texcoords(&self) -> &[Vec2] {
        self.mesh.tex_coords()
    }

    /// Interpolated positions, one per triangle corner
    pub fn current_interpolated_vertices(&self) -> &[Vec3] {
        self.player.vertices()
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    pub fn current_animation(&self) -> Option<&Animation> {
        self.animations().get(self.player.animation_index())
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.player.state(self.mesh.animations().as_slice())
    }

    /// Select the animation to play, by index or by name
    pub fn set_animation<'a>(&mut self, id: impl Into<AnimationId<'a>>) -> Result<()> {
        let index = match id.into() {
            AnimationId::Index(index) => index,
            AnimationId::Name(name) => self
                .mesh
                .animation_index(name)
                .ok_or_else(|| Md2Error::UnknownAnimation(name.to_string()))?,
        };
        self.player
            .set_animation(index, self.mesh.animations().as_slice())
    }

    /// Override whether an animation loops
    ///
    /// Decoded animations always loop; this is the only way to change that.
    pub fn set_animation_looping(&mut self, index: usize, looping: bool) -> Result<()> {
        let count = self.animations().len();
        let anim = self
            .mesh
            .animation_mut(index)
            .ok_or(Md2Error::AnimationIndexOutOfRange { index, count })?;
        anim.looping = looping;
        Ok(())
    }

    pub fn skin_index(&self) -> usize {
        self.player.skin_index()
    }

    /// Select the skin used for rendering
    pub fn set_skin_index(&mut self, index: usize) -> Result<()> {
        self.player.set_skin_index(index, self.skins.len())
    }

    /// The selected skin, if the model has any
    pub fn current_skin(&self) -> Option<&SkinRef> {
        self.skins.get(self.player.skin_index())
    }

    pub fn frames_per_second(&self) -> f32 {
        self.player.frames_per_second()
    }

    /// Set the playback rate, clamped to `[0, 60]`
    pub fn set_frames_per_second(&mut self, frames_per_second: f32) {
        self.player.set_frames_per_second(frames_per_second);
    }

    /// Advance playback by `delta_seconds`
    pub fn update(&mut self, delta_seconds: f32) {
        self.player.update(
            delta_seconds,
            self.mesh.animations().as_slice(),
            self.mesh.key_frames(),
        );
    }
}
