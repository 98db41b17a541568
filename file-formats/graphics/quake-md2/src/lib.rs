//! Decoder and keyframe playback engine for Quake II MD2 models.
//!
//! An MD2 file stores a triangle mesh as a sequence of whole-mesh keyframes.
//! This crate validates and decodes the binary layout, flattens the indexed
//! triangles into per-corner vertex streams ready for non-indexed drawing,
//! groups frames into named animations and blends between keyframes as time
//! advances.
//!
//! # Examples
//!
//! ```no_run
//! use quake_md2::{DirectoryArchive, Md2Model, ParseOptions};
//!
//! let archive = DirectoryArchive::new("baseq2");
//! let mut model =
//!     Md2Model::load_from_archive(&archive, "models/monsters/tank/tris.md2", &ParseOptions::default())?;
//!
//! model.set_animation("run")?;
//! model.set_frames_per_second(10.0);
//!
//! // once per tick
//! model.update(1.0 / 60.0);
//! let positions = model.current_interpolated_vertices();
//! let uvs = model.texcoords();
//! assert_eq!(positions.len(), uvs.len());
//! # Ok::<(), quake_md2::Md2Error>(())
//! ```

pub mod animation;
pub mod archive;
pub mod chunks;
pub mod common;
pub mod coordinate;
pub mod error;
pub mod geometry;
pub mod header;
pub mod mesh;
pub mod model;
pub mod options;
pub mod skin_resolver;

// Re-export common types
pub use animation::{Animation, AnimationId, AnimationPlayer, PlaybackState};
pub use archive::{DirectoryArchive, ModelArchive};
pub use coordinate::CoordinateSystem;
pub use error::{Md2Error, Result};
pub use geometry::KeyFrame;
pub use header::Md2Header;
pub use mesh::Md2Mesh;
pub use model::Md2Model;
pub use options::ParseOptions;
pub use skin_resolver::{SkinRef, SkinResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
