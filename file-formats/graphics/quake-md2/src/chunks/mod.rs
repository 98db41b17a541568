//! Fixed-size MD2 records
//!
//! Every record is decoded field by field with explicit little-endian reads;
//! nothing here reinterprets raw bytes as a native struct.

pub mod frame;
pub mod skin;
pub mod tex_coord;
pub mod triangle;

pub use frame::{Md2Frame, Md2Vertex};
pub use skin::Md2Skin;
pub use tex_coord::Md2TexCoord;
pub use triangle::Md2Triangle;
