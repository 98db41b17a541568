//! Synthetic MD2 streams for integration tests
#![allow(dead_code)]

use quake_md2::header::{HEADER_SIZE, MD2_IDENT, MD2_VERSION};

/// Header field positions, in file order
pub mod field {
    pub const IDENT: usize = 0;
    pub const VERSION: usize = 1;
    pub const SKIN_WIDTH: usize = 2;
    pub const FRAME_SIZE: usize = 4;
    pub const NUM_SKINS: usize = 5;
    pub const NUM_VERTICES: usize = 6;
    pub const NUM_TEX_COORDS: usize = 7;
    pub const NUM_TRIANGLES: usize = 8;
    pub const NUM_FRAMES: usize = 10;
    pub const OFFSET_TRIANGLES: usize = 13;
}

#[derive(Debug, Clone)]
pub struct TestFrame {
    pub name: String,
    pub scale: [f32; 3],
    pub translate: [f32; 3],
    pub vertices: Vec<[u8; 3]>,
}

/// Builder for well-formed MD2 byte streams
#[derive(Debug, Clone)]
pub struct Md2Builder {
    pub skin_width: i32,
    pub skin_height: i32,
    pub skins: Vec<String>,
    pub tex_coords: Vec<(i16, i16)>,
    pub triangles: Vec<([u16; 3], [u16; 3])>,
    pub frames: Vec<TestFrame>,
}

impl Md2Builder {
    pub fn new() -> Self {
        Self {
            skin_width: 64,
            skin_height: 64,
            skins: Vec::new(),
            tex_coords: Vec::new(),
            triangles: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// A quad (two triangles over four vertices) animated over the given frames
    ///
    /// Frame `i` is translated by `i` along the native X axis.
    pub fn quad(frame_names: &[&str]) -> Self {
        let mut builder = Self::new();
        builder.tex_coords = vec![(0, 0), (64, 0), (64, 64), (0, 64)];
        builder.triangles = vec![([0, 1, 2], [0, 1, 2]), ([0, 2, 3], [0, 2, 3])];
        for (i, name) in frame_names.iter().enumerate() {
            builder.frames.push(TestFrame {
                name: name.to_string(),
                scale: [1.0, 1.0, 1.0],
                translate: [i as f32, 0.0, 0.0],
                vertices: vec![[0, 0, 0], [10, 0, 0], [10, 10, 0], [0, 10, 20]],
            });
        }
        builder
    }

    pub fn skin(mut self, name: &str) -> Self {
        self.skins.push(name.to_string());
        self
    }

    fn num_vertices(&self) -> usize {
        self.frames.first().map_or(0, |f| f.vertices.len())
    }

    pub fn frame_size(&self) -> usize {
        40 + 4 * self.num_vertices()
    }

    pub fn build(&self) -> Vec<u8> {
        let offset_skins = HEADER_SIZE;
        let offset_tex_coords = offset_skins + 64 * self.skins.len();
        let offset_triangles = offset_tex_coords + 4 * self.tex_coords.len();
        let offset_frames = offset_triangles + 12 * self.triangles.len();
        let offset_end = offset_frames + self.frame_size() * self.frames.len();

        let header = [
            i32::from_le_bytes(MD2_IDENT),
            MD2_VERSION,
            self.skin_width,
            self.skin_height,
            self.frame_size() as i32,
            self.skins.len() as i32,
            self.num_vertices() as i32,
            self.tex_coords.len() as i32,
            self.triangles.len() as i32,
            0,
            self.frames.len() as i32,
            offset_skins as i32,
            offset_tex_coords as i32,
            offset_triangles as i32,
            offset_frames as i32,
            offset_end as i32,
            offset_end as i32,
        ];

        let mut data = Vec::with_capacity(offset_end);
        for value in header {
            data.extend_from_slice(&value.to_le_bytes());
        }
        for skin in &self.skins {
            let mut fixed = [0u8; 64];
            fixed[..skin.len()].copy_from_slice(skin.as_bytes());
            data.extend_from_slice(&fixed);
        }
        for (s, t) in &self.tex_coords {
            data.extend_from_slice(&s.to_le_bytes());
            data.extend_from_slice(&t.to_le_bytes());
        }
        for (vertex, st) in &self.triangles {
            for index in vertex.iter().chain(st) {
                data.extend_from_slice(&index.to_le_bytes());
            }
        }
        for frame in &self.frames {
            for value in frame.scale.iter().chain(&frame.translate) {
                data.extend_from_slice(&value.to_le_bytes());
            }
            let mut name = [0u8; 16];
            name[..frame.name.len()].copy_from_slice(frame.name.as_bytes());
            data.extend_from_slice(&name);
            for v in &frame.vertices {
                data.extend_from_slice(v);
                data.push(0);
            }
        }

        assert_eq!(data.len(), offset_end);
        data
    }
}

/// Route library log output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Overwrite one 32-bit header field
pub fn set_header_field(data: &mut [u8], field: usize, value: i32) {
    data[field * 4..field * 4 + 4].copy_from_slice(&value.to_le_bytes());
}
