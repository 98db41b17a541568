//! Integration tests for MD2 decoding

mod common;

use std::io::{Cursor, Read, Seek, SeekFrom};

use common::{Md2Builder, TestFrame, field, init_logging, set_header_field};
use glam::{Vec2, Vec3};
use pretty_assertions::assert_eq;
use quake_md2::header::{MAX_FRAMES, MAX_SKINS, MAX_TEX_COORDS, MAX_TRIANGLES, MAX_VERTICES};
use quake_md2::{CoordinateSystem, Md2Error, Md2Header, Md2Mesh, Md2Model, ParseOptions};
use test_case::test_case;

fn load(data: Vec<u8>) -> quake_md2::Result<Md2Model> {
    init_logging();
    Md2Model::load(&mut Cursor::new(data))
}

#[test]
fn test_keyframe_counts() {
    let names: Vec<String> = (1..=7).map(|i| format!("walk{i}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let model = load(Md2Builder::quad(&names).build()).unwrap();

    assert_eq!(model.key_frames().len(), 7);
    for key_frame in model.key_frames() {
        assert_eq!(key_frame.vertices.len(), 2 * 3);
    }
    assert_eq!(model.texcoords().len(), 2 * 3);
    assert_eq!(model.current_interpolated_vertices().len(), 2 * 3);
}

#[test]
fn test_header_fields_decode_exactly() {
    let builder = Md2Builder::quad(&["stand1", "stand2"]).skin("models/test/skin.pcx");
    let data = builder.build();
    let header = Md2Header::parse(&mut Cursor::new(&data)).unwrap();

    assert_eq!(
        header,
        Md2Header {
            ident: i32::from_le_bytes(*b"IDP2"),
            version: 8,
            skin_width: 64,
            skin_height: 64,
            frame_size: 56,
            num_skins: 1,
            num_vertices: 4,
            num_tex_coords: 4,
            num_triangles: 2,
            num_gl_commands: 0,
            num_frames: 2,
            offset_skins: 68,
            offset_tex_coords: 132,
            offset_triangles: 148,
            offset_frames: 172,
            offset_gl_commands: 284,
            offset_end: 284,
        }
    );

    let model = load(data).unwrap();
    assert_eq!(model.header(), &header);
}

#[test]
fn test_tex_coords_are_deterministic() {
    let data = Md2Builder::quad(&["stand1", "stand2"]).build();
    let first = load(data.clone()).unwrap();
    let second = load(data).unwrap();

    assert_eq!(first.texcoords(), second.texcoords());
    assert_eq!(
        first.texcoords(),
        &[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    );
}

#[test]
fn test_corner_alignment_of_positions() {
    let options = ParseOptions::default().with_coordinate_system(CoordinateSystem::ZUp);
    let data = Md2Builder::quad(&["stand1"]).build();
    let mesh = Md2Mesh::parse(&mut Cursor::new(data), &options).unwrap();

    let positions = &mesh.key_frames()[0].vertices;
    assert_eq!(positions[0], Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(positions[1], Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(positions[2], Vec3::new(10.0, 10.0, 0.0));
    assert_eq!(positions[3], positions[0]);
    assert_eq!(positions[4], positions[2]);
    assert_eq!(positions[5], Vec3::new(0.0, 10.0, 20.0));
}

#[test]
fn test_default_axes_are_y_up() {
    let model = load(Md2Builder::quad(&["stand1"]).build()).unwrap();
    // native (0, 10, 20): depth 10, height 20
    assert_eq!(model.key_frames()[0].vertices[5], Vec3::new(0.0, 20.0, 10.0));
}

#[test]
fn test_frame_metadata_and_animations() {
    let model = load(Md2Builder::quad(&["stand1", "stand2", "run1", "run2", "run3"]).build())
        .unwrap();

    let frames = model.mesh().frames();
    assert_eq!(frames[2].name, "run1");
    assert_eq!(frames[4].translate, Vec3::new(4.0, 0.0, 0.0));

    let summary: Vec<_> = model
        .animations()
        .iter()
        .map(|a| (a.name.as_str(), a.start_frame, a.end_frame, a.looping))
        .collect();
    assert_eq!(
        summary,
        vec![("stand", 0, 1, true), ("run", 2, 4, true)]
    );
}

#[test]
fn test_header_skins_without_archive() {
    let data = Md2Builder::quad(&["stand1"])
        .skin("models/monsters/tank/skin.pcx")
        .skin("models/monsters/tank/pain.pcx")
        .build();
    let model = load(data).unwrap();

    let names: Vec<_> = model.skins().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["skin", "pain"]);
    assert_eq!(model.skins()[1].path, "models/monsters/tank/pain.pcx");
}

#[test]
fn test_frame_padding_is_skipped() {
    let mut builder = Md2Builder::quad(&["a1", "a2"]);
    let frame_size = builder.frame_size() as i32 + 8;
    builder.frames.truncate(0);
    for i in 0..2u8 {
        builder.frames.push(TestFrame {
            name: format!("a{}", i + 1),
            scale: [1.0; 3],
            translate: [0.0; 3],
            vertices: vec![[i, 0, 0], [0, i, 0], [0, 0, i], [i, i, i]],
        });
    }

    // rebuild the frame section with 8 bytes of padding per frame
    let data = builder.build();
    let offset_frames = 68 + 4 * 4 + 12 * 2;
    let mut padded = data[..offset_frames].to_vec();
    for frame in data[offset_frames..].chunks(builder.frame_size()) {
        padded.extend_from_slice(frame);
        padded.extend_from_slice(&[0xEE; 8]);
    }
    set_header_field(&mut padded, field::FRAME_SIZE, frame_size);
    let end = padded.len() as i32;
    set_header_field(&mut padded, 15, end);
    set_header_field(&mut padded, 16, end);

    let options = ParseOptions::default().with_coordinate_system(CoordinateSystem::ZUp);
    let mesh = Md2Mesh::parse(&mut Cursor::new(padded), &options).unwrap();
    assert_eq!(mesh.frames()[1].name, "a2");
    assert_eq!(mesh.key_frames()[1].vertices[0], Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_wrong_ident_is_rejected() {
    let mut data = Md2Builder::quad(&["stand1"]).build();
    data[..4].copy_from_slice(b"IDPO");
    assert!(matches!(load(data), Err(Md2Error::InvalidMagic { .. })));
}

#[test]
fn test_wrong_version_is_rejected() {
    let mut data = Md2Builder::quad(&["stand1"]).build();
    set_header_field(&mut data, field::VERSION, 9);
    assert!(matches!(
        load(data),
        Err(Md2Error::UnsupportedVersion { actual: 9, .. })
    ));
}

#[test_case(field::NUM_SKINS, MAX_SKINS ; "skins")]
#[test_case(field::NUM_VERTICES, MAX_VERTICES ; "vertices")]
#[test_case(field::NUM_TEX_COORDS, MAX_TEX_COORDS ; "tex coords")]
#[test_case(field::NUM_TRIANGLES, MAX_TRIANGLES ; "triangles")]
#[test_case(field::NUM_FRAMES, MAX_FRAMES ; "frames")]
fn test_count_limits(header_field: usize, max: i32) {
    let mut data = Md2Builder::quad(&["stand1"]).build();
    set_header_field(&mut data, header_field, max + 1);

    match load(data) {
        Err(Md2Error::LimitExceeded { count, max: limit, .. }) => {
            assert_eq!(count, max + 1);
            assert_eq!(limit, max);
        }
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

/// Stream that records the furthest position ever read
struct TrackingReader {
    inner: Cursor<Vec<u8>>,
    furthest: u64,
}

impl Read for TrackingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.furthest = self.furthest.max(self.inner.position());
        Ok(n)
    }
}

impl Seek for TrackingReader {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[test]
fn test_oversized_triangle_count_rejected_before_reading_sections() {
    let mut data = Md2Builder::quad(&["stand1"]).build();
    set_header_field(&mut data, field::NUM_TRIANGLES, 100_000);

    let mut reader = TrackingReader {
        inner: Cursor::new(data),
        furthest: 0,
    };
    let result = Md2Model::load(&mut reader);

    assert!(matches!(
        result,
        Err(Md2Error::LimitExceeded {
            what: "triangles",
            ..
        })
    ));
    assert_eq!(reader.furthest, 68);
}

#[test]
fn test_out_of_range_vertex_index_is_rejected() {
    let mut builder = Md2Builder::quad(&["stand1"]);
    builder.triangles[1].0 = [0, 2, 4];
    assert!(matches!(
        load(builder.build()),
        Err(Md2Error::InvalidIndex {
            kind: "vertex",
            triangle: 1,
            index: 4,
            count: 4
        })
    ));
}

#[test]
fn test_out_of_range_tex_coord_index_is_rejected() {
    let mut builder = Md2Builder::quad(&["stand1"]);
    builder.triangles[0].1 = [9, 0, 0];
    assert!(matches!(
        load(builder.build()),
        Err(Md2Error::InvalidIndex {
            kind: "texture coordinate",
            ..
        })
    ));
}

#[test]
fn test_section_beyond_stream_is_rejected() {
    let mut data = Md2Builder::quad(&["stand1"]).build();
    set_header_field(&mut data, field::OFFSET_TRIANGLES, 10_000);
    assert!(matches!(
        load(data),
        Err(Md2Error::SectionOutOfBounds {
            section: "triangles",
            ..
        })
    ));
}

#[test]
fn test_truncated_header() {
    let data = Md2Builder::quad(&["stand1"]).build();
    assert!(matches!(
        load(data[..40].to_vec()),
        Err(Md2Error::Truncated { section: "header" })
    ));
}

#[test]
fn test_model_without_frames_is_rejected() {
    let mut data = Md2Builder::quad(&["stand1"]).build();
    set_header_field(&mut data, field::NUM_FRAMES, 0);
    assert!(matches!(load(data), Err(Md2Error::NoFrames)));
}

#[test]
fn test_zero_skin_width_is_rejected() {
    let mut data = Md2Builder::quad(&["stand1"]).build();
    set_header_field(&mut data, field::SKIN_WIDTH, 0);
    assert!(matches!(
        load(data),
        Err(Md2Error::InvalidSkinDimensions { width: 0, .. })
    ));
}

#[test]
fn test_model_without_triangles() {
    let mut builder = Md2Builder::quad(&["stand1", "stand2"]);
    builder.triangles.clear();
    builder.skin_width = 0;
    let model = load(builder.build()).unwrap();

    assert_eq!(model.key_frames().len(), 2);
    assert!(model.key_frames()[0].vertices.is_empty());
    assert!(model.texcoords().is_empty());
}

#[test]
fn test_ident_field_constant() {
    let mut data = Md2Builder::quad(&["stand1"]).build();
    set_header_field(&mut data, field::IDENT, i32::from_le_bytes(*b"IDP3"));
    assert!(matches!(load(data), Err(Md2Error::InvalidMagic { .. })));
}
