//! Synthetic file builders shared by the decoder tests.

use crate::ccb::header::Precision;
use crate::io::{ByteWriter, Endian};
use crate::objects::class_id::CLASS_ID_64_BIT_VERSION;

pub fn write_file_header(writer: &mut ByteWriter, flags: u8, version: u32) {
    writer.write_bytes(b"CCB");
    writer.write_u8(b'0' + flags);
    writer.write_u32(Endian::Little, version);
}

pub fn write_class_id(writer: &mut ByteWriter, version: u32, bits: u64) {
    if version < CLASS_ID_64_BIT_VERSION {
        writer.write_u32(Endian::Little, bits as u32);
    } else {
        writer.write_u64(Endian::Little, bits);
    }
}

/// Object header plus display flags, with empty metadata.
pub fn write_group_fields(writer: &mut ByteWriter, version: u32, unique_id: u32, name: &str) {
    writer.write_u32(Endian::Little, unique_id);
    if version < 22 {
        writer.write_fixed_text(name, 256);
    } else {
        writer.write_qtext(Some(name));
    }
    writer.write_u32(Endian::Little, 0);
    if version >= 30 {
        writer.write_u32(Endian::Little, 0);
    }
    writer.write_bytes(&[1, 0, 1, 0, 1, 0, 0]);
    if version >= 24 {
        writer.write_bool(false);
    }
}

/// Selection behavior and transformation history.
pub fn write_trailer(writer: &mut ByteWriter, version: u32) {
    if version >= 23 {
        writer.write_i32(Endian::Little, 0);
    }
    if version >= 45 {
        for i in 0..16 {
            let identity = if i % 5 == 0 { 1.0 } else { 0.0 };
            writer.write_f32(Endian::Little, identity);
        }
    }
}

#[derive(Debug, Clone)]
pub struct CloudFixture {
    pub shift: (f64, f64, f64),
    pub scale: f64,
    pub visibility: Option<Vec<u8>>,
    pub point_size: u8,
    pub points: Vec<(f64, f64, f64)>,
}

impl Default for CloudFixture {
    fn default() -> Self {
        Self {
            shift: (0.0, 0.0, 0.0),
            scale: 1.0,
            visibility: None,
            point_size: 0,
            points: Vec::new(),
        }
    }
}

pub fn write_point_cloud_body(
    writer: &mut ByteWriter,
    version: u32,
    precision: Precision,
    fixture: &CloudFixture,
) {
    writer.write_vec3d(fixture.shift);
    if version >= 33 {
        writer.write_f64(Endian::Little, fixture.scale);
    }
    match &fixture.visibility {
        Some(table) => {
            writer.write_bool(true);
            writer.write_u8(1).write_u32(Endian::Little, table.len() as u32);
            writer.write_bytes(table);
        }
        None => {
            writer.write_bool(false);
        }
    }
    if version >= 24 {
        writer.write_u8(fixture.point_size);
    }
    writer
        .write_u8(3)
        .write_u32(Endian::Little, fixture.points.len() as u32);
    for point in &fixture.points {
        match precision {
            Precision::Float => {
                writer.write_f32(Endian::Little, point.0 as f32);
                writer.write_f32(Endian::Little, point.1 as f32);
                writer.write_f32(Endian::Little, point.2 as f32);
            }
            Precision::Double => {
                writer.write_vec3d(*point);
            }
        }
    }
    // colors, normals, scalar field count
    writer.write_bool(false).write_bool(false);
    writer.write_u32(Endian::Little, 0);
    writer.write_bool(false).write_i32(Endian::Little, -1);
    if version >= 41 {
        writer.write_u32(Endian::Little, 0);
    }
    if version >= 44 {
        writer.write_bool(false);
    }
}

#[derive(Debug, Clone, Default)]
pub struct LabelFixture {
    /// (cloud id, point index)
    pub refs: Vec<(u32, u32)>,
    pub mesh_id: u32,
    pub center_points: Vec<bool>,
    pub screen_pos: (f32, f32),
    pub show_full_body: bool,
    pub display_in_2d: bool,
    pub display_points_legend: bool,
}

pub fn write_label_body(writer: &mut ByteWriter, version: u32, fixture: &LabelFixture) {
    writer.write_u32(Endian::Little, fixture.refs.len() as u32);
    for (i, (cloud_id, point_index)) in fixture.refs.iter().enumerate() {
        writer.write_u32(Endian::Little, *point_index);
        writer.write_u32(Endian::Little, *cloud_id);
        if version >= 49 {
            writer.write_u32(Endian::Little, fixture.mesh_id);
            writer.write_f64(Endian::Little, 0.5).write_f64(Endian::Little, 0.5);
        }
        if version >= 50 {
            writer.write_bool(fixture.center_points.get(i).copied().unwrap_or(false));
        }
    }
    writer.write_f32(Endian::Little, fixture.screen_pos.0);
    writer.write_f32(Endian::Little, fixture.screen_pos.1);
    writer.write_bool(fixture.show_full_body);
    if version > 20 {
        writer.write_bool(fixture.display_in_2d);
        writer.write_bool(fixture.display_points_legend);
    }
}
