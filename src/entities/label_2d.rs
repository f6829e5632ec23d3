use log::info;

use crate::core::error::{BinError, ErrorKind};
use crate::core::result::Result;
use crate::io::{ByteReader, Endian};
use crate::objects::{DecodeContext, ObjectHeader};

const DISPLAY_FLAGS_VERSION: u32 = 21;
const MESH_PICK_VERSION: u32 = 49;
const CENTER_POINT_VERSION: u32 = 50;

/// A picked point: index into the point cloud whose unique id is `cloud_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRef {
    pub cloud_id: u32,
    pub point_index: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Label2d {
    pub points: Vec<PointRef>,
    pub entity_center_point: bool,
    pub screen_pos: (f32, f32),
    pub show_full_body: bool,
    pub display_in_2d: bool,
    pub display_points_legend: bool,
}

pub fn decode_label_2d(
    reader: &mut ByteReader<'_>,
    ctx: &DecodeContext<'_>,
    header: &ObjectHeader,
) -> Result<Label2d> {
    let count_pos = reader.tell();
    let count = reader.read_u32(Endian::Little)?;
    // index + cloud id, at the least
    if count as u64 * 8 > reader.remaining() as u64 {
        return Err(BinError::new(
            ErrorKind::UnexpectedEof,
            format!("label declares {count} points"),
        )
        .with_offset(count_pos));
    }

    let mut label = Label2d::default();
    for _ in 0..count {
        let point_index = reader.read_u32(Endian::Little)?;
        let cloud_id = reader.read_u32(Endian::Little)?;
        if cloud_id != 0 {
            label.points.push(PointRef {
                cloud_id,
                point_index,
            });
        }

        if ctx.version >= MESH_PICK_VERSION {
            let mesh_id = reader.read_u32(Endian::Little)?;
            let _uv = reader.read_vec2d()?;
            if mesh_id != 0 {
                info!(
                    "label {:?} references mesh {mesh_id}, ignoring",
                    header.name.as_deref().unwrap_or("")
                );
            }
        }
        // Stored per point; the last one wins.
        if ctx.version >= CENTER_POINT_VERSION {
            label.entity_center_point = reader.read_bool()?;
        }
    }

    label.screen_pos = (
        reader.read_f32(Endian::Little)?,
        reader.read_f32(Endian::Little)?,
    );
    label.show_full_body = reader.read_bool()?;
    if ctx.version >= DISPLAY_FLAGS_VERSION {
        label.display_in_2d = reader.read_bool()?;
        label.display_points_legend = reader.read_bool()?;
    }
    Ok(label)
}
