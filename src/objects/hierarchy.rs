use log::{debug, info, warn};

use crate::core::error::{BinError, ErrorKind};
use crate::core::result::Result;
use crate::entities::{decode_label_2d, decode_point_cloud};
use crate::io::{ByteReader, Endian};
use crate::objects::class_id::{self, read_raw_class_id, repair_legacy_custom_bit};
use crate::objects::entity::{DisplayState, Entity, EntityBody, SelectionBehavior};
use crate::objects::factory::{entity_kind, EntityKind};
use crate::objects::object_header::{read_object_header, ObjectHeader};
use crate::objects::{ClassId, DecodeContext};

const SELECTION_VERSION: u32 = 23;
const SHOW_NAME_VERSION: u32 = 24;
const TRANSFORM_HISTORY_VERSION: u32 = 45;
/// 4x4 float matrix.
const TRANSFORM_HISTORY_LEN: usize = 16 * 4;

/// Everything an object stores before its children list.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeFields {
    pub header: ObjectHeader,
    pub display: DisplayState,
    pub body: EntityBody,
}

pub fn read_display_state(
    reader: &mut ByteReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<DisplayState> {
    let mut display = DisplayState {
        visible: reader.read_bool()?,
        locked_visibility: reader.read_bool()?,
        colors_shown: reader.read_bool()?,
        normals_shown: reader.read_bool()?,
        sf_shown: reader.read_bool()?,
        ..DisplayState::default()
    };

    let pos = reader.tell();
    display.color_overridden = reader.read_bool()?;
    if display.color_overridden {
        return Err(BinError::unsupported("temporary color override").with_offset(pos));
    }
    let pos = reader.tell();
    display.gl_trans_enabled = reader.read_bool()?;
    if display.gl_trans_enabled {
        return Err(BinError::unsupported("GL transformation").with_offset(pos));
    }
    if ctx.version >= SHOW_NAME_VERSION {
        display.show_name_in_3d = reader.read_bool()?;
    }
    Ok(display)
}

/// Decodes an object's own fields, stopping before the children count.
pub fn decode_node_fields(
    reader: &mut ByteReader<'_>,
    ctx: &DecodeContext<'_>,
    kind: EntityKind,
) -> Result<NodeFields> {
    if let EntityKind::Unsupported(class_id) = kind {
        return Err(unsupported_body(class_id).with_offset(reader.tell()));
    }

    let header = read_object_header(reader, ctx)?;
    let display = read_display_state(reader, ctx)?;
    let body = match kind {
        EntityKind::Group => EntityBody::Group,
        EntityKind::PointCloud => EntityBody::PointCloud(decode_point_cloud(reader, ctx)?),
        EntityKind::Label2d => EntityBody::Label2d(decode_label_2d(reader, ctx, &header)?),
        EntityKind::Unsupported(class_id) => return Err(unsupported_body(class_id)),
    };
    Ok(NodeFields {
        header,
        display,
        body,
    })
}

/// Decodes an object and, recursively, all of its children.
pub fn decode_entity(
    reader: &mut ByteReader<'_>,
    ctx: &DecodeContext<'_>,
    class_id: ClassId,
    kind: EntityKind,
    depth: u32,
) -> Result<Entity> {
    if depth > ctx.config.max_depth {
        return Err(BinError::new(
            ErrorKind::LimitExceeded,
            format!("object nesting exceeds depth {}", ctx.config.max_depth),
        )
        .with_offset(reader.tell()));
    }

    let fields = decode_node_fields(reader, ctx, kind)?;
    let mut entity = Entity {
        class_id,
        header: fields.header,
        display: fields.display,
        selection: SelectionBehavior::default(),
        body: fields.body,
        children: Vec::new(),
    };

    // Some producers end the file without the last object's children count.
    if let Some(children) = decode_children(reader, ctx, depth)? {
        entity.children = children;
        if ctx.version >= SELECTION_VERSION {
            entity.selection = read_selection_behavior(reader)?;
        }
        if ctx.version >= TRANSFORM_HISTORY_VERSION {
            reader.read_bytes(TRANSFORM_HISTORY_LEN)?;
        }
    }
    debug!(
        "decoded {} id={} name={:?} depth={} children={}",
        class_id,
        entity.header.unique_id,
        entity.header.name,
        depth,
        entity.children.len()
    );
    Ok(entity)
}

/// Returns `None` when the input ends exactly where the children count
/// should be. A partial count is still an error.
fn decode_children(
    reader: &mut ByteReader<'_>,
    ctx: &DecodeContext<'_>,
    depth: u32,
) -> Result<Option<Vec<Entity>>> {
    let count_pos = reader.tell();
    if reader.is_empty() {
        info!("input ends at offset {count_pos}, assuming no children");
        return Ok(None);
    }
    let count = reader.read_u32(Endian::Little)?;
    if count > ctx.config.max_children {
        return Err(BinError::new(
            ErrorKind::LimitExceeded,
            format!(
                "children count {count} exceeds limit {}",
                ctx.config.max_children
            ),
        )
        .with_offset(count_pos));
    }

    let mut children = Vec::with_capacity(count.min(1024) as usize);
    for _ in 0..count {
        let child_pos = reader.tell();
        let raw = read_raw_class_id(reader, ctx.version)?;
        if raw == 0 {
            return Err(BinError::new(
                ErrorKind::InvalidConstruction,
                "child object has the OBJECT class id",
            )
            .with_offset(child_pos));
        }
        let repaired = repair_legacy_custom_bit(raw, ctx.version);
        if repaired != raw {
            warn!("masking legacy custom bit in class id {raw:#x}");
        }
        let class_id = class_id::lookup(repaired).map_err(|err| err.with_offset(child_pos))?;
        let kind = entity_kind(class_id).map_err(|err| err.with_offset(child_pos))?;
        if class_id.is_custom_hierarchical() {
            return Err(BinError::unsupported(format!(
                "plugin-defined child object {class_id}"
            ))
            .with_offset(child_pos));
        }
        children.push(decode_entity(reader, ctx, class_id, kind, depth + 1)?);
    }
    Ok(Some(children))
}

fn unsupported_body(class_id: ClassId) -> BinError {
    BinError::unsupported(format!("{class_id} objects are not decoded"))
}

fn read_selection_behavior(reader: &mut ByteReader<'_>) -> Result<SelectionBehavior> {
    let pos = reader.tell();
    let ordinal = reader.read_i32(Endian::Little)?;
    SelectionBehavior::from_ordinal(ordinal).ok_or_else(|| {
        BinError::new(
            ErrorKind::BadEnum,
            format!("selection behavior {ordinal} out of range"),
        )
        .with_offset(pos)
    })
}
