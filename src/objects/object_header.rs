use crate::core::result::Result;
use crate::io::{ByteReader, Endian};
use crate::objects::metadata::{read_metadata, Metadata};
use crate::objects::DecodeContext;

/// Names were a fixed 256 byte buffer before this version.
const QTEXT_NAME_VERSION: u32 = 22;
const LEGACY_NAME_LEN: usize = 256;
const METADATA_VERSION: u32 = 30;

/// Fields shared by every serialized object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectHeader {
    pub unique_id: u32,
    pub name: Option<String>,
    pub flags: u32,
    pub metadata: Metadata,
}

pub fn read_object_header(
    reader: &mut ByteReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<ObjectHeader> {
    let unique_id = reader.read_u32(Endian::Little)?;
    let name = if ctx.version < QTEXT_NAME_VERSION {
        Some(reader.read_fixed_text(LEGACY_NAME_LEN)?)
    } else {
        reader.read_qtext()?
    };
    let flags = reader.read_u32(Endian::Little)?;
    let metadata = if ctx.version >= METADATA_VERSION {
        read_metadata(reader, ctx)?
    } else {
        Metadata::new()
    };

    Ok(ObjectHeader {
        unique_id,
        name,
        flags,
        metadata,
    })
}
