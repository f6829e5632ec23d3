use std::collections::HashMap;

use crate::core::error::{BinError, ErrorKind};
use crate::core::result::Result;
use crate::io::{ByteReader, Endian};
use crate::objects::DecodeContext;

// Variant type ids, as written by the producing application's stream layer.
const TYPE_BOOL: u32 = 1;
const TYPE_INT: u32 = 2;
const TYPE_UINT: u32 = 3;
const TYPE_LONG_LONG: u32 = 4;
const TYPE_ULONG_LONG: u32 = 5;
const TYPE_DOUBLE: u32 = 6;
const TYPE_STRING: u32 = 10;
const TYPE_FLOAT: u32 = 38;

pub type Metadata = HashMap<String, MetadataValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    LongLong(i64),
    ULongLong(u64),
    Double(f64),
    String(Option<String>),
}

impl MetadataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(Some(text)) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataValue::Bool(v) => write!(f, "{v}"),
            MetadataValue::Int(v) => write!(f, "{v}"),
            MetadataValue::UInt(v) => write!(f, "{v}"),
            MetadataValue::LongLong(v) => write!(f, "{v}"),
            MetadataValue::ULongLong(v) => write!(f, "{v}"),
            MetadataValue::Double(v) => write!(f, "{v}"),
            MetadataValue::String(Some(v)) => f.write_str(v),
            MetadataValue::String(None) => f.write_str("null"),
        }
    }
}

/// Tagged value: big-endian u32 type id, one null-flag byte, then the payload.
///
/// Floats are stored in double precision by the stream layer.
pub fn read_metadata_value(reader: &mut ByteReader<'_>) -> Result<MetadataValue> {
    let start = reader.tell();
    let type_id = reader.read_u32(Endian::Big)?;
    let _is_null = reader.read_bool()?;
    let value = match type_id {
        TYPE_BOOL => MetadataValue::Bool(reader.read_bool()?),
        TYPE_INT => MetadataValue::Int(reader.read_i32(Endian::Big)?),
        TYPE_UINT => MetadataValue::UInt(reader.read_u32(Endian::Big)?),
        TYPE_LONG_LONG => MetadataValue::LongLong(reader.read_i64(Endian::Big)?),
        TYPE_ULONG_LONG => MetadataValue::ULongLong(reader.read_u64(Endian::Big)?),
        TYPE_DOUBLE | TYPE_FLOAT => MetadataValue::Double(reader.read_f64(Endian::Big)?),
        TYPE_STRING => MetadataValue::String(reader.read_qtext()?),
        other => {
            return Err(BinError::unsupported(format!(
                "metadata value of type {other} is not decoded"
            ))
            .with_offset(start))
        }
    };
    Ok(value)
}

pub fn read_metadata(reader: &mut ByteReader<'_>, ctx: &DecodeContext<'_>) -> Result<Metadata> {
    let count_pos = reader.tell();
    let count = reader.read_u32(Endian::Little)?;
    if count > ctx.config.max_metadata_entries {
        return Err(BinError::new(
            ErrorKind::LimitExceeded,
            format!(
                "metadata count {count} exceeds limit {}",
                ctx.config.max_metadata_entries
            ),
        )
        .with_offset(count_pos));
    }

    let mut metadata = HashMap::with_capacity(count as usize);
    for _ in 0..count {
        let key_pos = reader.tell();
        let key = reader
            .read_qtext()?
            .ok_or_else(|| BinError::format("metadata key is null").with_offset(key_pos))?;
        let value = read_metadata_value(reader)?;
        metadata.insert(key, value);
    }
    Ok(metadata)
}


#[cfg(test)]
mod tests {
    use super::test_support::write_string_value;
    use super::*;
    use crate::ccb::header::LoadFlags;
    use crate::core::config::ParseConfig;
    use crate::io::ByteWriter;

    fn ctx(config: &ParseConfig) -> DecodeContext<'_> {
        DecodeContext {
            version: 48,
            flags: LoadFlags::default(),
            config,
        }
    }

    #[test]
    fn reads_typed_entries() {
        let mut writer = ByteWriter::new();
        writer.write_u32(Endian::Little, 3);
        writer.write_qtext(Some("plugin_name"));
        write_string_value(&mut writer, "qM3C2");
        writer.write_qtext(Some("count"));
        writer.write_u32(Endian::Big, TYPE_INT).write_u8(0);
        writer.write_i32(Endian::Big, -5);
        writer.write_qtext(Some("ratio"));
        writer.write_u32(Endian::Big, TYPE_DOUBLE).write_u8(0);
        writer.write_f64(Endian::Big, 0.5);
        let bytes = writer.into_bytes();

        let config = ParseConfig::default();
        let metadata = read_metadata(&mut ByteReader::new(&bytes), &ctx(&config)).unwrap();
        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata["plugin_name"].as_str(), Some("qM3C2"));
        assert_eq!(metadata["count"], MetadataValue::Int(-5));
        assert_eq!(metadata["ratio"], MetadataValue::Double(0.5));
    }

    #[test]
    fn unknown_value_type_is_unsupported() {
        let mut writer = ByteWriter::new();
        writer.write_u32(Endian::Little, 1);
        writer.write_qtext(Some("blob"));
        writer.write_u32(Endian::Big, 12).write_u8(0);
        let bytes = writer.into_bytes();

        let config = ParseConfig::default();
        let err = read_metadata(&mut ByteReader::new(&bytes), &ctx(&config)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedFeature);
    }

    #[test]
    fn count_is_capped_by_config() {
        let mut writer = ByteWriter::new();
        writer.write_u32(Endian::Little, 10);
        let bytes = writer.into_bytes();

        let config = ParseConfig {
            max_metadata_entries: 4,
            ..ParseConfig::default()
        };
        let err = read_metadata(&mut ByteReader::new(&bytes), &ctx(&config)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LimitExceeded);
    }
}
