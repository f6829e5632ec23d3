use std::path::Path;

use log::info;

use crate::ccb::file_open;
use crate::ccb::header::{parse_header, BinHeader};
use crate::ccb::plugin::{NoPlugins, PluginRegistry};
use crate::core::config::ParseConfig;
use crate::core::error::{BinError, ErrorKind};
use crate::core::result::Result;
use crate::io::ByteReader;
use crate::objects::{
    class_id, decode_entity, decode_node_fields, entity_kind, ClassId, DecodeContext, Entity,
    EntityKind,
};

const CLASS_NAME_KEY: &str = "class_name";
const PLUGIN_NAME_KEY: &str = "plugin_name";

/// A decoded file: its header and the object tree under the root.
#[derive(Debug, Clone, PartialEq)]
pub struct BinDocument {
    pub header: BinHeader,
    pub root: Entity,
}

#[derive(Debug)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
    header: BinHeader,
    config: ParseConfig,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8], config: ParseConfig) -> Result<Self> {
        let header = parse_header(&mut ByteReader::new(bytes))?;
        info!(
            "[BIN] version {} (coords: {} / scalar: {})",
            header.version_label(),
            header.coord_precision().as_str(),
            header.scalar_precision().as_str()
        );
        Ok(Self {
            bytes,
            header,
            config,
        })
    }

    pub fn header(&self) -> &BinHeader {
        &self.header
    }

    pub fn decode(&self, registry: &dyn PluginRegistry) -> Result<BinDocument> {
        let ctx = DecodeContext::new(&self.header, &self.config);
        let mut reader = ByteReader::new(self.bytes);
        parse_header(&mut reader)?;

        let root_pos = reader.tell();
        let mut root_class = class_id::resolve(&mut reader, ctx.version)?;
        if root_class == ClassId::Object {
            return Err(BinError::new(
                ErrorKind::InvalidRoot,
                "first entity must not be a plain OBJECT",
            )
            .with_offset(root_pos));
        }
        let mut kind = entity_kind(root_class).map_err(|err| err.with_offset(root_pos))?;

        if root_class == ClassId::CustomHObject {
            info!("root is a plugin-defined hierarchical object");
            let saved = reader.tell();
            root_class = self.resolve_custom_root(&mut reader, &ctx, registry)?;
            kind = entity_kind(root_class).map_err(|err| err.with_offset(saved))?;
        }

        let root = decode_entity(&mut reader, &ctx, root_class, kind, 0)?;
        Ok(BinDocument {
            header: self.header,
            root,
        })
    }

    /// Reads the root as a plain object to learn which plugin wrote it, then
    /// rewinds so the real class decodes from the same position.
    fn resolve_custom_root(
        &self,
        reader: &mut ByteReader<'_>,
        ctx: &DecodeContext<'_>,
        registry: &dyn PluginRegistry,
    ) -> Result<ClassId> {
        let saved = reader.tell();
        let probe = decode_node_fields(reader, ctx, EntityKind::Group)?;
        reader.seek(saved)?;

        let metadata = &probe.header.metadata;
        let class_name = metadata.get(CLASS_NAME_KEY).and_then(|v| v.as_str());
        let plugin_name = metadata.get(PLUGIN_NAME_KEY).and_then(|v| v.as_str());
        let resolved = match (plugin_name, class_name) {
            (Some(plugin), Some(class)) => registry.resolve(plugin, class),
            _ => None,
        };
        resolved.ok_or_else(|| {
            BinError::new(
                ErrorKind::UnknownPlugin,
                format!(
                    "file was written by an unknown plugin (plugin: {}, class: {})",
                    plugin_name.unwrap_or("?"),
                    class_name.unwrap_or("?")
                ),
            )
            .with_offset(saved)
        })
    }
}

pub fn decode_bytes(bytes: &[u8]) -> Result<BinDocument> {
    decode_bytes_with(bytes, ParseConfig::default(), &NoPlugins)
}

pub fn decode_bytes_with(
    bytes: &[u8],
    config: ParseConfig,
    registry: &dyn PluginRegistry,
) -> Result<BinDocument> {
    Decoder::new(bytes, config)?.decode(registry)
}

pub fn decode_file(path: impl AsRef<Path>) -> Result<BinDocument> {
    let bytes = file_open::read_file(path)?;
    decode_bytes(&bytes)
}
