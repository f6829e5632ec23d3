pub mod array;
pub mod class_id;
pub mod context;
pub mod entity;
pub mod factory;
pub mod hierarchy;
pub mod metadata;
pub mod object_header;

pub use class_id::ClassId;
pub use context::DecodeContext;
pub use entity::{DisplayState, Entity, EntityBody, SelectionBehavior, Walk};
pub use factory::{entity_kind, EntityKind};
pub use hierarchy::{decode_entity, decode_node_fields, NodeFields};
pub use metadata::{Metadata, MetadataValue};
pub use object_header::ObjectHeader;
