use crate::core::error::{BinError, ErrorKind};
use crate::core::result::Result;
use crate::io::{ByteReader, Endian};

/// Capability bits combined into class identifiers.
pub mod bits {
    pub const HIERARCHY: u64 = 0x0000_0000_0001;
    pub const LEAF: u64 = 0x0000_0000_0002;
    pub const GROUP: u64 = 0x0000_0000_0004;
    pub const PRIMITIVE: u64 = 0x0000_0000_0008;
    pub const ARRAY: u64 = 0x0000_0000_0010;
    pub const LABEL: u64 = 0x0000_0000_0020;
    pub const VIEWPORT: u64 = 0x0000_0000_0040;
    pub const CUSTOM: u64 = 0x0000_0000_0080;
    pub const CLOUD: u64 = 0x0000_0000_0100;
    pub const MESH: u64 = 0x0000_0000_0200;
    pub const OCTREE: u64 = 0x0000_0000_0400;
    pub const POLYLINE: u64 = 0x0000_0000_0800;
    pub const IMAGE: u64 = 0x0000_0000_1000;
    pub const SENSOR: u64 = 0x0000_0000_2000;
    pub const PLANE: u64 = 0x0000_0000_4000;
    pub const SPHERE: u64 = 0x0000_0000_8000;
    pub const TORUS: u64 = 0x0000_0001_0000;
    pub const CYLINDER: u64 = 0x0000_0002_0000;
    pub const CONE: u64 = 0x0000_0004_0000;
    pub const BOX: u64 = 0x0000_0008_0000;
    pub const DISH: u64 = 0x0000_0010_0000;
    pub const EXTRUSION: u64 = 0x0000_0020_0000;
    pub const KDTREE: u64 = 0x0000_0040_0000;
    pub const FACET: u64 = 0x0000_0080_0000;
    pub const MATERIAL: u64 = 0x0000_0100_0000;
    pub const CLIP_BOX: u64 = 0x0000_0200_0000;
    pub const TRANS_BUFFER: u64 = 0x0000_0400_0000;
    pub const GROUND_BASED: u64 = 0x0000_0800_0000;
    pub const RGB_COLOR: u64 = 0x0000_1000_0000;
    pub const NORMAL: u64 = 0x0000_2000_0000;
    pub const COMPRESSED_NORMAL: u64 = 0x0000_4000_0000;
    pub const TEX_COORDS: u64 = 0x0000_8000_0000;
    pub const CAMERA: u64 = 0x0001_0000_0000;
    pub const QUADRIC: u64 = 0x0002_0000_0000;
    pub const RGBA_COLOR: u64 = 0x0004_0000_0000;
    pub const COORDINATE_SYSTEM: u64 = 0x0008_0000_0000;
    pub const CLIP_BOX_PART: u64 = 0x0010_0000_0000;
}

/// Class identifiers were stored on 32 bits before this version.
pub const CLASS_ID_64_BIT_VERSION: u32 = 34;

use bits::*;

const MESH_BITS: u64 = HIERARCHY | MESH;
const SENSOR_BITS: u64 = HIERARCHY | SENSOR;
const PRIMITIVE_BITS: u64 = MESH_BITS | PRIMITIVE;
const VIEWPORT_BITS: u64 = HIERARCHY | VIEWPORT | LEAF;
const CUSTOM_H_BITS: u64 = HIERARCHY | CUSTOM;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassId {
    Object,
    HierarchyObject,
    PointCloud,
    Mesh,
    SubMesh,
    /// Deprecated, kept so old files still resolve.
    MeshGroup,
    Facet,
    PointOctree,
    PointKdTree,
    Polyline,
    Image,
    CalibratedImage,
    Sensor,
    GblSensor,
    CameraSensor,
    Primitive,
    Plane,
    Sphere,
    Torus,
    Cone,
    OldCylinder,
    Cylinder,
    Box,
    Dish,
    Extrusion,
    Quadric,
    MaterialSet,
    Array,
    NormalsArray,
    NormalIndexesArray,
    RgbColorArray,
    RgbaColorArray,
    TexCoordsArray,
    Label2d,
    Viewport2dObject,
    Viewport2dLabel,
    ClippingBox,
    ClippingBoxPart,
    TransBuffer,
    CoordinateSystem,
    CustomHObject,
    CustomLeafObject,
}

impl ClassId {
    pub const ALL: [ClassId; 42] = [
        ClassId::Object,
        ClassId::HierarchyObject,
        ClassId::PointCloud,
        ClassId::Mesh,
        ClassId::SubMesh,
        ClassId::MeshGroup,
        ClassId::Facet,
        ClassId::PointOctree,
        ClassId::PointKdTree,
        ClassId::Polyline,
        ClassId::Image,
        ClassId::CalibratedImage,
        ClassId::Sensor,
        ClassId::GblSensor,
        ClassId::CameraSensor,
        ClassId::Primitive,
        ClassId::Plane,
        ClassId::Sphere,
        ClassId::Torus,
        ClassId::Cone,
        ClassId::OldCylinder,
        ClassId::Cylinder,
        ClassId::Box,
        ClassId::Dish,
        ClassId::Extrusion,
        ClassId::Quadric,
        ClassId::MaterialSet,
        ClassId::Array,
        ClassId::NormalsArray,
        ClassId::NormalIndexesArray,
        ClassId::RgbColorArray,
        ClassId::RgbaColorArray,
        ClassId::TexCoordsArray,
        ClassId::Label2d,
        ClassId::Viewport2dObject,
        ClassId::Viewport2dLabel,
        ClassId::ClippingBox,
        ClassId::ClippingBoxPart,
        ClassId::TransBuffer,
        ClassId::CoordinateSystem,
        ClassId::CustomHObject,
        ClassId::CustomLeafObject,
    ];

    pub const fn bits(self) -> u64 {
        match self {
            ClassId::Object => 0,
            ClassId::HierarchyObject => HIERARCHY,
            ClassId::PointCloud => HIERARCHY | CLOUD,
            ClassId::Mesh => MESH_BITS,
            ClassId::SubMesh => MESH_BITS | LEAF,
            ClassId::MeshGroup => MESH_BITS | GROUP,
            ClassId::Facet => HIERARCHY | FACET,
            ClassId::PointOctree => HIERARCHY | OCTREE | LEAF,
            ClassId::PointKdTree => HIERARCHY | KDTREE | LEAF,
            ClassId::Polyline => HIERARCHY | POLYLINE,
            ClassId::Image => HIERARCHY | IMAGE,
            ClassId::CalibratedImage => HIERARCHY | IMAGE | LEAF,
            ClassId::Sensor => SENSOR_BITS,
            ClassId::GblSensor => SENSOR_BITS | GROUND_BASED,
            ClassId::CameraSensor => SENSOR_BITS | CAMERA,
            ClassId::Primitive => PRIMITIVE_BITS,
            ClassId::Plane => PRIMITIVE_BITS | PLANE,
            ClassId::Sphere => PRIMITIVE_BITS | SPHERE,
            ClassId::Torus => PRIMITIVE_BITS | TORUS,
            ClassId::Cone => PRIMITIVE_BITS | CONE,
            ClassId::OldCylinder => PRIMITIVE_BITS | CYLINDER,
            // cylinders are cones
            ClassId::Cylinder => PRIMITIVE_BITS | CYLINDER | CONE,
            ClassId::Box => PRIMITIVE_BITS | BOX,
            ClassId::Dish => PRIMITIVE_BITS | DISH,
            ClassId::Extrusion => PRIMITIVE_BITS | EXTRUSION,
            ClassId::Quadric => PRIMITIVE_BITS | QUADRIC,
            ClassId::MaterialSet => MATERIAL | GROUP | LEAF,
            ClassId::Array => ARRAY,
            ClassId::NormalsArray => ARRAY | NORMAL | LEAF,
            ClassId::NormalIndexesArray => ARRAY | COMPRESSED_NORMAL | LEAF,
            ClassId::RgbColorArray => ARRAY | RGB_COLOR | LEAF,
            ClassId::RgbaColorArray => ARRAY | RGBA_COLOR | LEAF,
            ClassId::TexCoordsArray => ARRAY | TEX_COORDS | LEAF,
            ClassId::Label2d => HIERARCHY | LABEL | LEAF,
            ClassId::Viewport2dObject => VIEWPORT_BITS,
            ClassId::Viewport2dLabel => VIEWPORT_BITS | LABEL,
            ClassId::ClippingBox => CLIP_BOX | LEAF,
            ClassId::ClippingBoxPart => CLIP_BOX_PART | LEAF,
            ClassId::TransBuffer => HIERARCHY | TRANS_BUFFER | LEAF,
            ClassId::CoordinateSystem => PRIMITIVE_BITS | COORDINATE_SYSTEM,
            ClassId::CustomHObject => CUSTOM_H_BITS,
            ClassId::CustomLeafObject => CUSTOM_H_BITS | LEAF,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ClassId::Object => "OBJECT",
            ClassId::HierarchyObject => "HIERARCHY_OBJECT",
            ClassId::PointCloud => "POINT_CLOUD",
            ClassId::Mesh => "MESH",
            ClassId::SubMesh => "SUB_MESH",
            ClassId::MeshGroup => "MESH_GROUP",
            ClassId::Facet => "FACET",
            ClassId::PointOctree => "POINT_OCTREE",
            ClassId::PointKdTree => "POINT_KDTREE",
            ClassId::Polyline => "POLY_LINE",
            ClassId::Image => "IMAGE",
            ClassId::CalibratedImage => "CALIBRATED_IMAGE",
            ClassId::Sensor => "SENSOR",
            ClassId::GblSensor => "GBL_SENSOR",
            ClassId::CameraSensor => "CAMERA_SENSOR",
            ClassId::Primitive => "PRIMITIVE",
            ClassId::Plane => "PLANE",
            ClassId::Sphere => "SPHERE",
            ClassId::Torus => "TORUS",
            ClassId::Cone => "CONE",
            ClassId::OldCylinder => "OLD_CYLINDER_ID",
            ClassId::Cylinder => "CYLINDER",
            ClassId::Box => "BOX",
            ClassId::Dish => "DISH",
            ClassId::Extrusion => "EXTRU",
            ClassId::Quadric => "QUADRIC",
            ClassId::MaterialSet => "MATERIAL_SET",
            ClassId::Array => "ARRAY",
            ClassId::NormalsArray => "NORMALS_ARRAY",
            ClassId::NormalIndexesArray => "NORMAL_INDEXES_ARRAY",
            ClassId::RgbColorArray => "RGB_COLOR_ARRAY",
            ClassId::RgbaColorArray => "RGBA_COLOR_ARRAY",
            ClassId::TexCoordsArray => "TEX_COORDS_ARRAY",
            ClassId::Label2d => "LABEL_2D",
            ClassId::Viewport2dObject => "VIEWPORT_2D_OBJECT",
            ClassId::Viewport2dLabel => "VIEWPORT_2D_LABEL",
            ClassId::ClippingBox => "CLIPPING_BOX",
            ClassId::ClippingBoxPart => "CLIPPING_BOX_PART",
            ClassId::TransBuffer => "TRANS_BUFFER",
            ClassId::CoordinateSystem => "COORDINATESYSTEM",
            ClassId::CustomHObject => "CUSTOM_H_OBJECT",
            ClassId::CustomLeafObject => "CUSTOM_LEAF_OBJECT",
        }
    }

    /// Exact bit-pattern lookup.
    pub fn from_bits(raw: u64) -> Option<ClassId> {
        ClassId::ALL.iter().copied().find(|id| id.bits() == raw)
    }

    pub fn has_bits(self, mask: u64) -> bool {
        self.bits() & mask == mask
    }

    pub fn is_hierarchical(self) -> bool {
        self.has_bits(HIERARCHY)
    }

    pub fn is_leaf(self) -> bool {
        self.has_bits(LEAF)
    }

    /// True for plugin-defined objects, hierarchical or leaf.
    pub fn is_custom_hierarchical(self) -> bool {
        self.has_bits(CUSTOM_H_BITS)
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn read_raw_class_id(reader: &mut ByteReader<'_>, version: u32) -> Result<u64> {
    if version < CLASS_ID_64_BIT_VERSION {
        Ok(u64::from(reader.read_u32(Endian::Little)?))
    } else {
        reader.read_u64(Endian::Little)
    }
}

pub fn lookup(raw: u64) -> Result<ClassId> {
    ClassId::from_bits(raw).ok_or_else(|| {
        BinError::new(
            ErrorKind::UnknownClassId,
            format!("no class matches identifier {raw:#x}"),
        )
    })
}

/// Reads a class identifier and resolves it against the catalog.
pub fn resolve(reader: &mut ByteReader<'_>, version: u32) -> Result<ClassId> {
    let start = reader.tell();
    let raw = read_raw_class_id(reader, version)?;
    lookup(raw).map_err(|err| err.with_offset(start))
}

/// Masks the custom bit wrongly written along with the camera and quadric
/// bits by versions 3.5 to 4.7.
pub fn repair_legacy_custom_bit(raw: u64, version: u32) -> u64 {
    if !(35..=47).contains(&version) || raw & CUSTOM == 0 {
        return raw;
    }
    let camera = ClassId::CameraSensor.bits();
    let quadric = ClassId::Quadric.bits();
    if raw & camera == camera || raw & quadric == quadric {
        raw & !CUSTOM
    } else {
        raw
    }
}
