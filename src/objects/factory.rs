use log::warn;

use crate::core::error::{BinError, ErrorKind};
use crate::core::result::Result;
use crate::objects::ClassId;

/// Which codec decodes an object of a given class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Group,
    PointCloud,
    Label2d,
    /// Recognized class whose body layout is not decoded.
    Unsupported(ClassId),
}

pub fn entity_kind(class_id: ClassId) -> Result<EntityKind> {
    let kind = match class_id {
        ClassId::HierarchyObject => EntityKind::Group,
        ClassId::PointCloud => EntityKind::PointCloud,
        ClassId::Label2d => EntityKind::Label2d,
        ClassId::OldCylinder | ClassId::Cylinder => EntityKind::Unsupported(ClassId::Cylinder),
        ClassId::MeshGroup => {
            warn!("mesh groups are deprecated");
            EntityKind::Unsupported(class_id)
        }
        ClassId::Mesh
        | ClassId::SubMesh
        | ClassId::Polyline
        | ClassId::Facet
        | ClassId::MaterialSet
        | ClassId::NormalsArray
        | ClassId::NormalIndexesArray
        | ClassId::RgbColorArray
        | ClassId::RgbaColorArray
        | ClassId::TexCoordsArray
        | ClassId::Image
        | ClassId::GblSensor
        | ClassId::CameraSensor
        | ClassId::Viewport2dObject
        | ClassId::Viewport2dLabel
        | ClassId::Plane
        | ClassId::Sphere
        | ClassId::Torus
        | ClassId::Box
        | ClassId::Cone
        | ClassId::Dish
        | ClassId::Extrusion
        | ClassId::Quadric
        | ClassId::TransBuffer
        | ClassId::CustomHObject
        | ClassId::CustomLeafObject
        | ClassId::CoordinateSystem => EntityKind::Unsupported(class_id),
        ClassId::CalibratedImage => {
            return Err(BinError::new(
                ErrorKind::InvalidConstruction,
                "CALIBRATED_IMAGE is deprecated",
            ))
        }
        ClassId::PointOctree | ClassId::PointKdTree => {
            return Err(BinError::new(
                ErrorKind::InvalidConstruction,
                format!("{class_id} can't be constructed this way"),
            ))
        }
        ClassId::Object
        | ClassId::Sensor
        | ClassId::Primitive
        | ClassId::Array
        | ClassId::ClippingBox
        | ClassId::ClippingBoxPart => {
            return Err(BinError::new(
                ErrorKind::InvalidConstruction,
                format!("invalid object type {class_id}"),
            ))
        }
    };
    Ok(kind)
}
