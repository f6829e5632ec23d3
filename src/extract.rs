//! Label positions resolved against the clouds they annotate.

use crate::core::error::BinError;
use crate::core::result::Result;
use crate::objects::Entity;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelledPoint {
    pub cloud_name: Option<String>,
    pub label_name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Collects, for every point cloud in the tree, the position of each label
/// directly under it. Positions have the cloud's global shift removed.
pub fn labelled_points(root: &Entity) -> Result<Vec<LabelledPoint>> {
    let mut out = Vec::new();
    for (_, node) in root.walk() {
        let Some(cloud) = node.as_point_cloud() else {
            continue;
        };
        for child in &node.children {
            let Some(label) = child.as_label() else {
                continue;
            };
            let Some(first) = label.points.first() else {
                continue;
            };
            let index = first.point_index as usize;
            let (x, y, z) = cloud.unshifted_point(index).ok_or_else(|| {
                BinError::format(format!(
                    "label {} references point {index} but cloud {} has {} points",
                    child.unique_id(),
                    node.unique_id(),
                    cloud.point_count()
                ))
            })?;
            out.push(LabelledPoint {
                cloud_name: node.name().map(str::to_string),
                label_name: child.name().map(str::to_string),
                x,
                y,
                z,
            });
        }
    }
    Ok(out)
}
