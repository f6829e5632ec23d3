pub mod label_2d;
pub mod point_cloud;

pub use label_2d::{decode_label_2d, Label2d, PointRef};
pub use point_cloud::{decode_point_cloud, PointCloud};
