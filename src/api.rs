#![allow(clippy::useless_conversion)] // Triggered by PyO3 #[pyfunction] wrapper expansion.

use pyo3::exceptions::{PyIOError, PyNotImplementedError, PyValueError};
use pyo3::prelude::*;

use crate::ccb::{decoder, file_open, BinDocument};
use crate::core::error::{BinError, ErrorKind};
use crate::extract;

type Point3 = (f64, f64, f64);

type HeaderRow = (String, u32, String, String);
type EntityRow = (usize, String, u32, Option<String>, usize);
type PointCloudRow = (u32, Option<String>, Point3, f64, Vec<Point3>);
type PointRefRow = (u32, u32);
type LabelRow = (u32, Option<String>, Vec<PointRefRow>, (f32, f32));
type LabelledPointRow = (Option<String>, Option<String>, f64, f64, f64);

#[pyfunction]
pub fn read_header(path: &str) -> PyResult<HeaderRow> {
    let header = file_open::read_header(path).map_err(to_py_err)?;
    Ok((
        header.version_label(),
        header.version,
        header.coord_precision().as_str().to_string(),
        header.scalar_precision().as_str().to_string(),
    ))
}

#[pyfunction]
pub fn list_entities(path: &str) -> PyResult<Vec<EntityRow>> {
    let document = load_document(path)?;
    let rows = document
        .root
        .walk()
        .map(|(depth, entity)| {
            (
                depth,
                entity.class_id.name().to_string(),
                entity.unique_id(),
                entity.name().map(str::to_string),
                entity.children.len(),
            )
        })
        .collect();
    Ok(rows)
}

#[pyfunction]
pub fn decode_point_clouds(path: &str) -> PyResult<Vec<PointCloudRow>> {
    let document = load_document(path)?;
    let rows = document
        .root
        .walk()
        .filter_map(|(_, entity)| {
            let cloud = entity.as_point_cloud()?;
            Some((
                entity.unique_id(),
                entity.name().map(str::to_string),
                cloud.global_shift,
                cloud.global_scale,
                cloud.points.clone(),
            ))
        })
        .collect();
    Ok(rows)
}

#[pyfunction]
pub fn decode_labels(path: &str) -> PyResult<Vec<LabelRow>> {
    let document = load_document(path)?;
    let rows = document
        .root
        .walk()
        .filter_map(|(_, entity)| {
            let label = entity.as_label()?;
            let refs = label
                .points
                .iter()
                .map(|point| (point.cloud_id, point.point_index))
                .collect();
            Some((
                entity.unique_id(),
                entity.name().map(str::to_string),
                refs,
                label.screen_pos,
            ))
        })
        .collect();
    Ok(rows)
}

#[pyfunction]
pub fn extract_labelled_points(path: &str) -> PyResult<Vec<LabelledPointRow>> {
    let document = load_document(path)?;
    let rows = extract::labelled_points(&document.root)
        .map_err(to_py_err)?
        .into_iter()
        .map(|row| (row.cloud_name, row.label_name, row.x, row.y, row.z))
        .collect();
    Ok(rows)
}

pub fn register(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_function(wrap_pyfunction!(read_header, module)?)?;
    module.add_function(wrap_pyfunction!(list_entities, module)?)?;
    module.add_function(wrap_pyfunction!(decode_point_clouds, module)?)?;
    module.add_function(wrap_pyfunction!(decode_labels, module)?)?;
    module.add_function(wrap_pyfunction!(extract_labelled_points, module)?)?;
    Ok(())
}

fn load_document(path: &str) -> PyResult<BinDocument> {
    decoder::decode_file(path).map_err(to_py_err)
}

fn to_py_err(err: BinError) -> PyErr {
    let message = err.to_string();
    match err.kind {
        ErrorKind::Io => PyIOError::new_err(message),
        ErrorKind::UnsupportedFeature => PyNotImplementedError::new_err(message),
        _ => PyValueError::new_err(message),
    }
}
