//! Reader for CloudCompare `.bin` (CCB) scene files.

pub mod ccb;
pub mod core;
pub mod entities;
pub mod extract;
pub mod io;
pub mod objects;

#[cfg(feature = "python")]
mod api;
#[cfg(test)]
mod test_support;

pub use ccb::{
    decode_bytes, decode_bytes_with, decode_file, BinDocument, BinHeader, NoPlugins,
    PluginRegistry, StaticPluginRegistry,
};
pub use ccb::file_open::{read_file, read_header};
pub use crate::core::config::ParseConfig;
pub use crate::core::error::{BinError, ErrorKind};
pub use extract::{labelled_points, LabelledPoint};
pub use objects::{ClassId, Entity, EntityBody};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn ccbin(module: &Bound<'_, PyModule>) -> PyResult<()> {
    api::register(module)
}
