pub mod decoder;
pub mod file_open;
pub mod header;
pub mod plugin;

pub use decoder::{decode_bytes, decode_bytes_with, decode_file, BinDocument, Decoder};
pub use header::{BinHeader, LoadFlags, Precision};
pub use plugin::{NoPlugins, PluginRegistry, StaticPluginRegistry};
