pub mod byte_reader;
#[cfg(test)]
pub mod byte_writer;

pub use byte_reader::{ByteReader, Endian};
#[cfg(test)]
pub use byte_writer::ByteWriter;
