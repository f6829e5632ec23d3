use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::ccb::header::{parse_header, BinHeader, HEADER_LEN};
use crate::core::result::Result;
use crate::io::ByteReader;

pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let mut file = File::open(path.as_ref())?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Reads and validates only the fixed-size file header.
pub fn read_header(path: impl AsRef<Path>) -> Result<BinHeader> {
    let file = File::open(path.as_ref())?;
    let mut data = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut data)?;
    parse_header(&mut ByteReader::new(&data))
}
