use crate::core::error::{BinError, ErrorKind};
use crate::core::result::Result;
use crate::io::{ByteReader, Endian};
use crate::objects::DecodeContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayHeader {
    pub component_count: u8,
    pub element_count: u32,
}

pub fn read_array_header(
    reader: &mut ByteReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<ArrayHeader> {
    let start = reader.tell();
    let component_count = reader.read_u8()?;
    let element_count = reader.read_u32(Endian::Little)?;
    if element_count > ctx.config.max_array_elements {
        return Err(BinError::new(
            ErrorKind::LimitExceeded,
            format!(
                "array of {element_count} elements exceeds limit {}",
                ctx.config.max_array_elements
            ),
        )
        .with_offset(start));
    }
    Ok(ArrayHeader {
        component_count,
        element_count,
    })
}

/// Reads a length-prefixed array whose elements have `components` values of
/// `component_size` bytes each.
pub fn read_array<T>(
    reader: &mut ByteReader<'_>,
    ctx: &DecodeContext<'_>,
    components: u8,
    component_size: usize,
    mut read_element: impl FnMut(&mut ByteReader<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let start = reader.tell();
    let header = read_array_header(reader, ctx)?;
    if header.component_count != components {
        return Err(BinError::format(format!(
            "array has {} components per element, expected {components}",
            header.component_count
        ))
        .with_offset(start));
    }

    let needed = header.element_count as u64 * components as u64 * component_size as u64;
    if needed > reader.remaining() as u64 {
        return Err(BinError::new(
            ErrorKind::UnexpectedEof,
            format!(
                "array needs {needed} bytes, {} remaining",
                reader.remaining()
            ),
        )
        .with_offset(reader.tell()));
    }

    let mut out = Vec::with_capacity(header.element_count as usize);
    for _ in 0..header.element_count {
        out.push(read_element(reader)?);
    }
    Ok(out)
}
