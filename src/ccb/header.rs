use crate::core::error::{BinError, ErrorKind};
use crate::core::result::Result;
use crate::io::{ByteReader, Endian};

pub const MAGIC: &[u8; 3] = b"CCB";
pub const HEADER_LEN: usize = 8;
pub const MIN_VERSION: u32 = 20;
pub const MAX_LOAD_FLAGS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Float,
    Double,
}

impl Precision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Float => "float",
            Precision::Double => "double",
        }
    }
}

/// Deserialization flags stored as an ASCII digit after the magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadFlags(u8);

impl LoadFlags {
    pub const POINT_COORDS_64_BITS: u8 = 1;
    pub const SCALAR_VAL_32_BITS: u8 = 2;

    pub fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn coord_precision(&self) -> Precision {
        if self.0 & Self::POINT_COORDS_64_BITS != 0 {
            Precision::Double
        } else {
            Precision::Float
        }
    }

    pub fn scalar_precision(&self) -> Precision {
        if self.0 & Self::SCALAR_VAL_32_BITS != 0 {
            Precision::Float
        } else {
            Precision::Double
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinHeader {
    pub load_flags: LoadFlags,
    pub version: u32,
}

impl BinHeader {
    pub fn coord_precision(&self) -> Precision {
        self.load_flags.coord_precision()
    }

    pub fn scalar_precision(&self) -> Precision {
        self.load_flags.scalar_precision()
    }

    /// Version as the application prints it, e.g. `4.8` for 48.
    pub fn version_label(&self) -> String {
        format!("{}.{}", self.version / 10, self.version % 10)
    }
}

pub fn parse_header(reader: &mut ByteReader<'_>) -> Result<BinHeader> {
    let magic = reader
        .read_bytes(MAGIC.len())
        .map_err(|err| BinError::new(ErrorKind::BadMagic, err.message).with_offset(0))?;
    if magic != MAGIC {
        return Err(BinError::new(
            ErrorKind::BadMagic,
            format!(
                "expected 'CCB', found '{}'",
                String::from_utf8_lossy(magic).escape_default()
            ),
        )
        .with_offset(0));
    }

    let flags_pos = reader.tell();
    let digit = reader.read_u8()?;
    if !digit.is_ascii_digit() {
        return Err(BinError::new(
            ErrorKind::BadHeader,
            format!("load flags byte {digit:#04x} is not an ASCII digit"),
        )
        .with_offset(flags_pos));
    }
    let flags = digit - b'0';
    if flags > MAX_LOAD_FLAGS {
        return Err(BinError::new(
            ErrorKind::BadHeader,
            format!("load flags {flags} exceed {MAX_LOAD_FLAGS}"),
        )
        .with_offset(flags_pos));
    }

    let version_pos = reader.tell();
    let version = reader.read_u32(Endian::Little)?;
    if version < MIN_VERSION {
        return Err(BinError::new(
            ErrorKind::UnsupportedVersion,
            format!("version {version} is older than {MIN_VERSION}"),
        )
        .with_offset(version_pos));
    }

    Ok(BinHeader {
        load_flags: LoadFlags::new(flags),
        version,
    })
}
