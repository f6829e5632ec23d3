use crate::core::error::{BinError, ErrorKind};
use crate::core::result::Result;

/// Length prefix marking an absent text value.
pub const QTEXT_NULL: u32 = 0xFFFF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Cursor over an in-memory file image.
///
/// Every read advances the cursor and fails with `UnexpectedEof` (leaving the
/// cursor untouched) when fewer bytes remain than requested.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn tell(&self) -> u64 {
        self.pos as u64
    }

    pub fn seek(&mut self, pos: u64) -> Result<()> {
        let pos = usize::try_from(pos)
            .ok()
            .filter(|pos| *pos <= self.data.len())
            .ok_or_else(|| {
                BinError::new(
                    ErrorKind::UnexpectedEof,
                    format!("seek to {pos} past end of input ({} bytes)", self.data.len()),
                )
            })?;
        self.pos = pos;
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(BinError::new(
                ErrorKind::UnexpectedEof,
                format!("need {n} bytes, {} remaining", self.remaining()),
            )
            .with_offset(self.tell()));
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self, endian: Endian) -> Result<u16> {
        let raw = self.read_array::<2>()?;
        Ok(match endian {
            Endian::Little => u16::from_le_bytes(raw),
            Endian::Big => u16::from_be_bytes(raw),
        })
    }

    pub fn read_u32(&mut self, endian: Endian) -> Result<u32> {
        let raw = self.read_array::<4>()?;
        Ok(match endian {
            Endian::Little => u32::from_le_bytes(raw),
            Endian::Big => u32::from_be_bytes(raw),
        })
    }

    pub fn read_i32(&mut self, endian: Endian) -> Result<i32> {
        Ok(self.read_u32(endian)? as i32)
    }

    pub fn read_u64(&mut self, endian: Endian) -> Result<u64> {
        let raw = self.read_array::<8>()?;
        Ok(match endian {
            Endian::Little => u64::from_le_bytes(raw),
            Endian::Big => u64::from_be_bytes(raw),
        })
    }

    pub fn read_i64(&mut self, endian: Endian) -> Result<i64> {
        Ok(self.read_u64(endian)? as i64)
    }

    pub fn read_f32(&mut self, endian: Endian) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32(endian)?))
    }

    pub fn read_f64(&mut self, endian: Endian) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64(endian)?))
    }

    pub fn read_vec2d(&mut self) -> Result<(f64, f64)> {
        Ok((self.read_f64(Endian::Little)?, self.read_f64(Endian::Little)?))
    }

    pub fn read_vec3d(&mut self) -> Result<(f64, f64, f64)> {
        Ok((
            self.read_f64(Endian::Little)?,
            self.read_f64(Endian::Little)?,
            self.read_f64(Endian::Little)?,
        ))
    }

    /// Reads a big-endian length prefixed UTF-16 string.
    ///
    /// A length of `0xFFFFFFFF` is a null string and consumes nothing past the
    /// prefix. Code units are big-endian unless the body starts with a UTF-16
    /// byte order mark.
    pub fn read_qtext(&mut self) -> Result<Option<String>> {
        let start = self.tell();
        let len = self.read_u32(Endian::Big)?;
        if len == QTEXT_NULL {
            return Ok(None);
        }
        if len % 2 != 0 {
            return Err(
                BinError::format(format!("text length {len} is not a whole number of UTF-16 units"))
                    .with_offset(start),
            );
        }
        let body = self.read_bytes(len as usize)?;
        let (encoding, units) = match body {
            [0xFF, 0xFE, rest @ ..] => (encoding_rs::UTF_16LE, rest),
            [0xFE, 0xFF, rest @ ..] => (encoding_rs::UTF_16BE, rest),
            _ => (encoding_rs::UTF_16BE, body),
        };
        let (text, _) = encoding.decode_without_bom_handling(units);
        Ok(Some(text.into_owned()))
    }

    /// Reads a fixed-size byte buffer holding NUL padded text.
    pub fn read_fixed_text(&mut self, len: usize) -> Result<String> {
        let raw = self.read_bytes(len)?;
        let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
        let (text, _) = encoding_rs::UTF_8.decode_without_bom_handling(&raw[..end]);
        Ok(text.into_owned())
    }
}
