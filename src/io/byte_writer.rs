use crate::io::byte_reader::{Endian, QTEXT_NULL};

/// Builds synthetic file images for decoder tests.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_u8(u8::from(value))
    }

    pub fn write_u16(&mut self, endian: Endian, value: u16) -> &mut Self {
        match endian {
            Endian::Little => self.write_bytes(&value.to_le_bytes()),
            Endian::Big => self.write_bytes(&value.to_be_bytes()),
        }
    }

    pub fn write_u32(&mut self, endian: Endian, value: u32) -> &mut Self {
        match endian {
            Endian::Little => self.write_bytes(&value.to_le_bytes()),
            Endian::Big => self.write_bytes(&value.to_be_bytes()),
        }
    }

    pub fn write_i32(&mut self, endian: Endian, value: i32) -> &mut Self {
        self.write_u32(endian, value as u32)
    }

    pub fn write_u64(&mut self, endian: Endian, value: u64) -> &mut Self {
        match endian {
            Endian::Little => self.write_bytes(&value.to_le_bytes()),
            Endian::Big => self.write_bytes(&value.to_be_bytes()),
        }
    }

    pub fn write_f32(&mut self, endian: Endian, value: f32) -> &mut Self {
        self.write_u32(endian, value.to_bits())
    }

    pub fn write_f64(&mut self, endian: Endian, value: f64) -> &mut Self {
        self.write_u64(endian, value.to_bits())
    }

    pub fn write_vec3d(&mut self, value: (f64, f64, f64)) -> &mut Self {
        self.write_f64(Endian::Little, value.0)
            .write_f64(Endian::Little, value.1)
            .write_f64(Endian::Little, value.2)
    }

    pub fn write_qtext(&mut self, value: Option<&str>) -> &mut Self {
        let Some(text) = value else {
            return self.write_u32(Endian::Big, QTEXT_NULL);
        };
        let units: Vec<u16> = text.encode_utf16().collect();
        self.write_u32(Endian::Big, (units.len() * 2) as u32);
        for unit in units {
            self.write_u16(Endian::Big, unit);
        }
        self
    }

    pub fn write_fixed_text(&mut self, text: &str, len: usize) -> &mut Self {
        let mut raw = vec![0u8; len];
        let n = text.len().min(len);
        raw[..n].copy_from_slice(&text.as_bytes()[..n]);
        self.write_bytes(&raw)
    }
}
