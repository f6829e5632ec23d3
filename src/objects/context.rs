use crate::ccb::header::{BinHeader, LoadFlags, Precision};
use crate::core::config::ParseConfig;

/// Per-file decode parameters threaded through every codec.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'c> {
    pub version: u32,
    pub flags: LoadFlags,
    pub config: &'c ParseConfig,
}

impl<'c> DecodeContext<'c> {
    pub fn new(header: &BinHeader, config: &'c ParseConfig) -> Self {
        Self {
            version: header.version,
            flags: header.load_flags,
            config,
        }
    }

    pub fn coord_precision(&self) -> Precision {
        self.flags.coord_precision()
    }
}
