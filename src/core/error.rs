use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadMagic,
    BadHeader,
    UnsupportedVersion,
    InvalidRoot,
    UnknownClassId,
    InvalidConstruction,
    UnknownPlugin,
    BadEnum,
    /// The layout is recognized but its payload is not decoded.
    UnsupportedFeature,
    UnexpectedEof,
    Format,
    LimitExceeded,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadMagic => "bad magic",
            ErrorKind::BadHeader => "bad header",
            ErrorKind::UnsupportedVersion => "unsupported version",
            ErrorKind::InvalidRoot => "invalid root",
            ErrorKind::UnknownClassId => "unknown class id",
            ErrorKind::InvalidConstruction => "invalid construction",
            ErrorKind::UnknownPlugin => "unknown plugin",
            ErrorKind::BadEnum => "bad enum",
            ErrorKind::UnsupportedFeature => "unsupported feature",
            ErrorKind::UnexpectedEof => "unexpected end of input",
            ErrorKind::Format => "format",
            ErrorKind::LimitExceeded => "limit exceeded",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}{}", offset_suffix(.offset))]
pub struct BinError {
    pub kind: ErrorKind,
    pub message: String,
    pub offset: Option<u64>,
}

impl BinError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            offset: None,
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedFeature, message)
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format, message)
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

fn offset_suffix(offset: &Option<u64>) -> String {
    match offset {
        Some(offset) => format!(" (at offset {offset})"),
        None => String::new(),
    }
}

impl From<std::io::Error> for BinError {
    fn from(err: std::io::Error) -> Self {
        BinError::new(ErrorKind::Io, err.to_string())
    }
}
