use crate::core::error::BinError;

pub type Result<T> = std::result::Result<T, BinError>;
