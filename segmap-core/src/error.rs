//! Error types for the segment mapping tools.

use thiserror::Error;

use crate::DeviceCode;

/// Errors that can occur while curating or generating segment mappings.
#[derive(Error, Debug)]
pub enum SegmapError {
    #[error("{file}:{line}: {reason}")]
    Malformed {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Code 0x{0:04x} is already mapped")]
    DuplicateCode(DeviceCode),

    #[error("Character {ch:?} is already mapped from 0x{existing:04x}")]
    DuplicateChar { ch: char, existing: DeviceCode },

    #[error("Console input closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for segment mapping operations.
pub type SegmapResult<T> = Result<T, SegmapError>;
