//! Error taxonomy for the tag memory model.
//!
//! `SchemaError` and `ConfigError` are startup failures. `CodecError` is
//! always recoverable: the edit that produced it is rejected and the row
//! keeps its previous value. `RangeError` means a caller addressed a page or
//! byte the store does not have.

use thiserror::Error;

use super::schema::FieldId;
use super::types::PageId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A span must cover at least one page
    #[error("field {0} spans zero pages")]
    ZeroPageCount(FieldId),

    #[error("field {field} starts at negative page {start}")]
    NegativeStart { field: FieldId, start: i64 },

    #[error("field {field} has invalid page count {count}")]
    InvalidPageCount { field: FieldId, count: i64 },

    /// Two fields claim at least one common page
    #[error("fields {0} and {1} overlap")]
    Overlap(FieldId, FieldId),

    #[error("field {field} ends at page {end}, beyond last page {max}")]
    OutOfBounds {
        field: FieldId,
        end: PageId,
        max: PageId,
    },

    #[error("field {0} is defined more than once")]
    DuplicateField(FieldId),

    #[error("color page {0} is beyond the last page")]
    InvalidColorPage(PageId),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("text contains a non-ASCII character")]
    NonAsciiCharacter,

    #[error("value {0} does not fit in 16 bits")]
    OutOfRange(i64),

    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),

    #[error("span covers {actual} pages, expected {expected}")]
    SpanSizeMismatch { expected: u32, actual: u32 },

    #[error("invalid hex byte: {0:?}")]
    InvalidHexByte(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("page {page} is beyond last page {max}")]
    PageOutOfRange { page: PageId, max: PageId },

    #[error("byte offset {0} is outside the page")]
    OffsetOutOfRange(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed layout document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Range(#[from] RangeError),
}
