use crate::tag::error::CodecError;
use crate::tag::schema::{Endianness, PageSpan};
use crate::tag::types::PageData;

use super::serialize::{BigEndianU16, LittleEndianU16, PageSerialize};

fn require_single_page(span: &PageSpan) -> Result<(), CodecError> {
    if span.count == 1 {
        Ok(())
    } else {
        Err(CodecError::SpanSizeMismatch {
            expected: 1,
            actual: span.count,
        })
    }
}

/// Store `value` in bytes 0-1 of the span's only page; bytes 2-3 are zero.
pub fn encode_u16(
    span: &PageSpan,
    value: i64,
    endianness: Endianness,
) -> Result<PageData, CodecError> {
    require_single_page(span)?;
    let value = u16::try_from(value).map_err(|_| CodecError::OutOfRange(value))?;
    Ok(match endianness {
        Endianness::Little => LittleEndianU16(value).to_page(),
        Endianness::Big => BigEndianU16(value).to_page(),
    })
}

pub fn decode_u16(
    span: &PageSpan,
    page: PageData,
    endianness: Endianness,
) -> Result<u16, CodecError> {
    require_single_page(span)?;
    Ok(match endianness {
        Endianness::Little => LittleEndianU16::from_page(page).0,
        Endianness::Big => BigEndianU16::from_page(page).0,
    })
}
