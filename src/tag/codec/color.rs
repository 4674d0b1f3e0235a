use crate::tag::error::CodecError;
use crate::tag::schema::PageSpan;
use crate::tag::types::PageData;

use super::serialize::{PageSerialize, Rgba};

/// Parse `#RRGGBB` or `#RRGGBBAA`, hex digits in either case. A missing
/// alpha channel is opaque.
pub fn parse_color(text: &str) -> Result<Rgba, CodecError> {
    let invalid = || CodecError::InvalidColorFormat(text.to_string());

    let digits = text.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !(digits.len() == 6 || digits.len() == 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if digits.len() == 8 { channel(6)? } else { 0xFF };
    Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

pub fn format_color(color: &Rgba) -> String {
    format!("#{:02X}{:02X}{:02X}{:02X}", color.r, color.g, color.b, color.a)
}

pub fn encode_color(span: &PageSpan, text: &str) -> Result<PageData, CodecError> {
    if span.count != 1 {
        return Err(CodecError::SpanSizeMismatch {
            expected: 1,
            actual: span.count,
        });
    }
    Ok(parse_color(text)?.to_page())
}

/// Always the 8-digit form; alpha is never dropped.
pub fn decode_color(page: PageData) -> String {
    format_color(&Rgba::from_page(page))
}

/// Uppercase `#RRGGBBAA` form of a color string.
pub fn normalize_color_full(text: &str) -> Result<String, CodecError> {
    parse_color(text).map(|c| format_color(&c))
}

/// Whether two colors agree on their RGB channels, ignoring alpha.
pub fn same_rgb(a: &str, b: &str) -> Result<bool, CodecError> {
    let (a, b) = (parse_color(a)?, parse_color(b)?);
    Ok((a.r, a.g, a.b) == (b.r, b.g, b.b))
}
