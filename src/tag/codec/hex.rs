use crate::tag::error::CodecError;

fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Parse one hex cell: up to two hex digits, optional `0x` prefix. An empty
/// cell is `0x00`.
pub fn parse_hex_cell(text: &str) -> Result<u8, CodecError> {
    let digits = strip_hex_prefix(text.trim());
    if digits.is_empty() {
        return Ok(0);
    }
    if digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CodecError::InvalidHexByte(text.to_string()));
    }
    u8::from_str_radix(digits, 16).map_err(|_| CodecError::InvalidHexByte(text.to_string()))
}

/// Parse whitespace separated bytes such as `AA 0xBB cc`. Every token must be
/// exactly two hex digits.
pub fn parse_hex_stream(text: &str) -> Result<Vec<u8>, CodecError> {
    text.split_whitespace()
        .map(|token| {
            let digits = strip_hex_prefix(token);
            if digits.len() != 2 {
                return Err(CodecError::InvalidHexByte(token.to_string()));
            }
            parse_hex_cell(token)
        })
        .collect()
}

pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
