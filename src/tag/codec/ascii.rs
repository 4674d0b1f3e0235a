use crate::tag::error::CodecError;
use crate::tag::schema::PageSpan;
use crate::tag::types::{PageData, PageMap, PAGE_SIZE, ZERO_PAGE};

pub const PRINTABLE: std::ops::RangeInclusive<u8> = 0x20..=0x7E;

pub fn is_printable(byte: u8) -> bool {
    PRINTABLE.contains(&byte)
}

fn ascii_bytes(text: &str) -> Result<&[u8], CodecError> {
    if text.is_ascii() {
        Ok(text.as_bytes())
    } else {
        Err(CodecError::NonAsciiCharacter)
    }
}

/// Lay `text` out over every page of `span`, 4 bytes per page.
///
/// Short text is zero padded; text longer than the span is truncated.
pub fn encode_ascii(span: &PageSpan, text: &str) -> Result<PageMap, CodecError> {
    let raw = ascii_bytes(text)?;
    let raw = &raw[..raw.len().min(span.capacity())];

    let mut chunks = raw.chunks(PAGE_SIZE);
    Ok(span
        .pages()
        .map(|page| {
            let mut data = ZERO_PAGE;
            if let Some(chunk) = chunks.next() {
                data[..chunk.len()].copy_from_slice(chunk);
            }
            (page, data)
        })
        .collect())
}

/// Read the text stored over `span`. Missing pages read as zero.
///
/// Trailing zero padding is stripped. If anything left is not printable
/// ASCII the result is empty.
pub fn decode_ascii(span: &PageSpan, pages: &PageMap) -> String {
    let mut raw: Vec<u8> = span
        .pages()
        .flat_map(|page| pages.get(&page).copied().unwrap_or(ZERO_PAGE))
        .collect();
    while raw.last() == Some(&0) {
        raw.pop();
    }
    if raw.iter().all(|b| is_printable(*b)) {
        raw.into_iter().map(char::from).collect()
    } else {
        String::new()
    }
}

/// Literal text to one page: truncated or zero padded to 4 bytes.
pub fn ascii_to_page(text: &str) -> Result<PageData, CodecError> {
    let raw = ascii_bytes(text)?;
    let mut data = ZERO_PAGE;
    let len = raw.len().min(PAGE_SIZE);
    data[..len].copy_from_slice(&raw[..len]);
    Ok(data)
}

/// Render bytes as text, substituting `placeholder` for anything not
/// printable.
pub fn render_printable(bytes: &[u8], placeholder: char) -> String {
    bytes
        .iter()
        .map(|b| if is_printable(*b) { char::from(*b) } else { placeholder })
        .collect()
}

/// Alphanumeric part of a SKU before the first `-`, e.g. `AHHSCG-101` gives
/// `AHHSCG`.
pub fn sku_base(sku: &str) -> String {
    sku.split('-')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
