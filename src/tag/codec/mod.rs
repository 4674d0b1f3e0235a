//! Pure conversions between typed field values and page bytes.

pub mod ascii;
pub mod color;
pub mod hex;
pub mod numeric;
pub mod serialize;

pub use ascii::{ascii_to_page, decode_ascii, encode_ascii, render_printable, sku_base};
pub use color::{decode_color, encode_color, normalize_color_full, parse_color, same_rgb};
pub use hex::{format_hex, parse_hex_cell, parse_hex_stream};
pub use numeric::{decode_u16, encode_u16};
pub use serialize::{BigEndianU16, LittleEndianU16, PageSerialize, Rgba};
