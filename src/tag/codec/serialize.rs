use crate::tag::types::PageData;

/// Trait for serializing and deserializing a value to and from exactly one
/// tag page.
pub trait PageSerialize {
    fn to_page(&self) -> PageData;
    fn from_page(page: PageData) -> Self;
}

/// 16-bit value stored low byte first in bytes 0-1 of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LittleEndianU16(pub u16);

/// 16-bit value stored high byte first in bytes 0-1 of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigEndianU16(pub u16);

impl PageSerialize for LittleEndianU16 {
    fn to_page(&self) -> PageData {
        let [lo, hi] = self.0.to_le_bytes();
        [lo, hi, 0, 0]
    }

    fn from_page(page: PageData) -> Self {
        Self(u16::from_le_bytes([page[0], page[1]]))
    }
}

impl PageSerialize for BigEndianU16 {
    fn to_page(&self) -> PageData {
        let [hi, lo] = self.0.to_be_bytes();
        [hi, lo, 0, 0]
    }

    fn from_page(page: PageData) -> Self {
        Self(u16::from_be_bytes([page[0], page[1]]))
    }
}

/// An RGBA color, one byte per channel, stored in `[R, G, B, A]` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }
}

impl PageSerialize for Rgba {
    fn to_page(&self) -> PageData {
        [self.r, self.g, self.b, self.a]
    }

    fn from_page(page: PageData) -> Self {
        let [r, g, b, a] = page;
        Self { r, g, b, a }
    }
}
