//! Built-in layout of a filament spool tag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tag::error::SchemaError;
use crate::tag::types::{PageId, DEFAULT_MAX_PAGE};

use super::field::{Endianness, Field, FieldId, FieldKind};
use super::span::PageSpan;
use super::table::Schema;

const LE: FieldKind = FieldKind::U16(Endianness::Little);

pub const FILAMENT_FIELDS: [Field; 14] = [
    Field::new(FieldId::Sku, PageSpan::new(0x05, 5), FieldKind::Ascii),
    Field::new(FieldId::Manufacturer, PageSpan::single(0x10), FieldKind::Ascii),
    Field::new(FieldId::DiameterCenti, PageSpan::single(0x11), LE),
    Field::new(FieldId::NozzleMin, PageSpan::single(0x12), LE),
    Field::new(FieldId::NozzleMax, PageSpan::single(0x13), LE),
    Field::new(FieldId::BedMin, PageSpan::single(0x14), LE),
    // Two pages, so TYPE and BED_MAX keep their own pages.
    Field::new(FieldId::Material, PageSpan::new(0x15, 2), FieldKind::Ascii),
    Field::new(FieldId::Type, PageSpan::single(0x17), FieldKind::Ascii),
    Field::new(FieldId::BedMax, PageSpan::single(0x18), LE),
    Field::new(FieldId::Color, PageSpan::single(0x20), FieldKind::RgbaColor),
    Field::new(FieldId::RangeA, PageSpan::single(0x21), LE),
    Field::new(FieldId::RangeB, PageSpan::single(0x22), LE),
    Field::new(FieldId::RangeC, PageSpan::single(0x23), LE),
    Field::new(FieldId::WeightGrams, PageSpan::single(0x31), LE),
];

pub const FILAMENT_LABELS: [(PageId, &str); 14] = [
    (0x05, "SKU (part 1)"),
    (0x10, "Manufacturer / Vendor"),
    (0x11, "Filament Diameter (centi-mm)"),
    (0x12, "NozzleTemp Min (°C)"),
    (0x13, "NozzleTemp Max (°C)"),
    (0x14, "BedTemp Min (°C)"),
    (0x15, "Material"),
    (0x17, "Filament Type"),
    (0x18, "BedTemp Max (°C)"),
    (0x20, "Color (RGBA)"),
    (0x21, "Range A"),
    (0x22, "Range B"),
    (0x23, "Range C"),
    (0x31, "Filament Weight (g)"),
];

pub const UNKNOWN_LABEL: &str = "Unknown";

impl Schema {
    /// The built-in filament layout over pages `0..=63`.
    pub fn filament() -> Result<Schema, SchemaError> {
        Schema::new(FILAMENT_FIELDS, DEFAULT_MAX_PAGE)
    }
}

/// Human readable row names, keyed by page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageLabels(BTreeMap<PageId, String>);

impl PageLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filament() -> Self {
        FILAMENT_LABELS
            .iter()
            .map(|(page, label)| (*page, label.to_string()))
            .collect()
    }

    pub fn insert(&mut self, page: PageId, label: impl Into<String>) {
        self.0.insert(page, label.into());
    }

    /// Label for `page`, or `"Unknown"`.
    pub fn label(&self, page: PageId) -> &str {
        self.0.get(&page).map(String::as_str).unwrap_or(UNKNOWN_LABEL)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PageId, String)> for PageLabels {
    fn from_iter<T: IntoIterator<Item = (PageId, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
