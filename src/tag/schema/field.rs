use std::fmt;

use serde::{Deserialize, Serialize};

use super::span::PageSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// How a field's bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Ascii,
    U16(Endianness),
    RgbaColor,
}

/// Closed set of logical fields a filament tag can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Sku,
    Manufacturer,
    DiameterCenti,
    NozzleMin,
    NozzleMax,
    BedMin,
    Material,
    Type,
    BedMax,
    Color,
    RangeA,
    RangeB,
    RangeC,
    WeightGrams,
}

impl FieldId {
    pub const ALL: [FieldId; 14] = [
        FieldId::Sku,
        FieldId::Manufacturer,
        FieldId::DiameterCenti,
        FieldId::NozzleMin,
        FieldId::NozzleMax,
        FieldId::BedMin,
        FieldId::Material,
        FieldId::Type,
        FieldId::BedMax,
        FieldId::Color,
        FieldId::RangeA,
        FieldId::RangeB,
        FieldId::RangeC,
        FieldId::WeightGrams,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldId::Sku => "SKU",
            FieldId::Manufacturer => "MANUFACTURER",
            FieldId::DiameterCenti => "DIAMETER_CENTI",
            FieldId::NozzleMin => "NOZZLE_MIN",
            FieldId::NozzleMax => "NOZZLE_MAX",
            FieldId::BedMin => "BED_MIN",
            FieldId::Material => "MATERIAL",
            FieldId::Type => "TYPE",
            FieldId::BedMax => "BED_MAX",
            FieldId::Color => "COLOR",
            FieldId::RangeA => "RANGE_A",
            FieldId::RangeB => "RANGE_B",
            FieldId::RangeC => "RANGE_C",
            FieldId::WeightGrams => "WEIGHT_G",
        }
    }

    /// Resolve a field by name, ignoring case. `VENDOR` is an alias of
    /// `MANUFACTURER`.
    pub fn from_name(name: &str) -> Option<FieldId> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("VENDOR") {
            return Some(FieldId::Manufacturer);
        }
        FieldId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    pub id: FieldId,
    pub span: PageSpan,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(id: FieldId, span: PageSpan, kind: FieldKind) -> Self {
        Self { id, span, kind }
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}
