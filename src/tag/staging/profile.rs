use log::debug;
use serde::{Deserialize, Serialize};

use crate::tag::codec::{
    decode_ascii, decode_color, decode_u16, encode_ascii, encode_color, encode_u16,
};
use crate::tag::error::{CodecError, TagError};
use crate::tag::schema::{Field, FieldId, FieldKind, PageSpan, Schema};
use crate::tag::store::PageStore;
use crate::tag::types::{PageMap, ZERO_PAGE};

pub const DEFAULT_MANUFACTURER: &str = "AC";

/// High level description of a spool, as read from a tag or picked from a
/// catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilamentProfile {
    pub sku: String,
    pub manufacturer: String,
    pub material: String,
    pub color: Option<String>,
    pub nozzle_min_c: Option<u16>,
    pub nozzle_max_c: Option<u16>,
    pub bed_min_c: Option<u16>,
    pub bed_max_c: Option<u16>,
    pub weight_g: Option<u16>,
    pub diameter_mm: Option<f64>,
}

impl FilamentProfile {
    fn manufacturer_or_default(&self) -> &str {
        match self.manufacturer.trim() {
            "" => DEFAULT_MANUFACTURER,
            name => name,
        }
    }

    /// Page bytes for every field this profile sets.
    ///
    /// Empty text and missing numbers produce no pages, so staging the
    /// result never blanks a field the profile does not know. The
    /// manufacturer always fits one page.
    pub fn to_pages(&self, schema: &Schema) -> Result<PageMap, TagError> {
        let mut pages = PageMap::new();

        let mut text = |id: FieldId, value: &str, max_pages: Option<u32>| {
            let Some(field) = schema.field(id) else {
                return Ok::<(), CodecError>(());
            };
            if value.is_empty() {
                return Ok(());
            }
            let count = max_pages.map_or(field.span.count, |n| n.min(field.span.count));
            let span = PageSpan::new(field.span.start, count);
            pages.extend(encode_ascii(&span, value)?);
            Ok(())
        };
        text(FieldId::Sku, self.sku.trim(), None)?;
        text(FieldId::Manufacturer, self.manufacturer_or_default(), Some(1))?;
        text(FieldId::Material, self.material.trim(), None)?;

        if let (Some(field), Some(color)) = (schema.field(FieldId::Color), self.color.as_deref()) {
            if !color.trim().is_empty() {
                pages.insert(field.span.start, encode_color(&field.span, color)?);
            }
        }

        let diameter_centi = self
            .diameter_mm
            .map(|mm| (mm * 100.0).round())
            .map(|centi| if centi.is_finite() { centi as i64 } else { -1 });
        let numbers = [
            (FieldId::NozzleMin, self.nozzle_min_c.map(i64::from)),
            (FieldId::NozzleMax, self.nozzle_max_c.map(i64::from)),
            (FieldId::BedMin, self.bed_min_c.map(i64::from)),
            (FieldId::BedMax, self.bed_max_c.map(i64::from)),
            (FieldId::WeightGrams, self.weight_g.map(i64::from)),
            (FieldId::DiameterCenti, diameter_centi),
        ];
        for (id, value) in numbers {
            let (Some(field), Some(value)) = (schema.field(id), value) else {
                continue;
            };
            if let FieldKind::U16(endianness) = field.kind {
                pages.insert(field.span.start, encode_u16(&field.span, value, endianness)?);
            } else {
                debug!("field {} is not numeric, skipping", id);
            }
        }

        Ok(pages)
    }

    /// Read a profile back out of `store`. Fields whose pages are absent or
    /// blank are left unset.
    pub fn decode(schema: &Schema, store: &PageStore) -> FilamentProfile {
        let text = |id: FieldId| {
            schema
                .field(id)
                .map(|f| decode_ascii(&f.span, &store.span_pages(&f.span)))
                .unwrap_or_default()
        };
        let page_of = |field: &Field| store.bytes(field.span.start).filter(|b| *b != ZERO_PAGE);
        let number = |id: FieldId| {
            let field = schema.field(id)?;
            let FieldKind::U16(endianness) = field.kind else {
                return None;
            };
            decode_u16(&field.span, page_of(field)?, endianness).ok()
        };

        FilamentProfile {
            sku: text(FieldId::Sku),
            manufacturer: text(FieldId::Manufacturer),
            material: text(FieldId::Material),
            color: schema
                .field(FieldId::Color)
                .and_then(page_of)
                .map(decode_color),
            nozzle_min_c: number(FieldId::NozzleMin),
            nozzle_max_c: number(FieldId::NozzleMax),
            bed_min_c: number(FieldId::BedMin),
            bed_max_c: number(FieldId::BedMax),
            weight_g: number(FieldId::WeightGrams),
            diameter_mm: number(FieldId::DiameterCenti).map(|centi| f64::from(centi) / 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[fixture]
    fn schema() -> Schema {
        Schema::filament().unwrap()
    }

    #[fixture]
    fn profile() -> FilamentProfile {
        FilamentProfile {
            sku: "HTPCP-101".to_string(),
            manufacturer: String::new(),
            material: "PLA".to_string(),
            color: Some("#800080".to_string()),
            nozzle_min_c: Some(190),
            nozzle_max_c: Some(230),
            bed_min_c: Some(50),
            bed_max_c: Some(60),
            weight_g: Some(1000),
            diameter_mm: Some(1.75),
        }
    }

    #[rstest]
    fn test_to_pages(schema: Schema, profile: FilamentProfile) {
        let pages = profile.to_pages(&schema).unwrap();

        assert_eq!(pages[&0x05], *b"HTPC");
        assert_eq!(pages[&0x09], ZERO_PAGE);
        assert_eq!(pages[&0x10], *b"AC\0\0");
        assert_eq!(pages[&0x15], *b"PLA\0");
        assert_eq!(pages[&0x16], ZERO_PAGE);
        assert_eq!(pages[&0x20], [0x80, 0x00, 0x80, 0xFF]);
        assert_eq!(pages[&0x11], [175, 0, 0, 0]);
        assert_eq!(pages[&0x12], [190, 0, 0, 0]);
        assert_eq!(pages[&0x13], [230, 0, 0, 0]);
        assert_eq!(pages[&0x31], [0xE8, 0x03, 0, 0]);
        assert!(!pages.contains_key(&0x17));
    }

    #[rstest]
    fn test_empty_fields_are_skipped(schema: Schema) {
        let pages = FilamentProfile::default().to_pages(&schema).unwrap();
        // only the default manufacturer
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[&0x10], *b"AC\0\0");
    }

    #[rstest]
    fn test_manufacturer_limited_to_one_page(schema: Schema) {
        let profile = FilamentProfile {
            manufacturer: "Anycubic".to_string(),
            ..Default::default()
        };
        let pages = profile.to_pages(&schema).unwrap();
        assert_eq!(pages[&0x10], *b"Anyc");
        assert!(!pages.contains_key(&0x11));
    }

    #[rstest]
    fn test_invalid_values_are_rejected(schema: Schema) {
        let bad_color = FilamentProfile {
            color: Some("purple".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_color.to_pages(&schema),
            Err(TagError::Codec(CodecError::InvalidColorFormat(_)))
        ));

        let bad_diameter = FilamentProfile {
            diameter_mm: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(
            bad_diameter.to_pages(&schema),
            Err(TagError::Codec(CodecError::OutOfRange(-100)))
        );
    }

    #[rstest]
    fn test_decode_round_trip(schema: Schema, profile: FilamentProfile) {
        let mut store = PageStore::default();
        for (page, bytes) in profile.to_pages(&schema).unwrap() {
            store.set_bytes(page, bytes).unwrap();
        }

        let decoded = FilamentProfile::decode(&schema, &store);

        assert_eq!(decoded.sku, "HTPCP-101");
        assert_eq!(decoded.manufacturer, "AC");
        assert_eq!(decoded.material, "PLA");
        assert_eq!(decoded.color.as_deref(), Some("#800080FF"));
        assert_eq!(decoded.nozzle_max_c, Some(230));
        assert_eq!(decoded.weight_g, Some(1000));
        assert_eq!(decoded.diameter_mm, Some(1.75));
    }

    #[rstest]
    fn test_decode_blank_store(schema: Schema) {
        let mut store = PageStore::default();
        store.ensure_rows(0..=63).unwrap();
        assert_eq!(FilamentProfile::decode(&schema, &store), FilamentProfile::default());
    }

    #[rstest]
    fn test_profile_from_json() {
        let json = r##"{"sku": "AHHSCG-101", "color": "#FF8000", "weight_g": 250}"##;
        let profile: FilamentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.sku, "AHHSCG-101");
        assert_eq!(profile.weight_g, Some(250));
        assert_eq!(profile.material, "");
    }
}
