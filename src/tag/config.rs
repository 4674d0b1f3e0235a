//! Tag layout loaded once at startup.
//!
//! Spans are read as signed integers so a negative start or a zero count is
//! reported as a `SchemaError` rather than a JSON type error.

use std::io::Read;

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, SchemaError};
use super::schema::{Field, FieldId, FieldKind, PageLabels, PageSpan, Schema, FILAMENT_FIELDS};
use super::types::{PageId, DEFAULT_COLOR_PAGE, DEFAULT_MAX_PAGE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub field: FieldId,
    pub start: i64,
    pub count: i64,
    pub kind: FieldKind,
}

impl FieldConfig {
    fn to_field(&self) -> Result<Field, SchemaError> {
        let start = PageId::try_from(self.start).map_err(|_| SchemaError::NegativeStart {
            field: self.field,
            start: self.start,
        })?;
        let count = match u32::try_from(self.count) {
            Ok(0) => return Err(SchemaError::ZeroPageCount(self.field)),
            Ok(count) => count,
            Err(_) => {
                return Err(SchemaError::InvalidPageCount {
                    field: self.field,
                    count: self.count,
                })
            }
        };
        Ok(Field::new(self.field, PageSpan::new(start, count), self.kind))
    }
}

impl From<&Field> for FieldConfig {
    fn from(field: &Field) -> Self {
        Self {
            field: field.id,
            start: i64::from(field.span.start),
            count: i64::from(field.span.count),
            kind: field.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagLayoutConfig {
    pub max_page: PageId,
    pub color_page: PageId,
    pub fields: Vec<FieldConfig>,
    pub labels: PageLabels,
}

impl Default for TagLayoutConfig {
    /// The built-in filament layout.
    fn default() -> Self {
        Self {
            max_page: DEFAULT_MAX_PAGE,
            color_page: DEFAULT_COLOR_PAGE,
            fields: FILAMENT_FIELDS.iter().map(FieldConfig::from).collect(),
            labels: PageLabels::filament(),
        }
    }
}

/// A validated layout.
#[derive(Debug, Clone)]
pub struct TagLayout {
    pub schema: Schema,
    pub labels: PageLabels,
    pub color_page: PageId,
    pub max_page: PageId,
}

impl TagLayoutConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the layout and build its schema.
    ///
    /// When the schema has color fields, `color_page` must start one of them.
    pub fn into_layout(self) -> Result<TagLayout, ConfigError> {
        if self.color_page > self.max_page {
            return Err(SchemaError::InvalidColorPage(self.color_page).into());
        }
        let fields = self
            .fields
            .iter()
            .map(FieldConfig::to_field)
            .collect::<Result<Vec<_>, _>>()?;
        let schema = Schema::new(fields, self.max_page)?;
        let color_starts: Vec<PageId> = schema
            .iter()
            .filter(|f| f.kind == FieldKind::RgbaColor)
            .map(|f| f.span.start)
            .collect();
        if !color_starts.is_empty() && !color_starts.contains(&self.color_page) {
            return Err(SchemaError::InvalidColorPage(self.color_page).into());
        }
        debug!(
            "layout loaded: {} fields, {} labels, color page {:#04x}",
            schema.len(),
            self.labels.len(),
            self.color_page
        );

        Ok(TagLayout {
            schema,
            labels: self.labels,
            color_page: self.color_page,
            max_page: self.max_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::schema::Endianness;
    use rstest::rstest;

    #[rstest]
    fn test_default_matches_builtin_schema() {
        let layout = TagLayoutConfig::default().into_layout().unwrap();
        assert_eq!(layout.schema, Schema::filament().unwrap());
        assert_eq!(layout.color_page, 0x20);
        assert_eq!(layout.labels.label(0x05), "SKU (part 1)");
    }

    #[rstest]
    fn test_from_json() {
        let json = r#"{
            "max_page": 40,
            "color_page": 32,
            "fields": [
                {"field": "sku", "start": 5, "count": 5, "kind": "ascii"},
                {"field": "nozzle_min", "start": 18, "count": 1, "kind": {"u16": "big"}},
                {"field": "color", "start": 32, "count": 1, "kind": "rgba_color"}
            ],
            "labels": {"5": "SKU", "32": "Color"}
        }"#;

        let layout = TagLayoutConfig::from_json_str(json).unwrap().into_layout().unwrap();

        assert_eq!(layout.max_page, 40);
        assert_eq!(layout.schema.len(), 3);
        assert_eq!(
            layout.schema.field(FieldId::NozzleMin).unwrap().kind,
            FieldKind::U16(Endianness::Big)
        );
        assert_eq!(layout.labels.label(32), "Color");
        assert_eq!(layout.labels.label(18), "Unknown");
    }

    #[rstest]
    fn test_missing_sections_use_defaults() {
        let config = TagLayoutConfig::from_json_str(r#"{"max_page": 63}"#).unwrap();
        assert_eq!(config, TagLayoutConfig::default());
    }

    #[rstest]
    #[case(r#"{"field": "sku", "start": -1, "count": 5, "kind": "ascii"}"#, SchemaError::NegativeStart { field: FieldId::Sku, start: -1 })]
    #[case(r#"{"field": "sku", "start": 5, "count": 0, "kind": "ascii"}"#, SchemaError::ZeroPageCount(FieldId::Sku))]
    #[case(r#"{"field": "sku", "start": 5, "count": -2, "kind": "ascii"}"#, SchemaError::InvalidPageCount { field: FieldId::Sku, count: -2 })]
    #[case(r#"{"field": "sku", "start": 4294967295, "count": 2, "kind": "ascii"}"#, SchemaError::OutOfBounds { field: FieldId::Sku, end: PageId::MAX, max: 63 })]
    fn test_invalid_spans(#[case] field: &str, #[case] expected: SchemaError) {
        let json = format!(r#"{{"fields": [{}]}}"#, field);
        let result = TagLayoutConfig::from_json_str(&json).unwrap().into_layout();
        assert!(matches!(result, Err(ConfigError::Schema(e)) if e == expected));
    }

    #[rstest]
    fn test_overlap_reported() {
        let json = r#"{"fields": [
            {"field": "material", "start": 21, "count": 8, "kind": "ascii"},
            {"field": "bed_max", "start": 24, "count": 1, "kind": {"u16": "little"}}
        ]}"#;
        let result = TagLayoutConfig::from_json_str(json).unwrap().into_layout();
        assert!(matches!(
            result,
            Err(ConfigError::Schema(SchemaError::Overlap(FieldId::Material, FieldId::BedMax)))
        ));
    }

    #[rstest]
    fn test_color_page_beyond_last_page() {
        let config = TagLayoutConfig {
            max_page: 16,
            fields: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.into_layout(),
            Err(ConfigError::Schema(SchemaError::InvalidColorPage(0x20)))
        ));
    }

    #[rstest]
    fn test_color_page_must_start_a_color_field() {
        let json = r#"{
            "color_page": 33,
            "fields": [{"field": "color", "start": 32, "count": 1, "kind": "rgba_color"}]
        }"#;
        let result = TagLayoutConfig::from_json_str(json).unwrap().into_layout();
        assert!(matches!(
            result,
            Err(ConfigError::Schema(SchemaError::InvalidColorPage(33)))
        ));
    }

    #[rstest]
    fn test_malformed_json() {
        assert!(matches!(
            TagLayoutConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[rstest]
    fn test_json_round_trip() {
        let config = TagLayoutConfig::default();
        let json = config.to_json_string().unwrap();
        let parsed = TagLayoutConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(parsed, config);
    }
}
