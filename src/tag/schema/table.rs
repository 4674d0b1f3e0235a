use log::debug;

use crate::tag::error::SchemaError;
use crate::tag::types::PageId;

use super::field::{Field, FieldId};

/// Validated, read-only table of fields.
///
/// Spans are non-empty, pairwise disjoint, and lie within `0..=max_page`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Sorted by span start
    fields: Vec<Field>,
    max_page: PageId,
}

impl Schema {
    pub fn new(
        fields: impl IntoIterator<Item = Field>,
        max_page: PageId,
    ) -> Result<Self, SchemaError> {
        let mut fields: Vec<Field> = fields.into_iter().collect();

        for (i, field) in fields.iter().enumerate() {
            if field.span.count < 1 {
                return Err(SchemaError::ZeroPageCount(field.id));
            }
            if fields[..i].iter().any(|f| f.id == field.id) {
                return Err(SchemaError::DuplicateField(field.id));
            }
            match field.span.checked_end() {
                Some(end) if end <= max_page => {}
                end => {
                    return Err(SchemaError::OutOfBounds {
                        field: field.id,
                        end: end.unwrap_or(PageId::MAX),
                        max: max_page,
                    })
                }
            }
        }

        fields.sort_by_key(|f| f.span.start);
        for pair in fields.windows(2) {
            if pair[0].span.overlaps(&pair[1].span) {
                return Err(SchemaError::Overlap(pair[0].id, pair[1].id));
            }
        }

        debug!("schema built with {} fields up to page {}", fields.len(), max_page);
        Ok(Self { fields, max_page })
    }

    pub fn max_page(&self) -> PageId {
        self.max_page
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        FieldId::from_name(name).and_then(|id| self.field(id))
    }

    /// The field whose span begins at `page`, if any.
    pub fn field_starting_at(&self, page: PageId) -> Option<&Field> {
        self.fields.iter().find(|f| f.span.start == page)
    }

    /// The field whose span covers `page`, if any.
    pub fn field_covering(&self, page: PageId) -> Option<&Field> {
        self.fields.iter().find(|f| f.span.contains(page))
    }

    pub fn is_field_start(&self, page: PageId) -> bool {
        self.field_starting_at(page).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::schema::{Endianness, FieldKind, PageSpan};
    use rstest::rstest;

    fn ascii(id: FieldId, start: PageId, count: u32) -> Field {
        Field::new(id, PageSpan::new(start, count), FieldKind::Ascii)
    }

    #[rstest]
    fn test_lookup() {
        let schema = Schema::new(
            [
                ascii(FieldId::Sku, 5, 5),
                Field::new(FieldId::Color, PageSpan::single(0x20), FieldKind::RgbaColor),
                Field::new(
                    FieldId::NozzleMin,
                    PageSpan::single(0x12),
                    FieldKind::U16(Endianness::Little),
                ),
            ],
            63,
        )
        .unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.field(FieldId::Color).unwrap().span.start, 0x20);
        assert_eq!(schema.field_by_name("nozzle_min").unwrap().id, FieldId::NozzleMin);
        assert_eq!(schema.field_starting_at(5).unwrap().id, FieldId::Sku);
        assert!(schema.field_starting_at(6).is_none());
        assert_eq!(schema.field_covering(9).unwrap().id, FieldId::Sku);
        assert!(schema.is_field_start(0x12));
        assert!(!schema.is_field_start(0x13));

        let starts: Vec<PageId> = schema.iter().map(|f| f.span.start).collect();
        assert_eq!(starts, vec![5, 0x12, 0x20]);
    }

    #[rstest]
    fn test_zero_count_rejected() {
        let result = Schema::new([ascii(FieldId::Sku, 5, 0)], 63);
        assert_eq!(result, Err(SchemaError::ZeroPageCount(FieldId::Sku)));
    }

    #[rstest]
    fn test_overlap_rejected() {
        let result = Schema::new(
            [ascii(FieldId::Material, 0x15, 8), ascii(FieldId::Type, 0x17, 1)],
            63,
        );
        assert_eq!(result, Err(SchemaError::Overlap(FieldId::Material, FieldId::Type)));
    }

    #[rstest]
    fn test_duplicate_rejected() {
        let result = Schema::new([ascii(FieldId::Sku, 5, 1), ascii(FieldId::Sku, 9, 1)], 63);
        assert_eq!(result, Err(SchemaError::DuplicateField(FieldId::Sku)));
    }

    #[rstest]
    fn test_span_past_last_page_id_rejected() {
        let result = Schema::new([ascii(FieldId::Sku, PageId::MAX, 2)], 63);
        assert_eq!(
            result,
            Err(SchemaError::OutOfBounds {
                field: FieldId::Sku,
                end: PageId::MAX,
                max: 63
            })
        );
    }

    #[rstest]
    fn test_out_of_bounds_rejected() {
        let result = Schema::new([ascii(FieldId::Sku, 62, 5)], 63);
        assert_eq!(
            result,
            Err(SchemaError::OutOfBounds {
                field: FieldId::Sku,
                end: 66,
                max: 63
            })
        );
    }
}
