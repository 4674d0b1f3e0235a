use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use log::trace;

use crate::tag::error::RangeError;
use crate::tag::schema::{PageSpan, Schema};
use crate::tag::types::{PageData, PageId, PageMap, DEFAULT_MAX_PAGE, PAGE_SIZE};

use super::page_row::{PageRow, TriState};

/// Authoritative table of page rows, enumerated in page order.
///
/// Rows are created the first time a page is touched and are never removed;
/// `reset` blanks them in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStore {
    rows: BTreeMap<PageId, PageRow>,
    max_page: PageId,
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGE)
    }
}

impl PageStore {
    pub fn new(max_page: PageId) -> Self {
        Self {
            rows: BTreeMap::new(),
            max_page,
        }
    }

    pub fn max_page(&self) -> PageId {
        self.max_page
    }

    fn check_page(&self, page: PageId) -> Result<(), RangeError> {
        if page > self.max_page {
            Err(RangeError::PageOutOfRange {
                page,
                max: self.max_page,
            })
        } else {
            Ok(())
        }
    }

    fn row_mut(&mut self, page: PageId) -> Result<&mut PageRow, RangeError> {
        self.check_page(page)?;
        Ok(self.rows.entry(page).or_default())
    }

    /// Create blank rows for every page in `pages` that has none yet. A range
    /// reaching past `max_page` creates nothing.
    pub fn ensure_rows(&mut self, pages: RangeInclusive<PageId>) -> Result<(), RangeError> {
        if !pages.is_empty() {
            self.check_page(*pages.end())?;
        }
        for page in pages {
            self.row_mut(page)?;
        }
        Ok(())
    }

    pub fn row(&self, page: PageId) -> Option<&PageRow> {
        self.rows.get(&page)
    }

    pub fn bytes(&self, page: PageId) -> Option<PageData> {
        self.rows.get(&page).map(|row| row.bytes)
    }

    pub fn contains(&self, page: PageId) -> bool {
        self.rows.contains_key(&page)
    }

    pub fn is_selected(&self, page: PageId) -> bool {
        self.rows.get(&page).is_some_and(|row| row.apply_selected)
    }

    /// Overwrite a row's bytes. Selection is left as is.
    pub fn set_bytes(&mut self, page: PageId, bytes: PageData) -> Result<(), RangeError> {
        trace!("set page {:#04x} to {:02X?}", page, bytes);
        self.row_mut(page)?.bytes = bytes;
        Ok(())
    }

    /// Overwrite a single byte of a row.
    pub fn set_byte(&mut self, page: PageId, offset: usize, byte: u8) -> Result<(), RangeError> {
        if offset >= PAGE_SIZE {
            return Err(RangeError::OffsetOutOfRange(offset));
        }
        self.row_mut(page)?.bytes[offset] = byte;
        Ok(())
    }

    pub fn set_apply(&mut self, page: PageId, selected: bool) -> Result<(), RangeError> {
        self.row_mut(page)?.apply_selected = selected;
        Ok(())
    }

    /// Set the selection of every existing row.
    pub fn set_apply_all(&mut self, selected: bool) {
        for row in self.rows.values_mut() {
            row.apply_selected = selected;
        }
    }

    /// `Checked` only if rows exist and all are selected. An empty store is
    /// `Unchecked`.
    pub fn aggregate_apply_state(&self) -> TriState {
        let selected = self.rows.values().filter(|row| row.apply_selected).count();
        match selected {
            0 => TriState::Unchecked,
            n if n == self.rows.len() => TriState::Checked,
            _ => TriState::Partial,
        }
    }

    /// Select every row holding non-zero bytes. Blank rows keep their
    /// selection.
    pub fn mark_changed_rows(&mut self) {
        for row in self.rows.values_mut().filter(|row| !row.is_blank()) {
            row.apply_selected = true;
        }
    }

    /// Flag and select every existing row that starts a schema field.
    pub fn mark_known_fields(&mut self, schema: &Schema) {
        for (page, row) in self.rows.iter_mut() {
            if schema.is_field_start(*page) {
                row.is_known_field = true;
                row.apply_selected = true;
            }
        }
    }

    /// Blank every row and clear its selection. The row set is kept.
    pub fn reset(&mut self) {
        for row in self.rows.values_mut() {
            row.clear();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageId, &PageRow)> + '_ {
        self.rows.iter().map(|(page, row)| (*page, row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bytes of every row.
    pub fn snapshot(&self) -> PageMap {
        self.iter().map(|(page, row)| (page, row.bytes)).collect()
    }

    /// Bytes of every selected row.
    pub fn selected(&self) -> PageMap {
        self.iter()
            .filter(|(_, row)| row.apply_selected)
            .map(|(page, row)| (page, row.bytes))
            .collect()
    }

    /// Bytes of the existing rows inside `span`.
    pub fn span_pages(&self, span: &PageSpan) -> PageMap {
        self.rows
            .range(span.pages())
            .map(|(page, row)| (*page, row.bytes))
            .collect()
    }
}
