use std::collections::BTreeSet;

use log::{debug, warn};

use crate::tag::codec::{
    ascii_to_page, decode_color, encode_color, format_hex, parse_hex_cell, render_printable,
};
use crate::tag::config::TagLayout;
use crate::tag::error::TagError;
use crate::tag::schema::{FieldKind, PageLabels, PageSpan, Schema};
use crate::tag::store::PageStore;
use crate::tag::types::{PageData, PageId, PAGE_SIZE, ZERO_PAGE};

/// Stands in for non-printable bytes in the text view.
pub const TEXT_PLACEHOLDER: char = '.';

/// Which view of a row an edit came from.
///
/// The engine derives the other view from it and never feeds its own output
/// back in as a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSource {
    /// One hex cell changed
    FromByte { offset: usize, value: u8 },
    /// All four hex cells changed
    FromBytes(PageData),
    /// The text cell changed
    FromText(String),
}

/// Both views of a row after an edit, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub page: PageId,
    pub caption: String,
    pub label: String,
    pub hex: [String; PAGE_SIZE],
    pub text: String,
    pub apply_selected: bool,
}

pub struct SyncEngine {
    color_pages: BTreeSet<PageId>,
    labels: PageLabels,
}

impl SyncEngine {
    pub fn new(labels: PageLabels, color_pages: impl IntoIterator<Item = PageId>) -> Self {
        Self {
            color_pages: color_pages.into_iter().collect(),
            labels,
        }
    }

    /// Engine whose color pages are the starts of every RGBA field in
    /// `schema`.
    pub fn from_schema(schema: &Schema, labels: PageLabels) -> Self {
        let color_pages = schema
            .iter()
            .filter(|f| f.kind == FieldKind::RgbaColor)
            .map(|f| f.span.start);
        Self::new(labels, color_pages)
    }

    /// Engine for a loaded layout: its labels and its color page.
    pub fn from_layout(layout: &TagLayout) -> Self {
        let mut engine = Self::from_schema(&layout.schema, layout.labels.clone());
        engine.color_pages.insert(layout.color_page);
        engine
    }

    pub fn is_color_page(&self, page: PageId) -> bool {
        self.color_pages.contains(&page)
    }

    pub fn labels(&self) -> &PageLabels {
        &self.labels
    }

    /// Text view of `bytes` as shown on `page`.
    pub fn render_text(&self, page: PageId, bytes: PageData) -> String {
        if self.is_color_page(page) {
            return decode_color(bytes);
        }
        let len = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        render_printable(&bytes[..len], TEXT_PLACEHOLDER)
    }

    /// Bytes a text edit on `page` stands for.
    ///
    /// Color pages try `#RRGGBB[AA]` first and fall back to literal text.
    pub fn parse_text(&self, page: PageId, text: &str) -> Result<PageData, TagError> {
        if self.is_color_page(page) {
            if let Ok(bytes) = encode_color(&PageSpan::single(page), text) {
                return Ok(bytes);
            }
        }
        Ok(ascii_to_page(text)?)
    }

    /// Apply one edit to `page` and return both views. A rejected edit leaves
    /// the store untouched.
    pub fn apply(
        &self,
        store: &mut PageStore,
        page: PageId,
        edit: EditSource,
    ) -> Result<RowView, TagError> {
        debug!("edit on page {:#04x}: {:?}", page, edit);
        let result = match edit {
            EditSource::FromByte { offset, value } => store
                .set_byte(page, offset, value)
                .map_err(TagError::from)
                .map(|_| None),
            EditSource::FromBytes(bytes) => store
                .set_bytes(page, bytes)
                .map_err(TagError::from)
                .map(|_| None),
            EditSource::FromText(text) => self
                .parse_text(page, &text)
                .and_then(|bytes| Ok(store.set_bytes(page, bytes)?))
                .map(|_| Some(text)),
        };

        let typed_text = match result {
            Ok(text) => text,
            Err(e) => {
                warn!("rejected edit on page {:#04x}: {}", page, e);
                return Err(e);
            }
        };
        store.set_apply(page, true)?;

        let mut view = self.view(store, page);
        if let Some(text) = typed_text {
            view.text = text;
        }
        Ok(view)
    }

    /// Parse a hex cell and apply it as a byte edit.
    pub fn apply_hex_cell(
        &self,
        store: &mut PageStore,
        page: PageId,
        offset: usize,
        text: &str,
    ) -> Result<RowView, TagError> {
        let value = parse_hex_cell(text).map_err(|e| {
            warn!("rejected hex cell on page {:#04x}: {}", page, e);
            TagError::from(e)
        })?;
        self.apply(store, page, EditSource::FromByte { offset, value })
    }

    /// Current views of `page`. A page without a row shows as blank.
    pub fn view(&self, store: &PageStore, page: PageId) -> RowView {
        let row = store.row(page).copied().unwrap_or_default();
        RowView {
            page,
            caption: format!("0x{:02X}  ({})", page, page),
            label: self.labels.label(page).to_string(),
            hex: row.bytes.map(|b| format_hex(&[b])),
            text: self.render_text(page, row.bytes),
            apply_selected: row.apply_selected,
        }
    }

    /// Views of every row in the store, in page order.
    pub fn views(&self, store: &PageStore) -> Vec<RowView> {
        store.iter().map(|(page, _)| self.view(store, page)).collect()
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new(PageLabels::filament(), [crate::tag::types::DEFAULT_COLOR_PAGE])
    }
}
