use log::{debug, trace};

use crate::tag::error::{RangeError, TagError};
use crate::tag::schema::{PageSpan, Schema};
use crate::tag::store::PageStore;
use crate::tag::types::{PageData, PageId, PageMap, PAGE_SIZE, ZERO_PAGE};

use super::profile::FilamentProfile;

/// Cut `data` into zero padded pages starting at `start`. Chunks past
/// `PageId::MAX` are dropped.
fn chunk_pages(start: PageId, data: &[u8]) -> impl Iterator<Item = (PageId, PageData)> + '_ {
    data.chunks(PAGE_SIZE).zip(start..=PageId::MAX).map(|(chunk, page)| {
        let mut bytes = ZERO_PAGE;
        bytes[..chunk.len()].copy_from_slice(chunk);
        (page, bytes)
    })
}

/// Merges externally computed page bytes into a `PageStore`.
///
/// Only pages named by a mapping are written; every other row keeps its
/// bytes and selection.
pub struct StagingController {
    schema: Schema,
}

impl StagingController {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Write every page in `mapping`, selecting exactly those pages when
    /// `mark_changed` is set. Pages past the end of the store are skipped, so
    /// a dump from a larger tag stages its leading pages. Returns the number
    /// of pages written.
    pub fn stage_pages(
        &self,
        store: &mut PageStore,
        mapping: &PageMap,
        mark_changed: bool,
    ) -> Result<usize, RangeError> {
        let max_page = store.max_page();
        let skipped = mapping.keys().filter(|page| **page > max_page).count();
        if skipped > 0 {
            debug!("skipping {} pages past page {:#04x}", skipped, max_page);
        }

        let mut written = 0;
        for (&page, &bytes) in mapping.range(..=max_page) {
            store.set_bytes(page, bytes)?;
            if mark_changed {
                store.set_apply(page, true)?;
            }
            written += 1;
        }
        debug!("staged {} pages (mark_changed={})", written, mark_changed);
        Ok(written)
    }

    /// Spread `data` over the pages of `span`, 4 bytes per page. Stops when
    /// the data or the span runs out.
    pub fn stage_span(
        &self,
        store: &mut PageStore,
        span: &PageSpan,
        data: &[u8],
        mark_changed: bool,
    ) -> Result<usize, RangeError> {
        let data = &data[..data.len().min(span.capacity())];
        let mapping: PageMap = chunk_pages(span.start, data).collect();
        self.stage_pages(store, &mapping, mark_changed)
    }

    /// Spread `data` over consecutive pages from `start`. Data that runs past
    /// the end of the store is dropped.
    pub fn stage_from(
        &self,
        store: &mut PageStore,
        start: PageId,
        data: &[u8],
        mark_changed: bool,
    ) -> Result<usize, RangeError> {
        let Some(room) = store.max_page().checked_sub(start) else {
            debug!("stage from {:#04x} is past the end of the store", start);
            return Ok(0);
        };
        let limit = (room as usize).saturating_add(1).saturating_mul(PAGE_SIZE);
        let mapping: PageMap = chunk_pages(start, &data[..data.len().min(limit)]).collect();
        self.stage_pages(store, &mapping, mark_changed)
    }

    /// Fill consecutive pages from `start` without selecting them.
    ///
    /// Unless `override_existing` is set, only blank rows are filled. Pages
    /// past the end of the store are dropped. Returns the number of pages
    /// written.
    pub fn prefill(
        &self,
        store: &mut PageStore,
        start: PageId,
        data: &[u8],
        override_existing: bool,
        max_pages: Option<usize>,
    ) -> Result<usize, RangeError> {
        let limit = max_pages.map_or(data.len(), |pages| pages.saturating_mul(PAGE_SIZE));
        let data = &data[..data.len().min(limit)];

        let mut written = 0;
        for (page, bytes) in chunk_pages(start, data) {
            if page > store.max_page() {
                break;
            }
            let blank = store.row(page).map_or(true, |row| row.is_blank());
            if override_existing || blank {
                store.set_bytes(page, bytes)?;
                written += 1;
            } else {
                trace!("prefill keeps edited page {:#04x}", page);
            }
        }
        Ok(written)
    }

    /// Encode `profile` against the schema and stage the result.
    pub fn stage_profile(
        &self,
        store: &mut PageStore,
        profile: &FilamentProfile,
        mark_changed: bool,
    ) -> Result<usize, TagError> {
        let mapping = profile.to_pages(&self.schema)?;
        Ok(self.stage_pages(store, &mapping, mark_changed)?)
    }

    pub fn read_profile(&self, store: &PageStore) -> FilamentProfile {
        FilamentProfile::decode(&self.schema, store)
    }
}
