use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::tag::types::PageId;

/// A consecutive run of pages holding one logical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSpan {
    pub start: PageId,
    pub count: u32,
}

impl PageSpan {
    pub const fn new(start: PageId, count: u32) -> Self {
        Self { start, count }
    }

    pub const fn single(page: PageId) -> Self {
        Self::new(page, 1)
    }

    /// Last page of the span (inclusive), or `None` if it lies past
    /// `PageId::MAX`. Only meaningful for `count >= 1`.
    pub fn checked_end(&self) -> Option<PageId> {
        self.start.checked_add(self.count.saturating_sub(1))
    }

    /// Last page of the span (inclusive), clamped to `PageId::MAX`.
    pub fn end(&self) -> PageId {
        self.start.saturating_add(self.count.saturating_sub(1))
    }

    /// Number of bytes the span can hold.
    pub fn capacity(&self) -> usize {
        self.count as usize * crate::tag::types::PAGE_SIZE
    }

    pub fn pages(&self) -> RangeInclusive<PageId> {
        self.start..=self.end()
    }

    pub fn contains(&self, page: PageId) -> bool {
        self.count > 0 && self.pages().contains(&page)
    }

    pub fn overlaps(&self, other: &PageSpan) -> bool {
        self.count > 0 && other.count > 0 && self.start <= other.end() && other.start <= self.end()
    }
}
