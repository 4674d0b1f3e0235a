use std::collections::BTreeMap;

pub const PAGE_SIZE: usize = 4;

pub type PageData = [u8; PAGE_SIZE];

pub type PageId = u32;

/// Sparse page table, always enumerated in page order.
pub type PageMap = BTreeMap<PageId, PageData>;

pub const ZERO_PAGE: PageData = [0; PAGE_SIZE];

/// Highest page shown by the editor for a 64-page tag dump.
pub const DEFAULT_MAX_PAGE: PageId = 63;

pub const DEFAULT_COLOR_PAGE: PageId = 0x20;
