mod page_row;
mod page_store;

pub use page_row::{PageRow, TriState};
pub use page_store::PageStore;
