use crate::tag::types::{PageData, ZERO_PAGE};

/// Editor state of one page.
///
/// Selection and known-field marking are independent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRow {
    pub bytes: PageData,
    /// Included in the next write
    pub apply_selected: bool,
    /// Page is the start of a schema field
    pub is_known_field: bool,
}

impl PageRow {
    pub fn new(bytes: PageData) -> Self {
        Self {
            bytes,
            ..Self::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.bytes == ZERO_PAGE
    }

    pub(crate) fn clear(&mut self) {
        self.bytes = ZERO_PAGE;
        self.apply_selected = false;
    }
}

/// Summary of the selection flags of every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    Checked,
    Unchecked,
    Partial,
}
