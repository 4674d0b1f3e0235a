use serde::{Deserialize, Serialize};

use crate::tag::codec::{format_hex, render_printable};
use crate::tag::types::{PageId, PageMap};

pub const SIMULATE_HEADER: &str = "---- START (HEX) --------------";
pub const SIMULATE_FOOTER: &str = "---- END ----------------------";

/// Literal the user must type before a user area wipe.
pub const DELETE_CONFIRMATION: &str = "RESET";

/// Pages to write to the tag: the selected rows only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub pages: PageMap,
}

impl WriteRequest {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Group the pages into runs of consecutive pages, each returned as its
    /// start page and concatenated bytes.
    pub fn contiguous_runs(&self) -> Vec<(PageId, Vec<u8>)> {
        let mut runs: Vec<(PageId, Vec<u8>)> = Vec::new();
        let mut last: Option<PageId> = None;
        for (&page, bytes) in &self.pages {
            let follows = last.is_some_and(|l| l + 1 == page);
            match runs.last_mut() {
                Some((_, data)) if follows => data.extend_from_slice(bytes),
                _ => runs.push((page, bytes.to_vec())),
            }
            last = Some(page);
        }
        runs
    }
}

/// Every row, for preview only. Never sent to hardware.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub pages: PageMap,
}

impl SimulateRequest {
    /// One `pNN: | HH HH HH HH | text` line per page, framed by a header and
    /// footer.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.pages.len() + 2);
        lines.push(SIMULATE_HEADER.to_string());
        for (page, bytes) in &self.pages {
            lines.push(format!(
                "p{:02}: | {} | {}",
                page,
                format_hex(bytes),
                render_printable(bytes, '.')
            ));
        }
        lines.push(SIMULATE_FOOTER.to_string());
        lines
    }
}

/// Intent to wipe the tag's user area. Carries no pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserAreaRequest;

impl DeleteUserAreaRequest {
    /// Whether `answer` is the confirmation literal. The dispatcher does not
    /// check this; callers must before acting on the request.
    pub fn is_confirmed(answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case(DELETE_CONFIRMATION)
    }
}

/// Ask the interactive surface to drop selections that depend on the page
/// bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearUiRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Write(WriteRequest),
    Simulate(SimulateRequest),
    DeleteUserArea(DeleteUserAreaRequest),
    ClearUi(ClearUiRequest),
}
