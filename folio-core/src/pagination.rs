//! Incremental pagination over a filtered result set.

use serde::Serialize;

/// Default number of articles revealed per page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Tracks how many filtered results are shown.
///
/// An advance stays pending until [`PageCursor::settle`] is called; further
/// advances in the meantime are ignored, so rapid repeated triggers reveal
/// one page rather than several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    page_size: usize,
    visible: usize,
    pending: bool,
}

impl PageCursor {
    /// A page size of zero is treated as one
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            visible: page_size,
            pending: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Show exactly one page again
    pub fn reset(&mut self) {
        self.visible = self.page_size;
    }

    /// The shown prefix of `filtered`
    pub fn visible_slice<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        &filtered[..self.visible.min(filtered.len())]
    }

    /// Number of results shown out of `total`
    pub fn shown(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    /// Reveal one more page, clamped to `total`.
    ///
    /// Returns `false` without changing anything when everything is already
    /// shown or a previous advance has not settled.
    pub fn advance(&mut self, total: usize) -> bool {
        if self.pending || !self.has_more(total) {
            return false;
        }
        self.visible = (self.visible + self.page_size).min(total);
        self.pending = true;
        true
    }

    /// Mark the pending advance as complete
    pub fn settle(&mut self) {
        self.pending = false;
    }

    /// Total pages needed to show `total` results
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
