//! Cyclic-window pagination.
//!
//! A window starts at `offset mod len` and walks forward, wrapping past the
//! end of the records, until it holds `limit` items or every record once.
//! Requesting more than the collection holds yields each record exactly once
//! instead of an error or a truncated tail.

use serde::{Deserialize, Serialize};

/// Validated paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 10;
    pub const DEFAULT_OFFSET: usize = 0;

    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, Self::DEFAULT_OFFSET)
    }
}

/// Select the window described by `page` from `records`.
///
/// The result holds `min(page.limit, records.len())` items.
pub fn paginate<T>(records: &[T], page: Page) -> Vec<&T> {
    let len = records.len();
    if len == 0 {
        return Vec::new();
    }

    let start = page.offset % len;
    records
        .iter()
        .cycle()
        .skip(start)
        .take(page.limit.min(len))
        .collect()
}
