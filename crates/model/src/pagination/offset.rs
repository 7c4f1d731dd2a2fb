use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// `LIMIT`/`OFFSET` bounds of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetWindow {
    pub limit: NonZeroUsize,
    pub offset: usize,
}

impl OffsetWindow {
    /// The first page for the given page size.
    pub fn first(limit: NonZeroUsize) -> Self {
        Self { limit, offset: 0 }
    }

    /// Moves past `received` rows. The step is the number of rows the server
    /// actually returned, not the requested limit.
    pub fn advance(self, received: usize) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset + received,
        }
    }
}
