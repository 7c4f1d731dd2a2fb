use crate::{pagination::offset::OffsetWindow, records::row::Row};

/// One page of rows returned by a paginated round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub rows: Vec<Row>,
    pub window: OffsetWindow, // window the page was requested with
}

impl Batch {
    pub fn new(rows: Vec<Row>, window: OffsetWindow) -> Self {
        Self { rows, window }
    }

    /// Window of the page that follows this one.
    pub fn next_window(&self) -> OffsetWindow {
        self.window.advance(self.rows.len())
    }
}
