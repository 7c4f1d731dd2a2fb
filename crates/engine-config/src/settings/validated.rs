use engine_core::{connection::Connection, cursor::Cursor};
use std::num::NonZeroUsize;

/// Cursor settings that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedSettings {
    pub batch_size: NonZeroUsize,
    pub array_size: usize,
}

impl ValidatedSettings {
    /// Opens a cursor on `connection` configured with these settings.
    pub fn open_cursor(&self, connection: &Connection) -> Cursor {
        let mut cursor = connection.cursor_with_batch_size(self.batch_size);
        cursor.set_array_size(self.array_size);
        cursor
    }
}
