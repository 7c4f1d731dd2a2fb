use crate::cursor::execution::Execution;
use connectors::sql::base::{error::DbError, requests::SqlRequest};
use model::{
    pagination::offset::OffsetWindow,
    records::{batch::Batch, row::Row},
};
use planner::query::offsets::rewrite_for_window;
use std::{num::NonZeroUsize, vec};
use tracing::debug;

/// Where the next row of a cursor comes from.
pub(crate) enum RowSource {
    /// Nothing executed yet, or the statement returned no rows.
    Empty,

    /// Rows of a single direct round trip.
    Direct(vec::IntoIter<Row>),

    /// Rows of a paginated `SELECT`, fetched page by page on demand.
    Paged(PagedSource),
}

impl RowSource {
    pub(crate) fn direct(rows: Vec<Row>) -> Self {
        if rows.is_empty() {
            RowSource::Empty
        } else {
            RowSource::Direct(rows.into_iter())
        }
    }

    pub(crate) async fn next_row(&mut self, exec: &mut Execution) -> Result<Option<Row>, DbError> {
        match self {
            RowSource::Empty => Ok(None),
            RowSource::Direct(rows) => Ok(rows.next()),
            RowSource::Paged(paged) => paged.next_row(exec).await,
        }
    }
}

/// Lazy `LIMIT`/`OFFSET` loop over a statement template.
///
/// A page is requested only once the previous one is drained. The loop ends
/// at the first page that comes back without rows.
pub(crate) struct PagedSource {
    request: SqlRequest,
    window: OffsetWindow,
    current: vec::IntoIter<Row>,
    exhausted: bool,
}

impl PagedSource {
    /// `request.stmt` is the template; its parameters are sent with every page.
    pub(crate) fn new(request: SqlRequest, batch_size: NonZeroUsize) -> Self {
        PagedSource {
            request,
            window: OffsetWindow::first(batch_size),
            current: Vec::new().into_iter(),
            exhausted: false,
        }
    }

    /// Fetches the first page without consuming any of its rows.
    pub(crate) async fn prime(&mut self, exec: &mut Execution) -> Result<(), DbError> {
        if let Some(batch) = self.fetch_batch(exec).await? {
            self.current = batch.rows.into_iter();
        }
        Ok(())
    }

    async fn fetch_batch(&mut self, exec: &mut Execution) -> Result<Option<Batch>, DbError> {
        if self.exhausted {
            return Ok(None);
        }

        let stmt = rewrite_for_window(&self.request.stmt, &self.window);
        let rows = exec.run(self.request.with_stmt(stmt)).await?;
        if rows.is_empty() {
            debug!("Pagination finished at offset {}", self.window.offset);
            self.exhausted = true;
            return Ok(None);
        }

        let batch = Batch::new(rows, self.window);
        self.window = batch.next_window();
        debug!(
            "Fetched page of {} rows, next offset {}",
            batch.rows.len(),
            self.window.offset
        );

        Ok(Some(batch))
    }

    async fn next_row(&mut self, exec: &mut Execution) -> Result<Option<Row>, DbError> {
        loop {
            if let Some(row) = self.current.next() {
                // fetch entry points already reject a closed cursor
                if exec.is_closed() {
                    return Err(DbError::programming("Cursor closed"));
                }
                return Ok(Some(row));
            }

            match self.fetch_batch(exec).await? {
                Some(batch) => self.current = batch.rows.into_iter(),
                None => return Ok(None),
            }
        }
    }
}
