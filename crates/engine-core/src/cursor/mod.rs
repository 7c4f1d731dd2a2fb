use crate::connection::Connection;
use connectors::sql::base::{error::DbError, requests::SqlRequest};
use execution::Execution;
use futures::{Stream, stream};
use model::{
    core::value::Value,
    records::{
        description::ColumnDescription,
        result::{ResultSet, StatementResult},
        row::Row,
    },
};
use planner::{
    plan::{ExecutionPlan, ExecutionPlanner},
    query::offsets::rewrite_for_probe,
};
use source::{PagedSource, RowSource};
use std::num::NonZeroUsize;
use tracing::{debug, warn};

mod execution;
mod source;

/// Page size used when the caller does not pick one.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(10_000).unwrap();

/// Rows returned by [`Cursor::fetch_many`] when no count is given.
pub const DEFAULT_ARRAY_SIZE: usize = 1;

/// DB-API style cursor over a [`Connection`].
///
/// Plain `SELECT`s without a `LIMIT` are paginated transparently: the
/// statement is probed with `limit 1`, then fetched in `limit/offset` pages
/// of `batch_size` rows as the caller pulls rows. Everything else is sent
/// once, as written.
///
/// A cursor is meant for a single consumer; it is not safe to drive from
/// several tasks at once.
pub struct Cursor {
    exec: Execution,
    source: RowSource,
    array_size: usize,
    batch_size: NonZeroUsize,
}

impl Cursor {
    pub fn new(connection: Connection, batch_size: Option<NonZeroUsize>) -> Self {
        Cursor {
            exec: Execution::new(connection),
            source: RowSource::Empty,
            array_size: DEFAULT_ARRAY_SIZE,
            batch_size: batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        }
    }

    /// Executes a statement. Results are read through the fetch methods and
    /// the `rowcount`/`duration`/`description` accessors.
    ///
    /// While a paginated statement is being read, the accessors describe the
    /// most recent page only, not the whole query.
    pub async fn execute(
        &mut self,
        sql: &str,
        parameters: Option<Vec<Value>>,
        bulk_parameters: Option<Vec<Vec<Value>>>,
    ) -> Result<(), DbError> {
        self.exec.ensure_open()?;
        self.exec.replace_result(None);
        self.source = RowSource::Empty;

        let request = SqlRequest::new(sql)
            .args(parameters)
            .bulk_args(bulk_parameters);

        if let ExecutionPlan::Paginated { template } = ExecutionPlanner::plan(sql) {
            match self.exec.run(request.with_stmt(rewrite_for_probe(&template))).await {
                Ok(_) => {
                    debug!(
                        "Paginating statement in batches of {}: {}",
                        self.batch_size, template
                    );
                    let mut paged = PagedSource::new(request.with_stmt(template), self.batch_size);
                    paged.prime(&mut self.exec).await?;
                    self.source = RowSource::Paged(paged);
                    return Ok(());
                }
                Err(DbError::Programming(reason)) => {
                    debug!("Probe rejected ({}), executing statement directly", reason);
                }
                Err(e) => return Err(e),
            }
        }

        let rows = self.exec.run(request).await?;
        self.source = RowSource::direct(rows);

        Ok(())
    }

    /// Executes `sql` once per parameter set and aggregates the outcome.
    ///
    /// Servers that support bulk requests get a single round trip carrying all
    /// parameter sets; older ones get one `execute` per set. Afterwards
    /// `rowcount` and `duration` are the sums of the non-negative values seen
    /// (or -1 when there were none). Returns the per-statement results of the
    /// bulk request, `None` on the sequential path.
    pub async fn execute_many(
        &mut self,
        sql: &str,
        seq_of_parameters: Vec<Vec<Value>>,
    ) -> Result<Option<Vec<StatementResult>>, DbError> {
        self.exec.ensure_open()?;

        let mut row_counts = Vec::new();
        let mut durations = Vec::new();

        if self.exec.connection().capabilities().bulk_args {
            self.execute(sql, None, Some(seq_of_parameters)).await?;

            if let Some(results) = self.exec.last_result().and_then(|r| r.results.as_ref()) {
                row_counts.extend(results.iter().map(|r| r.rowcount).filter(|c| *c >= 0));
            }
            let duration = self.duration();
            if duration >= 0.0 {
                durations.push(duration);
            }
        } else {
            debug!(
                "Server {} lacks bulk support, executing {} parameter sets sequentially",
                self.exec.connection().lowest_server_version(),
                seq_of_parameters.len()
            );
            for parameters in seq_of_parameters {
                self.execute(sql, Some(parameters), None).await?;

                let rowcount = self.rowcount();
                if rowcount >= 0 {
                    row_counts.push(rowcount);
                }
                let duration = self.duration();
                if duration >= 0.0 {
                    durations.push(duration);
                }
            }
        }

        let previous = self.exec.replace_result(None).unwrap_or_default();
        let aggregate = ResultSet {
            cols: previous.cols,
            rows: Some(Vec::new()),
            rowcount: Some(if row_counts.is_empty() {
                -1
            } else {
                row_counts.iter().sum()
            }),
            duration: Some(if durations.is_empty() {
                -1.0
            } else {
                durations.iter().sum()
            }),
            results: previous.results,
        };

        let results = aggregate.results.clone();
        self.exec.replace_result(Some(aggregate));
        self.source = RowSource::Empty;

        Ok(results)
    }

    /// Next row, or `None` once the result is exhausted.
    pub async fn fetch_one(&mut self) -> Result<Option<Row>, DbError> {
        self.exec.ensure_cursor_open()?;
        self.source.next_row(&mut self.exec).await
    }

    /// Up to `count` rows (default: `array_size`). Fewer rows are returned
    /// only when the result is exhausted. A count of zero fetches everything.
    pub async fn fetch_many(&mut self, count: Option<usize>) -> Result<Vec<Row>, DbError> {
        let count = count.unwrap_or(self.array_size);
        if count == 0 {
            return self.fetch_all().await;
        }

        self.exec.ensure_cursor_open()?;
        let mut rows = Vec::new();
        while rows.len() < count {
            match self.source.next_row(&mut self.exec).await? {
                Some(row) => rows.push(row),
                None => break,
            }
        }

        Ok(rows)
    }

    /// All remaining rows.
    pub async fn fetch_all(&mut self) -> Result<Vec<Row>, DbError> {
        self.exec.ensure_cursor_open()?;
        let mut rows = Vec::new();
        while let Some(row) = self.source.next_row(&mut self.exec).await? {
            rows.push(row);
        }

        Ok(rows)
    }

    /// Remaining rows as a stream.
    ///
    /// The stream reads through the cursor itself: every row it yields is a
    /// row later fetches will not see. It is not an independent iterator.
    pub fn rows(&mut self) -> impl Stream<Item = Result<Row, DbError>> + '_ {
        warn!("Cursor row stream used; it shares its position with the cursor");
        stream::try_unfold(self, |cursor| async move {
            let next = cursor.fetch_one().await?;
            Ok::<_, DbError>(next.map(|row| (row, cursor)))
        })
    }

    /// Closes the cursor. Later executes and fetches fail; closing again is a
    /// no-op.
    pub fn close(&mut self) {
        if !self.exec.is_closed() {
            debug!("Cursor closed");
        }
        self.exec.close();
    }

    pub fn is_closed(&self) -> bool {
        self.exec.is_closed()
    }

    /// Rows returned or affected by the last round trip, -1 when unknown.
    pub fn rowcount(&self) -> i64 {
        if self.exec.is_closed() {
            return -1;
        }
        match self.exec.last_result() {
            Some(result) if result.rows.is_some() => result.rowcount.unwrap_or(-1),
            _ => -1,
        }
    }

    /// Server-side duration of the last round trip in milliseconds, -1 when
    /// unknown.
    pub fn duration(&self) -> f64 {
        if self.exec.is_closed() {
            return -1.0;
        }
        self.exec
            .last_result()
            .and_then(|result| result.duration)
            .unwrap_or(-1.0)
    }

    /// One entry per result column; `None` when closed or nothing was executed.
    pub fn description(&self) -> Option<Vec<ColumnDescription>> {
        if self.exec.is_closed() {
            return None;
        }
        self.exec.last_result().map(ResultSet::description)
    }

    /// Not supported by the server; always `None`.
    pub fn last_row_id(&self) -> Option<i64> {
        None
    }

    pub fn array_size(&self) -> usize {
        self.array_size
    }

    pub fn set_array_size(&mut self, array_size: usize) {
        self.array_size = array_size;
    }

    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// Accepted and ignored.
    pub fn set_input_sizes(&self, _sizes: &[usize]) {}

    /// Accepted and ignored.
    pub fn set_output_size(&self, _size: usize, _column: Option<usize>) {}
}
