use crate::connection::Connection;
use connectors::sql::base::{error::DbError, requests::SqlRequest};
use model::records::{result::ResultSet, row::Row};
use tracing::debug;

/// The part of a cursor that talks to the server: the connection, the
/// cursor's closed flag, and the response of the most recent round trip.
///
/// Row sources borrow it to fetch further pages, which is how every page
/// replaces `last_result`.
pub(crate) struct Execution {
    connection: Connection,
    closed: bool,
    last_result: Option<ResultSet>,
}

impl Execution {
    pub(crate) fn new(connection: Connection) -> Self {
        Execution {
            connection,
            closed: false,
            last_result: None,
        }
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.connection
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
        self.last_result = None;
    }

    pub(crate) fn last_result(&self) -> Option<&ResultSet> {
        self.last_result.as_ref()
    }

    pub(crate) fn replace_result(&mut self, result: Option<ResultSet>) -> Option<ResultSet> {
        std::mem::replace(&mut self.last_result, result)
    }

    pub(crate) fn ensure_cursor_open(&self) -> Result<(), DbError> {
        if self.closed {
            return Err(DbError::programming("Cursor closed"));
        }
        Ok(())
    }

    pub(crate) fn ensure_open(&self) -> Result<(), DbError> {
        if self.connection.is_closed() {
            return Err(DbError::programming("Connection closed"));
        }
        self.ensure_cursor_open()
    }

    /// Sends one request. The response becomes the last result; its rows are
    /// handed back (empty when the response carried none).
    pub(crate) async fn run(&mut self, request: SqlRequest) -> Result<Vec<Row>, DbError> {
        self.ensure_open()?;

        if request.is_bulk() {
            debug!("Executing bulk statement: {}", request.stmt);
        } else {
            debug!("Executing statement: {}", request.stmt);
        }
        let mut result = self.connection.client().sql(request).await?;
        let rows = result.take_rows();
        self.last_result = Some(result);

        Ok(rows)
    }
}
