#![allow(dead_code)]

use async_trait::async_trait;
use connectors::sql::base::{adapter::SqlClient, error::DbError, requests::SqlRequest};
use engine_core::connection::Connection;
use model::{
    core::{value::Value, version::ServerVersion},
    records::{
        result::{ResultSet, StatementResult},
        row::Row,
    },
};
use std::sync::{Arc, Mutex};

/// Version with bulk support.
pub const CURRENT_VERSION: ServerVersion = ServerVersion::new(5, 6, 0);

/// Version that predates bulk requests.
pub const LEGACY_VERSION: ServerVersion = ServerVersion::new(0, 40, 2);

/// Server-side duration reported for every statement, in milliseconds.
pub const STATEMENT_DURATION: f64 = 1.5;

/// In-memory stand-in for a server holding a single table.
///
/// Understands just enough SQL for the cursor: a trailing `limit N` or
/// `limit N offset M` slices the table, `insert` statements report one
/// affected row per parameter set, anything else returns the whole table.
pub struct TableServer {
    cols: Vec<String>,
    rows: Vec<Row>,
    reject_probes: bool,
    fail_on_call: Option<usize>,
    log: Mutex<Vec<SqlRequest>>,
}

impl TableServer {
    /// Table `t(id, name)` with ids `1..=count`.
    pub fn with_rows(count: i64) -> Self {
        TableServer {
            cols: vec!["id".to_string(), "name".to_string()],
            rows: (1..=count).map(table_row).collect(),
            reject_probes: false,
            fail_on_call: None,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Answers every `limit 1` probe with a programming error.
    pub fn rejecting_probes(mut self) -> Self {
        self.reject_probes = true;
        self
    }

    /// Fails the n-th call (0-based) with a transport error.
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn connect(self: &Arc<Self>, version: ServerVersion) -> Connection {
        Connection::new(self.clone(), version)
    }

    pub fn requests(&self) -> Vec<SqlRequest> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn statements(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.stmt).collect()
    }

    fn result(&self, rows: Vec<Row>) -> ResultSet {
        ResultSet::with_rows(self.cols.clone(), rows).with_duration(STATEMENT_DURATION)
    }

    fn slice(&self, limit: usize, offset: usize) -> Vec<Row> {
        self.rows.iter().skip(offset).take(limit).cloned().collect()
    }

    fn insert(&self, request: &SqlRequest) -> ResultSet {
        match &request.bulk_args {
            Some(sets) => ResultSet {
                cols: Vec::new(),
                rows: None,
                rowcount: None,
                duration: Some(STATEMENT_DURATION),
                results: Some(sets.iter().map(|_| StatementResult::new(1)).collect()),
            },
            None => ResultSet {
                cols: Vec::new(),
                rows: Some(Vec::new()),
                rowcount: Some(1),
                duration: Some(STATEMENT_DURATION),
                results: None,
            },
        }
    }
}

#[async_trait]
impl SqlClient for TableServer {
    async fn sql(&self, request: SqlRequest) -> Result<ResultSet, DbError> {
        let call = {
            let mut log = self
                .log
                .lock()
                .map_err(|e| DbError::Transport(e.to_string()))?;
            log.push(request.clone());
            log.len() - 1
        };

        if self.fail_on_call == Some(call) {
            return Err(DbError::Transport("connection reset by peer".to_string()));
        }

        let stmt = request.stmt.to_lowercase();
        if stmt.starts_with("insert") {
            return Ok(self.insert(&request));
        }

        match parse_limit(&stmt) {
            Some((1, None)) if self.reject_probes => Err(DbError::Programming(
                "SQLParseException: cannot apply limit to this statement".to_string(),
            )),
            Some((limit, offset)) => Ok(self.result(self.slice(limit, offset.unwrap_or(0)))),
            None => Ok(self.result(self.rows.clone())),
        }
    }
}

/// Splits a trailing `limit N [offset M]` clause.
fn parse_limit(stmt: &str) -> Option<(usize, Option<usize>)> {
    let (_, clause) = stmt.rsplit_once(" limit ")?;
    let mut parts = clause.split_whitespace();
    let limit = parts.next()?.parse().ok()?;
    match (parts.next(), parts.next()) {
        (None, _) => Some((limit, None)),
        (Some("offset"), Some(offset)) => Some((limit, Some(offset.parse().ok()?))),
        _ => None,
    }
}

pub fn table_row(id: i64) -> Row {
    Row::new(vec![Value::Int(id), Value::String(format!("name-{id}"))])
}

pub fn ids(rows: &[Row]) -> Vec<i64> {
    rows.iter()
        .filter_map(|r| r.get(0).and_then(Value::as_i64))
        .collect()
}
