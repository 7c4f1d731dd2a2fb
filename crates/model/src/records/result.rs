use crate::records::{description::ColumnDescription, row::Row};
use serde::{Deserialize, Serialize};

/// Outcome of one parameter set in a bulk request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    /// Affected rows, negative when the server could not tell (or failed).
    pub rowcount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StatementResult {
    pub fn new(rowcount: i64) -> Self {
        Self {
            rowcount,
            error_message: None,
        }
    }
}

/// Response document of a single `sql` call.
///
/// `rows` is `None` when the response did not carry a row list at all (bulk
/// responses); such a result has no meaningful `rowcount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub cols: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowcount: Option<i64>,
    /// Server-side execution time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<StatementResult>>,
}

impl ResultSet {
    pub fn with_rows(cols: Vec<String>, rows: Vec<Row>) -> Self {
        let rowcount = rows.len() as i64;
        Self {
            cols,
            rows: Some(rows),
            rowcount: Some(rowcount),
            duration: None,
            results: None,
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.as_ref().map_or(0, Vec::len)
    }

    /// Takes the row list out of the result, leaving an empty (but present) list.
    pub fn take_rows(&mut self) -> Vec<Row> {
        match self.rows.as_mut() {
            Some(rows) => std::mem::take(rows),
            None => Vec::new(),
        }
    }

    pub fn description(&self) -> Vec<ColumnDescription> {
        self.cols.iter().map(ColumnDescription::named).collect()
    }
}
