use model::core::value::Value;
use serde::{Deserialize, Serialize};

/// Body of a single `sql` call: a statement plus either one parameter set
/// (`args`) or many (`bulk_args`). Absent keys are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SqlRequest {
    pub stmt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_args: Option<Vec<Vec<Value>>>,
}

impl SqlRequest {
    pub fn new(stmt: impl Into<String>) -> Self {
        SqlRequest {
            stmt: stmt.into(),
            args: None,
            bulk_args: None,
        }
    }

    pub fn args(mut self, args: Option<Vec<Value>>) -> Self {
        self.args = args;
        self
    }

    pub fn bulk_args(mut self, bulk_args: Option<Vec<Vec<Value>>>) -> Self {
        self.bulk_args = bulk_args;
        self
    }

    /// Same parameters, different statement. Used to derive probe and page
    /// requests from the original one.
    pub fn with_stmt(&self, stmt: impl Into<String>) -> Self {
        SqlRequest {
            stmt: stmt.into(),
            args: self.args.clone(),
            bulk_args: self.bulk_args.clone(),
        }
    }

    pub fn is_bulk(&self) -> bool {
        self.bulk_args.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_omits_missing_parameters() {
        let request = SqlRequest::new("select 1");
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"stmt":"select 1"}"#
        );
    }

    #[test]
    fn test_serialize_bulk_args() {
        let request = SqlRequest::new("insert into t values (?)")
            .bulk_args(Some(vec![vec![1.into()], vec![2.into()]]));
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"stmt":"insert into t values (?)","bulk_args":[[1],[2]]}"#
        );
        assert!(request.is_bulk());
    }

    #[test]
    fn test_with_stmt_keeps_parameters() {
        let request = SqlRequest::new("select * from t where a = ?").args(Some(vec!["x".into()]));
        let probe = request.with_stmt("select * from t where a = ? limit 1");

        assert_eq!(probe.args, request.args);
        assert_eq!(probe.stmt, "select * from t where a = ? limit 1");
    }
}
