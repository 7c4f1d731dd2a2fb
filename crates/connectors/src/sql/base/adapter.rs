use crate::sql::base::{error::DbError, requests::SqlRequest};
use async_trait::async_trait;
use model::records::result::ResultSet;
use std::sync::Arc;

/// The request/response transport a cursor runs on.
///
/// One call, one round trip: the implementation sends the statement with its
/// parameters and returns the decoded response document. Rejected statements
/// must surface as [`DbError::Programming`]; anything else is reported as-is.
#[async_trait]
pub trait SqlClient: Send + Sync {
    async fn sql(&self, request: SqlRequest) -> Result<ResultSet, DbError>;
}

#[async_trait]
impl<T: SqlClient + ?Sized> SqlClient for Arc<T> {
    async fn sql(&self, request: SqlRequest) -> Result<ResultSet, DbError> {
        (**self).sql(request).await
    }
}
