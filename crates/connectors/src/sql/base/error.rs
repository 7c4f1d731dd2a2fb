use thiserror::Error;

/// All errors coming from the database/query layer.
///
/// `Programming` is the DB-API "you did something wrong" kind: a rejected
/// statement, or an operation on a closed cursor or connection. Every other
/// variant describes a transport or server failure and is passed through the
/// cursor unchanged.
#[derive(Debug, Error)]
pub enum DbError {
    /// Rejected statement or misuse of a closed cursor/connection.
    #[error("Programming error: {0}")]
    Programming(String),

    /// The server answered with an error document.
    #[error("Server error {code}: {message}")]
    Server { code: i64, message: String },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DbError {
    pub fn programming(message: impl Into<String>) -> Self {
        DbError::Programming(message.into())
    }

    pub fn is_programming(&self) -> bool {
        matches!(self, DbError::Programming(_))
    }
}
