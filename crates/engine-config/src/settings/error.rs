use thiserror::Error;

/// Errors raised while loading or validating cursor settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A variable held something that is not a non-negative integer.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// One or more settings are out of range.
    #[error("Settings validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// An env file line could not be parsed.
    #[error("Invalid env file: {0}")]
    EnvFile(String),

    #[error("Failed to decode settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
