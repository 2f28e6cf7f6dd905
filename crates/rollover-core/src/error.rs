use thiserror::Error;

#[derive(Debug, Error)]
pub enum RolloverError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Empty series: {0}")]
    EmptySeries(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RolloverError {
    fn from(e: serde_json::Error) -> Self {
        RolloverError::SerializationError(e.to_string())
    }
}
