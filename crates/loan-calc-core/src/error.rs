use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown loan preset '{0}' (expected one of: purchase, refinance, investment)")]
    UnknownPreset(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for LoanCalcError {
    fn from(e: serde_yaml::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}

impl From<chrono::ParseError> for LoanCalcError {
    fn from(e: chrono::ParseError) -> Self {
        LoanCalcError::DateError(e.to_string())
    }
}
