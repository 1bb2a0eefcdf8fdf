//! Error types for the autofill core library.

use thiserror::Error;

/// Errors that can occur while parsing inputs or serializing results.
///
/// Matching itself never fails: a bad keyword or URI pattern degrades to a
/// non-match. Errors here only surface at the JSON boundary used by the
/// platform bindings.
#[derive(Error, Debug, Clone)]
pub enum AutofillError {
    /// Error serializing/deserializing JSON
    #[error("JSON error: {0}")]
    JsonError(String),

    /// General error
    #[error("Error: {0}")]
    General(String),
}

impl From<serde_json::Error> for AutofillError {
    fn from(err: serde_json::Error) -> Self {
        AutofillError::JsonError(err.to_string())
    }
}

/// Result type alias for autofill operations.
pub type AutofillResult<T> = Result<T, AutofillError>;
