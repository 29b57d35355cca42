//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionError;

/// Errors emitted while fetching or decoding the question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("bank request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to read bank file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error("option label for key {key} is not a string")]
    InvalidOptionLabel { key: String },
    #[error(transparent)]
    Question(#[from] QuestionError),
}
