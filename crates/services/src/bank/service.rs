use std::sync::Arc;

use tracing::error;

use quiz_core::model::QuestionSet;

use crate::bank::source::QuestionBankSource;
use crate::error::BankError;

/// Loads the question bank and logs failures at the service boundary.
#[derive(Clone)]
pub struct QuestionBankService {
    source: Arc<dyn QuestionBankSource>,
}

impl QuestionBankService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionBankSource>) -> Self {
        Self { source }
    }

    /// Fetch and decode the bank.
    ///
    /// # Errors
    ///
    /// Returns `BankError` when the source fails or a record is invalid.
    /// The failure is logged here; the caller decides how to surface it.
    pub async fn load(&self) -> Result<QuestionSet, BankError> {
        match self.source.fetch().await {
            Ok(questions) => Ok(questions),
            Err(err) => {
                error!("question bank load failed: {err}");
                Err(err)
            }
        }
    }
}
