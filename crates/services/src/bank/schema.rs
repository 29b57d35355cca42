use serde::Deserialize;
use serde_json::{Map, Value};

use quiz_core::model::{AnswerKey, QuestionRecord, QuestionSet};

use crate::error::BankError;

/// Wire shape of one bank entry.
///
/// `options` is an ordered key→label map (serde_json is built with
/// `preserve_order`, so insertion order is display order). Its absence
/// selects free-text mode.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Option<Map<String, Value>>,
    pub correct: String,
}

impl RawQuestion {
    /// Convert the wire record into a validated domain record.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidOptionLabel` for a non-string label and
    /// propagates `QuestionError` for domain violations.
    pub fn into_record(self) -> Result<QuestionRecord, BankError> {
        let correct = AnswerKey::new(self.correct);
        match self.options {
            Some(options) => {
                let mut pairs = Vec::with_capacity(options.len());
                for (key, label) in options {
                    let Some(label) = label.as_str() else {
                        return Err(BankError::InvalidOptionLabel { key });
                    };
                    let label = label.to_string();
                    pairs.push((AnswerKey::new(key), label));
                }
                Ok(QuestionRecord::multiple_choice(self.question, pairs, correct)?)
            }
            None => Ok(QuestionRecord::free_text(self.question, correct)?),
        }
    }
}

/// Decode a full bank payload into a `QuestionSet`.
pub(crate) fn decode_bank(payload: &str) -> Result<QuestionSet, BankError> {
    let raw: Vec<RawQuestion> = serde_json::from_str(payload)?;
    let mut records = Vec::with_capacity(raw.len());
    for question in raw {
        records.push(question.into_record()?);
    }
    Ok(QuestionSet::new(records))
}
