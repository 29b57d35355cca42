use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Violations caught while building a `QuestionRecord`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("multiple-choice question has no options")]
    NoOptions,

    #[error("duplicate option key: {0}")]
    DuplicateOptionKey(AnswerKey),

    #[error("correct key {0} is not among the options")]
    UnknownCorrectKey(AnswerKey),
}

//
// ─── ANSWER KEY ───────────────────────────────────────────────────────────────
//

/// Identifier carried by an answer selection and by the authoritative
/// correct-answer slot. Compared by exact equality.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnswerKey(String);

impl AnswerKey {
    /// Creates a new `AnswerKey`
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the underlying key text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnswerKey({})", self.0)
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── QUESTION RECORD ──────────────────────────────────────────────────────────
//

/// One selectable answer. Insertion order within a question is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub key: AnswerKey,
    pub label: String,
}

/// How a question accepts its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseMode {
    /// Multiple choice over a fixed, ordered option list.
    Choice(Vec<AnswerOption>),
    /// Open text. The response is recorded but never scored.
    FreeText,
}

/// One quiz item: prompt, response mode, and the authoritative correct key.
///
/// Immutable once built; owned collectively by a `QuestionSet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    prompt: String,
    mode: ResponseMode,
    correct: AnswerKey,
}

impl QuestionRecord {
    /// Build a multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt,
    /// `QuestionError::NoOptions` for an empty option list,
    /// `QuestionError::DuplicateOptionKey` when a key repeats, and
    /// `QuestionError::UnknownCorrectKey` when `correct` matches no option.
    pub fn multiple_choice(
        prompt: impl Into<String>,
        options: Vec<(AnswerKey, String)>,
        correct: AnswerKey,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let mut seen: Vec<&AnswerKey> = Vec::with_capacity(options.len());
        for (key, _) in &options {
            if seen.contains(&key) {
                return Err(QuestionError::DuplicateOptionKey(key.clone()));
            }
            seen.push(key);
        }

        if !options.iter().any(|(key, _)| *key == correct) {
            return Err(QuestionError::UnknownCorrectKey(correct));
        }

        let options = options
            .into_iter()
            .map(|(key, label)| AnswerOption { key, label })
            .collect();

        Ok(Self {
            prompt,
            mode: ResponseMode::Choice(options),
            correct,
        })
    }

    /// Build an open-text question. The correct key is kept for the record
    /// shape but no correctness check is applied to free-text responses.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` for a blank prompt.
    pub fn free_text(prompt: impl Into<String>, correct: AnswerKey) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        Ok(Self {
            prompt,
            mode: ResponseMode::FreeText,
            correct,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn mode(&self) -> &ResponseMode {
        &self.mode
    }

    #[must_use]
    pub fn correct_key(&self) -> &AnswerKey {
        &self.correct
    }

    /// Ordered option list, or `None` for a free-text question.
    #[must_use]
    pub fn options(&self) -> Option<&[AnswerOption]> {
        match &self.mode {
            ResponseMode::Choice(options) => Some(options),
            ResponseMode::FreeText => None,
        }
    }

    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self.mode, ResponseMode::Choice(_))
    }

    /// Whether a selection scores a point for this question.
    #[must_use]
    pub fn is_correct(&self, key: &AnswerKey) -> bool {
        self.is_choice() && *key == self.correct
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//
