mod question;
mod question_set;

pub use question::{AnswerKey, AnswerOption, QuestionError, QuestionRecord, ResponseMode};
pub use question_set::QuestionSet;
