mod schema;
mod service;
mod source;

// Public API of the bank subsystem.
pub use crate::error::BankError;
pub use schema::RawQuestion;
pub use service::QuestionBankService;
pub use source::{FileBankSource, HttpBankSource, QuestionBankSource, StaticBankSource};
