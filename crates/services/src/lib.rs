#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod flow;

pub use quiz_core::Clock;

pub use bank::{
    FileBankSource, HttpBankSource, QuestionBankService, QuestionBankSource, RawQuestion,
    StaticBankSource,
};
pub use error::BankError;
pub use flow::QuizFlowService;
