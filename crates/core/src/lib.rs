#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod time;

pub use error::Error;
pub use session::{
    QUESTION_SECONDS, QuizSession, SessionPhase, SessionProgress, TickOutcome, Transition,
};
pub use time::Clock;
