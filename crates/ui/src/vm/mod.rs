mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{QuizIntent, QuizVm, load_quiz};
pub use time_fmt::format_time_left;
