use quiz_core::model::{AnswerKey, AnswerOption};
use quiz_core::{QUESTION_SECONDS, QuizSession, SessionPhase};
use services::QuizFlowService;

use crate::views::ViewError;

/// User gestures plus the 1 Hz timer, as a single dispatchable enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Select(AnswerKey),
    Next,
    Previous,
    Tick,
    Restart,
}

/// View-model around the session engine: owns the session, answers the
/// questions the view asks, and routes intents through the flow service.
pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// The countdown runs exactly while a question is on screen.
    #[must_use]
    pub fn timer_armed(&self) -> bool {
        self.session.phase() == SessionPhase::InProgress
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.session
            .current_question()
            .map(|question| question.prompt())
    }

    /// Ordered options of the current question, `None` in free-text mode.
    #[must_use]
    pub fn options(&self) -> Option<&[AnswerOption]> {
        self.session
            .current_question()
            .and_then(|question| question.options())
    }

    #[must_use]
    pub fn selected_key(&self) -> Option<&AnswerKey> {
        self.session.selected_answer()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.session.total_questions()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.session.remaining_seconds()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.session.can_retreat()
    }

    #[must_use]
    pub fn progress_percent(&self) -> f32 {
        self.session.progress_fraction() * 100.0
    }

    /// Fullness of the countdown bar, 100 at a fresh question.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn timer_percent(&self) -> f32 {
        self.session.remaining_seconds() as f32 / QUESTION_SECONDS as f32 * 100.0
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.session.progress();
        format!("{} / {} Questions", progress.position, progress.total)
    }

    pub fn apply(&mut self, flow: &QuizFlowService, intent: QuizIntent) {
        match intent {
            QuizIntent::Start => {
                flow.start(&mut self.session);
            }
            QuizIntent::Select(key) => {
                flow.select_answer(&mut self.session, key);
            }
            QuizIntent::Next => {
                flow.advance(&mut self.session);
            }
            QuizIntent::Previous => {
                flow.retreat(&mut self.session);
            }
            QuizIntent::Tick => {
                flow.tick(&mut self.session);
            }
            QuizIntent::Restart => {
                flow.restart(&mut self.session);
            }
        }
    }
}

/// # Errors
///
/// Returns `ViewError::LoadFailed` when the bank cannot be fetched or
/// decoded.
pub async fn load_quiz(flow: &QuizFlowService) -> Result<QuizVm, ViewError> {
    match flow.load_session().await {
        Ok(session) => Ok(QuizVm::new(session)),
        Err(_) => Err(ViewError::LoadFailed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quiz_core::model::{QuestionRecord, QuestionSet};
    use quiz_core::time::fixed_clock;
    use services::{QuestionBankService, StaticBankSource};

    fn records() -> Vec<QuestionRecord> {
        ["Q1", "Q2"]
            .into_iter()
            .map(|prompt| {
                QuestionRecord::multiple_choice(
                    prompt,
                    vec![
                        (AnswerKey::new("a"), "A".to_string()),
                        (AnswerKey::new("b"), "B".to_string()),
                    ],
                    AnswerKey::new("b"),
                )
                .unwrap()
            })
            .collect()
    }

    fn flow() -> QuizFlowService {
        let source = StaticBankSource::new(QuestionSet::new(records()));
        QuizFlowService::new(fixed_clock(), QuestionBankService::new(Arc::new(source)))
    }

    fn vm() -> QuizVm {
        QuizVm::new(QuizSession::new(QuestionSet::new(records())))
    }

    #[test]
    fn intents_walk_the_session() {
        let flow = flow();
        let mut vm = vm();

        assert_eq!(vm.phase(), SessionPhase::NotStarted);
        assert!(!vm.timer_armed());

        vm.apply(&flow, QuizIntent::Start);
        assert_eq!(vm.phase(), SessionPhase::InProgress);
        assert!(vm.timer_armed());
        assert_eq!(vm.prompt(), Some("Q1"));
        assert_eq!(vm.progress_label(), "1 / 2 Questions");

        vm.apply(&flow, QuizIntent::Select(AnswerKey::new("b")));
        assert_eq!(vm.score(), 1);
        assert_eq!(vm.selected_key(), Some(&AnswerKey::new("b")));

        vm.apply(&flow, QuizIntent::Next);
        assert_eq!(vm.prompt(), Some("Q2"));
        assert!(vm.can_go_back());
        assert_eq!(vm.selected_key(), None);

        vm.apply(&flow, QuizIntent::Next);
        assert_eq!(vm.phase(), SessionPhase::Completed);
        assert!(!vm.timer_armed());

        vm.apply(&flow, QuizIntent::Restart);
        assert_eq!(vm.phase(), SessionPhase::NotStarted);
        assert_eq!(vm.score(), 0);
    }

    #[test]
    fn timer_percent_follows_the_countdown() {
        let flow = flow();
        let mut vm = vm();
        vm.apply(&flow, QuizIntent::Start);

        assert!((vm.timer_percent() - 100.0).abs() < f32::EPSILON);
        for _ in 0..15 {
            vm.apply(&flow, QuizIntent::Tick);
        }
        assert!((vm.timer_percent() - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn progress_percent_spans_the_set() {
        let flow = flow();
        let mut vm = vm();
        vm.apply(&flow, QuizIntent::Start);

        assert!((vm.progress_percent() - 50.0).abs() < f32::EPSILON);
        vm.apply(&flow, QuizIntent::Next);
        assert!((vm.progress_percent() - 100.0).abs() < f32::EPSILON);
    }
}
