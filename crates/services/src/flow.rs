use tracing::debug;

use quiz_core::model::AnswerKey;
use quiz_core::{Clock, QuizSession, TickOutcome, Transition};

use crate::bank::QuestionBankService;
use crate::error::BankError;

/// Orchestrates bank loading and clock-stamped engine transitions.
///
/// The engine itself never reads a clock; every transition that records a
/// timestamp receives it from here so tests stay deterministic.
#[derive(Clone)]
pub struct QuizFlowService {
    clock: Clock,
    bank: QuestionBankService,
}

impl QuizFlowService {
    #[must_use]
    pub fn new(clock: Clock, bank: QuestionBankService) -> Self {
        Self { clock, bank }
    }

    /// Load the bank and wrap it in a fresh, not-yet-started session.
    ///
    /// # Errors
    ///
    /// Returns `BankError` when the load or decode fails.
    pub async fn load_session(&self) -> Result<QuizSession, BankError> {
        let questions = self.bank.load().await?;
        Ok(QuizSession::new(questions))
    }

    pub fn start(&self, session: &mut QuizSession) -> Transition {
        report("start", session.start(self.clock.now()))
    }

    pub fn select_answer(&self, session: &mut QuizSession, key: AnswerKey) -> Transition {
        report("select_answer", session.select_answer(key))
    }

    pub fn advance(&self, session: &mut QuizSession) -> Transition {
        report("advance", session.advance(self.clock.now()))
    }

    pub fn retreat(&self, session: &mut QuizSession) -> Transition {
        report("retreat", session.retreat())
    }

    pub fn tick(&self, session: &mut QuizSession) -> TickOutcome {
        session.tick(self.clock.now())
    }

    pub fn restart(&self, session: &mut QuizSession) -> Transition {
        report("restart", session.restart())
    }
}

// Guarded no-ops are not errors; surface them as diagnostics only.
fn report(operation: &str, transition: Transition) -> Transition {
    if !transition.is_applied() {
        debug!("{operation} ignored outside its valid phase");
    }
    transition
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quiz_core::SessionPhase;
    use quiz_core::model::{QuestionRecord, QuestionSet};
    use quiz_core::time::fixed_clock;

    use crate::bank::StaticBankSource;

    fn flow_with(records: Vec<QuestionRecord>) -> QuizFlowService {
        let source = StaticBankSource::new(QuestionSet::new(records));
        QuizFlowService::new(fixed_clock(), QuestionBankService::new(Arc::new(source)))
    }

    fn choice(prompt: &str) -> QuestionRecord {
        QuestionRecord::multiple_choice(
            prompt,
            vec![
                (AnswerKey::new("a"), "A".to_string()),
                (AnswerKey::new("b"), "B".to_string()),
            ],
            AnswerKey::new("b"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn loaded_session_starts_and_stamps_time() {
        let flow = flow_with(vec![choice("Q1"), choice("Q2")]);
        let mut session = flow.load_session().await.unwrap();

        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(flow.start(&mut session).is_applied());
        assert_eq!(session.started_at(), Some(quiz_core::time::fixed_now()));
    }

    #[tokio::test]
    async fn empty_bank_keeps_start_ignored() {
        let flow = flow_with(Vec::new());
        let mut session = flow.load_session().await.unwrap();

        assert_eq!(flow.start(&mut session), Transition::Ignored);
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }
}
