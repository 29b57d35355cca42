use chrono::{DateTime, Utc};
use std::fmt;

use crate::model::{AnswerKey, QuestionRecord, QuestionSet};

/// Fixed countdown allotted to every question, in seconds.
pub const QUESTION_SECONDS: u32 = 30;

//
// ─── PHASES & OUTCOMES ────────────────────────────────────────────────────────
//

/// Explicit session state. A single tagged variant replaces the
/// started/completed boolean pair so contradictory combinations are
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Completed,
}

/// Whether an operation took effect. Calls outside their valid phase are
/// guarded no-ops, reported here so callers can log them as diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session is not counting down (not in progress).
    Idle,
    /// The countdown decremented; the remaining seconds are attached.
    Counting(u32),
    /// The countdown reached zero and triggered exactly one advance.
    AutoAdvanced,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    /// One-based position of the current question.
    pub position: usize,
    /// Questions that have received at least one selection this pass.
    pub answered: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// The quiz session state machine.
///
/// `NotStarted → InProgress → Completed`, with a self-loop on `InProgress`
/// for each question transition and `restart` returning to `NotStarted`.
/// All operations are synchronous, non-blocking state mutations; the caller
/// supplies timestamps from the services clock.
pub struct QuizSession {
    questions: QuestionSet,
    phase: SessionPhase,
    current: usize,
    selected: Option<AnswerKey>,
    score: u32,
    remaining_seconds: u32,
    // Scoring fires only on the first selection per question per pass;
    // later selections are recorded but never rescored.
    answered: Vec<bool>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Wrap a loaded question set. The session stays in `NotStarted` until
    /// `start`; an empty set keeps `start` a no-op ("still loading").
    #[must_use]
    pub fn new(questions: QuestionSet) -> Self {
        let answered = vec![false; questions.len()];
        Self {
            questions,
            phase: SessionPhase::NotStarted,
            current: 0,
            selected: None,
            score: 0,
            remaining_seconds: QUESTION_SECONDS,
            answered,
            started_at: None,
            completed_at: None,
        }
    }

    //
    // ─── TRANSITIONS ──────────────────────────────────────────────────────
    //

    /// Begin the session. Valid only from `NotStarted` with a non-empty set.
    pub fn start(&mut self, now: DateTime<Utc>) -> Transition {
        if self.phase != SessionPhase::NotStarted || self.questions.is_empty() {
            return Transition::Ignored;
        }

        self.phase = SessionPhase::InProgress;
        self.current = 0;
        self.score = 0;
        self.reset_question_view();
        self.started_at = Some(now);
        Transition::Applied
    }

    /// Record a selection for the current question.
    ///
    /// The first selection for a question within a pass is the scoring one:
    /// a correct choice-mode key increments the score by exactly one.
    /// Later selections update the recorded answer without re-evaluating.
    /// Free-text responses are recorded but never scored. Does not advance.
    pub fn select_answer(&mut self, key: AnswerKey) -> Transition {
        if self.phase != SessionPhase::InProgress {
            return Transition::Ignored;
        }
        let Some(question) = self.questions.get(self.current) else {
            return Transition::Ignored;
        };

        if !self.answered[self.current] {
            self.answered[self.current] = true;
            if question.is_correct(&key) {
                self.score += 1;
            }
        }
        self.selected = Some(key);
        Transition::Applied
    }

    /// Move to the next question, or complete the session at the last index.
    ///
    /// Shared verbatim by user action and timer expiry. At the last index
    /// the position is left unchanged and the phase becomes `Completed`.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Transition {
        if self.phase != SessionPhase::InProgress {
            return Transition::Ignored;
        }

        if self.current + 1 >= self.questions.len() {
            self.phase = SessionPhase::Completed;
            self.completed_at = Some(now);
        } else {
            self.current += 1;
            self.reset_question_view();
        }
        Transition::Applied
    }

    /// Step back one question. A disabled affordance, not an error, at
    /// index zero.
    pub fn retreat(&mut self) -> Transition {
        if self.phase != SessionPhase::InProgress || self.current == 0 {
            return Transition::Ignored;
        }

        self.current -= 1;
        self.reset_question_view();
        Transition::Applied
    }

    /// Count down one second. The tick that reaches zero triggers exactly
    /// one `advance`, the only engine-internal transition trigger.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if self.phase != SessionPhase::InProgress || self.remaining_seconds == 0 {
            return TickOutcome::Idle;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.advance(now);
            return TickOutcome::AutoAdvanced;
        }
        TickOutcome::Counting(self.remaining_seconds)
    }

    /// Reinitialize all session fields to their start-of-session defaults.
    /// The question set is untouched. Valid from any state.
    pub fn restart(&mut self) -> Transition {
        self.phase = SessionPhase::NotStarted;
        self.current = 0;
        self.score = 0;
        self.reset_question_view();
        self.answered = vec![false; self.questions.len()];
        self.started_at = None;
        self.completed_at = None;
        Transition::Applied
    }

    // Selection and countdown change together on every navigation.
    fn reset_question_view(&mut self) {
        self.selected = None;
        self.remaining_seconds = QUESTION_SECONDS;
    }

    //
    // ─── READ ACCESS ──────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&AnswerKey> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn question_set(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.phase == SessionPhase::InProgress && self.current > 0
    }

    /// Completed fraction of the pass: `(current + 1) / total`, or zero for
    /// an empty set. Purely observational.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f32 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.current as f32 + 1.0) / self.questions.len() as f32
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            position: (self.current + 1).min(self.questions.len()),
            answered: self.answered.iter().filter(|seen| **seen).count(),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("score", &self.score)
            .field("remaining_seconds", &self.remaining_seconds)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//
