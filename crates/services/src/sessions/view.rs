use quiz_core::model::{
    CategoryId, Difficulty, MAX_QUESTIONS_PER_SESSION, Question, QuestionId, SessionScope,
    SessionSummary,
};

use super::progress::SessionProgress;
use super::state::{SessionPhase, SessionState};

/// The question as shown to the player; the answer is withheld until reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: QuestionId,
    pub prompt: String,
    pub difficulty: Difficulty,
    pub category: CategoryId,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id(),
            prompt: question.prompt().to_owned(),
            difficulty: question.difficulty(),
            category: question.category(),
        }
    }
}

/// Immutable, presentation-ready copy of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub phase: SessionPhase,
    pub scope: Option<SessionScope>,
    pub question: Option<QuestionView>,
    /// Canonical answer, only once revealed.
    pub answer: Option<String>,
    pub guess: String,
    pub last_guess_correct: Option<bool>,
    pub progress: SessionProgress,
    pub summary: Option<SessionSummary>,
}

impl SessionSnapshot {
    pub(crate) fn capture(state: &SessionState, generation: u64) -> Self {
        let answer = state
            .current()
            .filter(|_| state.revealed())
            .map(|q| q.answer().to_owned());
        let served = state.served();

        Self {
            generation,
            phase: state.phase(),
            scope: state.scope(),
            question: state.current().map(QuestionView::from),
            answer,
            guess: state.guess().to_owned(),
            last_guess_correct: state.last_guess_correct(),
            progress: SessionProgress {
                total: MAX_QUESTIONS_PER_SESSION,
                served,
                remaining: MAX_QUESTIONS_PER_SESSION.saturating_sub(served),
                score: state.score(),
                is_complete: state.terminated(),
            },
            summary: state.summary().cloned(),
        }
    }
}
