use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{
    EndReason, MAX_QUESTIONS_PER_SESSION, Question, QuestionId, SessionScope, SessionSummary,
    SessionSummaryError,
};

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Observable phase of a quiz session, derived from `SessionState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No category chosen yet.
    Unselected,
    /// Scope chosen but no question drawn (initial draw pending or failed).
    AwaitingQuestion,
    /// A question is shown and waits for a guess.
    Presenting,
    /// The answer to the current question is shown.
    Revealed,
    /// The session has ended; only a restart leaves this phase.
    Terminal,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unselected => "no category is selected",
            Self::AwaitingQuestion => "awaiting a question",
            Self::Presenting => "a question is unanswered",
            Self::Revealed => "the answer is revealed",
            Self::Terminal => "the session is over",
        };
        f.write_str(label)
    }
}

/// Controller operations, used to report rejected transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionAction {
    SelectCategory,
    Advance,
    UpdateGuess,
    SubmitGuess,
    ForceEnd,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SelectCategory => "select a category",
            Self::Advance => "advance",
            Self::UpdateGuess => "edit the guess",
            Self::SubmitGuess => "submit a guess",
            Self::ForceEnd => "end the session",
        };
        f.write_str(label)
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Authoritative state of one quiz run.
///
/// Only `SessionController` mutates it; everyone else reads it or a
/// `SessionSnapshot` built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    scope: Option<SessionScope>,
    history: Vec<QuestionId>,
    current: Option<Question>,
    revealed: bool,
    score: u32,
    guess: String,
    last_guess_correct: Option<bool>,
    started_at: Option<DateTime<Utc>>,
    summary: Option<SessionSummary>,
}

impl SessionState {
    pub(crate) fn started(scope: SessionScope, started_at: DateTime<Utc>) -> Self {
        Self {
            scope: Some(scope),
            started_at: Some(started_at),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.scope.is_none() {
            SessionPhase::Unselected
        } else if self.terminated() {
            SessionPhase::Terminal
        } else if self.current.is_none() {
            SessionPhase::AwaitingQuestion
        } else if self.revealed {
            SessionPhase::Revealed
        } else {
            SessionPhase::Presenting
        }
    }

    #[must_use]
    pub fn scope(&self) -> Option<SessionScope> {
        self.scope
    }

    /// Previously served question ids, oldest first.
    #[must_use]
    pub fn history(&self) -> &[QuestionId] {
        &self.history
    }

    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn guess(&self) -> &str {
        &self.guess
    }

    /// Verdict of the last submitted guess for the current question.
    #[must_use]
    pub fn last_guess_correct(&self) -> Option<bool> {
        self.last_guess_correct
    }

    #[must_use]
    pub fn terminated(&self) -> bool {
        self.summary.is_some()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Questions served so far, including the current one.
    #[must_use]
    pub fn served(&self) -> usize {
        self.history.len() + usize::from(self.current.is_some())
    }

    #[must_use]
    pub fn budget_spent(&self) -> bool {
        self.served() >= MAX_QUESTIONS_PER_SESSION
    }

    /// Ids the provider must not serve again.
    #[must_use]
    pub fn exclusions(&self) -> Vec<QuestionId> {
        let mut ids = self.history.clone();
        if let Some(current) = &self.current {
            ids.push(current.id());
        }
        ids
    }

    /// Whether `id` has already been served in this session.
    #[must_use]
    pub fn has_served(&self, id: QuestionId) -> bool {
        self.history.contains(&id) || self.current.as_ref().is_some_and(|q| q.id() == id)
    }

    /// Install a freshly drawn question, moving the previous one into history.
    pub(crate) fn install(&mut self, question: Question) {
        debug_assert!(!self.has_served(question.id()));
        if let Some(previous) = self.current.replace(question) {
            self.history.push(previous.id());
        }
        self.revealed = false;
        self.guess.clear();
        self.last_guess_correct = None;
    }

    pub(crate) fn set_guess(&mut self, text: &str) {
        self.guess.clear();
        self.guess.push_str(text);
    }

    pub(crate) fn record_guess(&mut self, text: &str, correct: bool) {
        self.set_guess(text);
        if correct {
            self.score = self.score.saturating_add(1);
        }
        self.last_guess_correct = Some(correct);
        self.revealed = true;
    }

    /// Close the session. The current question, if any, counts as served.
    ///
    /// A completion time before the start (wall clock stepped back) is
    /// clamped to the start. Nothing changes when the summary cannot be built.
    pub(crate) fn finish(
        &mut self,
        reason: EndReason,
        completed_at: DateTime<Utc>,
    ) -> Result<(), SessionSummaryError> {
        let (Some(scope), Some(started_at)) = (self.scope, self.started_at) else {
            return Ok(());
        };
        let completed_at = completed_at.max(started_at);
        let summary = SessionSummary::new(
            scope,
            started_at,
            completed_at,
            self.served(),
            self.score,
            reason,
        )?;

        if let Some(last) = self.current.take() {
            self.history.push(last.id());
        }
        self.revealed = false;
        self.summary = Some(summary);
        Ok(())
    }
}
