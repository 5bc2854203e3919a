use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::SessionScope;

/// Maximum number of questions served in a single quiz session.
pub const MAX_QUESTIONS_PER_SESSION: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many questions for a single session: {asked}")]
    TooManyQuestions { asked: usize },

    #[error("score ({score}) exceeds questions asked ({asked})")]
    ScoreExceedsAsked { score: u32, asked: usize },
}

/// Why a quiz session reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// All questions of the session budget were served.
    BudgetExhausted,
    /// The session was ended on request.
    Forced,
    /// The provider had no unseen questions left for the scope.
    QuestionsExhausted,
}

/// Aggregate result of a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    scope: SessionScope,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    asked: usize,
    score: u32,
    reason: EndReason,
}

impl SessionSummary {
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SessionSummaryError::TooManyQuestions` if `asked` exceeds the session budget.
    /// Returns `SessionSummaryError::ScoreExceedsAsked` if more answers were correct than asked.
    pub fn new(
        scope: SessionScope,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        asked: usize,
        score: u32,
        reason: EndReason,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        if asked > MAX_QUESTIONS_PER_SESSION {
            return Err(SessionSummaryError::TooManyQuestions { asked });
        }
        if score as usize > asked {
            return Err(SessionSummaryError::ScoreExceedsAsked { score, asked });
        }

        Ok(Self {
            scope,
            started_at,
            completed_at,
            asked,
            score,
            reason,
        })
    }

    #[must_use]
    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn asked(&self) -> usize {
        self.asked
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn reason(&self) -> EndReason {
        self.reason
    }

    /// Wall-clock duration of the session.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}
