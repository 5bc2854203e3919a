use std::fmt;
use std::sync::Arc;

use quiz_core::matcher;
use quiz_core::model::{EndReason, Question, QuestionId, SessionScope, SessionSummary};
use storage::{ProviderError, QuestionProvider};
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::Clock;
use super::state::{SessionAction, SessionPhase, SessionState};
use super::view::SessionSnapshot;

//
// ─── DRAW PROTOCOL ─────────────────────────────────────────────────────────────
//

/// A pending question draw, tagged with the session it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawTicket {
    generation: u64,
    served: usize,
    scope: SessionScope,
    exclude: Vec<QuestionId>,
}

impl DrawTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    /// Ids the provider must not return.
    #[must_use]
    pub fn exclude(&self) -> &[QuestionId] {
        &self.exclude
    }
}

/// First half of an advance: either fetch a question or nothing to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawStep {
    /// Ask the provider, then hand the result to `SessionController::apply_draw`.
    Fetch(DrawTicket),
    /// The session is over; no provider call is needed.
    Finished(EndReason),
}

/// Result of applying a question draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Presented(QuestionId),
    Finished(EndReason),
    /// The response belongs to an older session or an already applied draw
    /// and was discarded.
    Stale,
}

/// Verdict for a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub correct: bool,
    pub answer: String,
    pub score: u32,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one quiz session at a time: category selection, question delivery,
/// guess evaluation and termination.
///
/// All transitions take `&mut self`, so they run one after another. Provider
/// calls are the only suspension points; their results are applied in one
/// step or not at all.
pub struct SessionController {
    clock: Clock,
    questions: Arc<dyn QuestionProvider>,
    state: SessionState,
    generation: u64,
}

impl SessionController {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionProvider>) -> Self {
        Self {
            clock,
            questions,
            state: SessionState::default(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Bumped on every selection and restart.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.state, self.generation)
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.state.summary()
    }

    /// Start a session for `scope` and draw its first question.
    ///
    /// A session that already has a scope must be restarted first. If the
    /// first draw fails the session stays in `AwaitingQuestion` and
    /// `advance` can retry it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` if a session is already active.
    /// Returns `SessionError::ProviderUnavailable` if the first draw fails.
    pub async fn select_category(
        &mut self,
        scope: SessionScope,
    ) -> Result<DrawOutcome, SessionError> {
        self.ensure(SessionAction::SelectCategory, &[SessionPhase::Unselected])?;

        self.generation += 1;
        self.state = SessionState::started(scope, self.clock.now());
        info!(%scope, generation = self.generation, "quiz session started");

        self.advance().await
    }

    /// Serve the next question, or close the session when its budget is spent.
    ///
    /// A no-op on a terminated session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` before a category is chosen or
    /// while the current question is unanswered.
    /// Returns `SessionError::ProviderUnavailable` if the draw fails; the
    /// session is left unchanged.
    pub async fn advance(&mut self) -> Result<DrawOutcome, SessionError> {
        let ticket = match self.begin_draw()? {
            DrawStep::Fetch(ticket) => ticket,
            DrawStep::Finished(reason) => return Ok(DrawOutcome::Finished(reason)),
        };

        let result = self
            .questions
            .next_quiz_question(ticket.scope, &ticket.exclude)
            .await;
        self.apply_draw(ticket, result)
    }

    /// Prepare a draw without calling the provider.
    ///
    /// Closes the session right away when the question budget is spent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` before a category is chosen or
    /// while the current question is unanswered.
    pub fn begin_draw(&mut self) -> Result<DrawStep, SessionError> {
        if let Some(summary) = self.state.summary() {
            return Ok(DrawStep::Finished(summary.reason()));
        }
        self.ensure(
            SessionAction::Advance,
            &[SessionPhase::AwaitingQuestion, SessionPhase::Revealed],
        )?;

        if self.state.budget_spent() {
            self.finish(EndReason::BudgetExhausted)?;
            return Ok(DrawStep::Finished(EndReason::BudgetExhausted));
        }

        let Some(scope) = self.state.scope() else {
            return Err(self.rejected(SessionAction::Advance));
        };
        Ok(DrawStep::Fetch(DrawTicket {
            generation: self.generation,
            served: self.state.served(),
            scope,
            exclude: self.state.exclusions(),
        }))
    }

    /// Apply the provider's answer to a ticket from `begin_draw`.
    ///
    /// Tickets from an earlier session, or whose session has moved on since
    /// they were issued, are discarded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ProviderUnavailable` for provider failures and for
    /// questions that were already served or fall outside the scope.
    pub fn apply_draw(
        &mut self,
        ticket: DrawTicket,
        result: Result<Option<Question>, ProviderError>,
    ) -> Result<DrawOutcome, SessionError> {
        if !self.is_current(&ticket) {
            warn!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "discarding stale question draw"
            );
            return Ok(DrawOutcome::Stale);
        }

        let question = match result {
            Ok(Some(question)) => question,
            Ok(None) => {
                info!(scope = %ticket.scope, "no unseen questions left in scope");
                self.finish(EndReason::QuestionsExhausted)?;
                return Ok(DrawOutcome::Finished(EndReason::QuestionsExhausted));
            }
            Err(err) => {
                warn!(error = %err, transient = err.is_transient(), "question draw failed");
                return Err(SessionError::ProviderUnavailable(err));
            }
        };

        if self.state.has_served(question.id()) {
            return Err(SessionError::ProviderUnavailable(ProviderError::Malformed(
                format!("question {} was already served", question.id()),
            )));
        }
        if !ticket.scope.includes(question.category()) {
            return Err(SessionError::ProviderUnavailable(ProviderError::Malformed(
                format!(
                    "question {} is outside {}",
                    question.id(),
                    ticket.scope
                ),
            )));
        }

        let id = question.id();
        self.state.install(question);
        debug!(question = %id, served = self.state.served(), "question presented");
        Ok(DrawOutcome::Presented(id))
    }

    /// Record in-progress input for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless a question awaits a guess.
    pub fn update_guess(&mut self, text: &str) -> Result<(), SessionError> {
        self.ensure(SessionAction::UpdateGuess, &[SessionPhase::Presenting])?;
        self.state.set_guess(text);
        Ok(())
    }

    /// Evaluate a guess for the current question and reveal its answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless a question awaits a guess,
    /// which includes a second submission for the same question.
    pub fn submit_guess(&mut self, text: &str) -> Result<GuessOutcome, SessionError> {
        self.ensure(SessionAction::SubmitGuess, &[SessionPhase::Presenting])?;
        let Some(answer) = self.state.current().map(|q| q.answer().to_owned()) else {
            return Err(self.rejected(SessionAction::SubmitGuess));
        };

        let correct = matcher::matches(text, &answer);
        self.state.record_guess(text, correct);
        debug!(correct, score = self.state.score(), "guess evaluated");

        Ok(GuessOutcome {
            correct,
            answer,
            score: self.state.score(),
        })
    }

    /// End the session now, whatever its question count.
    ///
    /// Calling it on a terminated session does nothing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` before a category is chosen.
    pub fn force_end(&mut self) -> Result<(), SessionError> {
        match self.phase() {
            SessionPhase::Terminal => Ok(()),
            SessionPhase::Unselected => Err(self.rejected(SessionAction::ForceEnd)),
            _ => self.finish(EndReason::Forced),
        }
    }

    /// Discard the session and go back to category selection.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.state = SessionState::default();
        info!(generation = self.generation, "quiz session restarted");
    }

    fn finish(&mut self, reason: EndReason) -> Result<(), SessionError> {
        self.state.finish(reason, self.clock.now())?;
        info!(
            ?reason,
            score = self.state.score(),
            served = self.state.history().len(),
            "quiz session finished"
        );
        Ok(())
    }

    fn is_current(&self, ticket: &DrawTicket) -> bool {
        ticket.generation == self.generation
            && ticket.served == self.state.served()
            && matches!(
                self.phase(),
                SessionPhase::AwaitingQuestion | SessionPhase::Revealed
            )
    }

    fn ensure(&self, action: SessionAction, allowed: &[SessionPhase]) -> Result<(), SessionError> {
        if allowed.contains(&self.phase()) {
            Ok(())
        } else {
            Err(self.rejected(action))
        }
    }

    fn rejected(&self, action: SessionAction) -> SessionError {
        SessionError::InvalidTransition {
            phase: self.phase(),
            action,
        }
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("phase", &self.phase())
            .field("generation", &self.generation)
            .field("scope", &self.state.scope())
            .field("history_len", &self.state.history().len())
            .field("score", &self.state.score())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
