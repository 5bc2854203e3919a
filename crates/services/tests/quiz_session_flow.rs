use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::{
    Category, CategoryId, Difficulty, EndReason, MAX_QUESTIONS_PER_SESSION, NewQuestion, Page,
    Question, QuestionId, SessionScope,
};
use quiz_core::time::fixed_clock;
use services::{DrawOutcome, SessionController, SessionPhase};
use storage::{InMemoryProvider, ProviderError, QuestionPage, QuestionProvider, Selection};

/// Serves a fixed sequence of questions and records what it was asked.
struct ScriptedProvider {
    script: Mutex<Vec<Question>>,
    requests: Mutex<Vec<(SessionScope, Vec<QuestionId>)>>,
}

impl ScriptedProvider {
    fn new(questions: Vec<Question>) -> Self {
        let mut script = questions;
        script.reverse();
        Self {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl QuestionProvider for ScriptedProvider {
    async fn list_categories(&self) -> Result<Vec<Category>, ProviderError> {
        Ok(Vec::new())
    }

    async fn list_questions(&self, _page: Page) -> Result<QuestionPage, ProviderError> {
        Ok(QuestionPage::default())
    }

    async fn list_questions_by_category(
        &self,
        _category: CategoryId,
    ) -> Result<QuestionPage, ProviderError> {
        Ok(QuestionPage::default())
    }

    async fn search_questions(&self, _term: &str) -> Result<QuestionPage, ProviderError> {
        Ok(QuestionPage::default())
    }

    async fn create_question(&self, _question: &NewQuestion) -> Result<QuestionId, ProviderError> {
        Err(ProviderError::Unprocessable("read-only".into()))
    }

    async fn delete_question(&self, _id: QuestionId) -> Result<(), ProviderError> {
        Err(ProviderError::NotFound)
    }

    async fn next_quiz_question(
        &self,
        scope: SessionScope,
        exclude: &[QuestionId],
    ) -> Result<Option<Question>, ProviderError> {
        self.requests
            .lock()
            .unwrap()
            .push((scope, exclude.to_vec()));
        Ok(self.script.lock().unwrap().pop())
    }
}

fn question(id: u64, answer: &str) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("Question {id}?"),
        answer,
        Difficulty::new(2).unwrap(),
        CategoryId::new(1),
    )
    .unwrap()
}

fn five_questions() -> Vec<Question> {
    vec![
        question(1, "Paris"),
        question(2, "Apollo 13"),
        question(3, "Maya Angelou"),
        question(4, "Lake Victoria"),
        question(5, "Scarab"),
    ]
}

#[tokio::test]
async fn three_of_five_correct_scores_three() {
    let provider = Arc::new(ScriptedProvider::new(five_questions()));
    let mut ctl = SessionController::new(fixed_clock(), provider.clone());

    ctl.select_category(SessionScope::All).await.unwrap();
    let guesses = ["paris", "apollo", "maya angelou!", "lake", "the scarab beetle"];
    for (i, guess) in guesses.iter().enumerate() {
        assert_eq!(ctl.phase(), SessionPhase::Presenting);
        let outcome = ctl.submit_guess(guess).unwrap();
        assert_eq!(outcome.correct, i % 2 == 0, "guess {guess:?}");
        ctl.advance().await.unwrap();
    }

    assert_eq!(ctl.phase(), SessionPhase::Terminal);
    let snapshot = ctl.snapshot();
    assert_eq!(snapshot.progress.score, 3);
    assert!(snapshot.progress.is_complete);
    let summary = snapshot.summary.unwrap();
    assert_eq!(summary.asked(), 5);
    assert_eq!(summary.reason(), EndReason::BudgetExhausted);

    // Five draws, each excluding everything served before it.
    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 5);
    for (n, (scope, exclude)) in requests.iter().enumerate() {
        assert_eq!(*scope, SessionScope::All);
        let expected: Vec<QuestionId> = (1..=n as u64).map(QuestionId::new).collect();
        assert_eq!(exclude, &expected);
    }
}

#[tokio::test]
async fn advance_after_terminal_is_a_no_op() {
    let provider = Arc::new(ScriptedProvider::new(five_questions()));
    let mut ctl = SessionController::new(fixed_clock(), provider.clone());
    ctl.select_category(SessionScope::All).await.unwrap();
    ctl.force_end().unwrap();

    let before = ctl.snapshot();
    for _ in 0..3 {
        assert_eq!(
            ctl.advance().await.unwrap(),
            DrawOutcome::Finished(EndReason::Forced)
        );
    }
    assert_eq!(ctl.snapshot(), before);
    assert_eq!(provider.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn restart_from_terminal_returns_to_selection() {
    let provider = Arc::new(ScriptedProvider::new(five_questions()));
    let mut ctl = SessionController::new(fixed_clock(), provider);
    ctl.select_category(SessionScope::All).await.unwrap();
    ctl.submit_guess("paris").unwrap();
    ctl.force_end().unwrap();
    assert_eq!(ctl.state().score(), 1);

    ctl.restart();
    assert_eq!(ctl.phase(), SessionPhase::Unselected);
    assert_eq!(ctl.state().score(), 0);
    assert!(ctl.state().history().is_empty());
    assert!(ctl.state().scope().is_none());
    assert!(ctl.summary().is_none());
}

#[tokio::test]
async fn session_invariants_hold_over_random_draws() {
    let provider = InMemoryProvider::new().with_selection(Selection::Random);
    for category in 1..=2 {
        provider
            .insert_category(Category::new(CategoryId::new(category), format!("C{category}")).unwrap())
            .unwrap();
    }
    for id in 1..=9 {
        let q = Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            "yes",
            Difficulty::new(1).unwrap(),
            CategoryId::new(1 + id % 2),
        )
        .unwrap();
        provider.insert_question(q).unwrap();
    }
    let provider = Arc::new(provider);

    for round in 0..20 {
        let scope = if round % 2 == 0 {
            SessionScope::All
        } else {
            SessionScope::Category(CategoryId::new(2))
        };
        let mut ctl = SessionController::new(fixed_clock(), provider.clone());
        ctl.select_category(scope).await.unwrap();

        let mut last_score = 0;
        while ctl.phase() != SessionPhase::Terminal {
            let current = ctl.state().current().unwrap().clone();
            assert!(!ctl.state().history().contains(&current.id()));
            assert!(scope.includes(current.category()));

            let guess = if current.id().value() % 3 == 0 { "no" } else { "yes" };
            ctl.submit_guess(guess).unwrap();
            assert!(ctl.state().score() >= last_score);
            last_score = ctl.state().score();

            ctl.advance().await.unwrap();
            assert!(ctl.state().history().len() <= MAX_QUESTIONS_PER_SESSION);
        }

        let history = ctl.state().history();
        let mut unique = history.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), history.len());
    }
}
