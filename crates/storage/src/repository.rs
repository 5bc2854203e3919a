use async_trait::async_trait;
use quiz_core::model::{
    Category, CategoryId, NewQuestion, PAGE_SIZE, Page, Question, QuestionId, SessionScope,
};
use rand::seq::IndexedRandom;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::http::{HttpProvider, HttpProviderConfig};

/// Errors surfaced by question providers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("not found")]
    NotFound,

    #[error("unprocessable request: {0}")]
    Unprocessable(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Whether retrying the same request later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// One page of a question listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: u64,
    pub categories: Vec<Category>,
    pub current_category: Option<CategoryId>,
}

/// Contract for the question/category service backing quizzes and listings.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// All categories ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the provider cannot be reached.
    async fn list_categories(&self) -> Result<Vec<Category>, ProviderError>;

    /// Questions of the given page across all categories.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` for a page past the end.
    async fn list_questions(&self, page: Page) -> Result<QuestionPage, ProviderError>;

    /// First page of questions for one category.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` if the category does not exist.
    async fn list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<QuestionPage, ProviderError>;

    /// Questions whose prompt contains `term`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the provider cannot be reached.
    async fn search_questions(&self, term: &str) -> Result<QuestionPage, ProviderError>;

    /// Store a new question and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unprocessable` if the question is rejected.
    async fn create_question(&self, question: &NewQuestion) -> Result<QuestionId, ProviderError>;

    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` if the question does not exist.
    async fn delete_question(&self, id: QuestionId) -> Result<(), ProviderError>;

    /// A question in `scope` not listed in `exclude`, or `None` when the
    /// scope has no unseen questions left.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the provider cannot be reached or replies
    /// with an invalid question.
    async fn next_quiz_question(
        &self,
        scope: SessionScope,
        exclude: &[QuestionId],
    ) -> Result<Option<Question>, ProviderError>;
}

//
// ─── IN-MEMORY PROVIDER ────────────────────────────────────────────────────────
//

/// How the in-memory provider picks the next quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Random,
    /// Always the unseen question with the lowest id; for deterministic tests.
    LowestId,
}

#[derive(Default)]
struct Catalog {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    offline: bool,
}

impl Catalog {
    fn categories(&self) -> Vec<Category> {
        self.categories.values().cloned().collect()
    }

    fn page_of<'a>(
        &self,
        matching: impl Iterator<Item = &'a Question>,
        page: Page,
        current_category: Option<CategoryId>,
    ) -> QuestionPage {
        let all: Vec<&Question> = matching.collect();
        let questions = all
            .iter()
            .skip(page.offset())
            .take(PAGE_SIZE as usize)
            .map(|q| (*q).clone())
            .collect();
        QuestionPage {
            questions,
            total_questions: all.len() as u64,
            categories: self.categories(),
            current_category,
        }
    }
}

/// Simple in-memory provider for testing, demos and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryProvider {
    catalog: Arc<Mutex<Catalog>>,
    selection: Selection,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the catalog lock is poisoned.
    pub fn insert_category(&self, category: Category) -> Result<(), ProviderError> {
        let mut guard = self.lock()?;
        guard.categories.insert(category.id(), category);
        Ok(())
    }

    /// Insert a question with a caller-chosen id, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the catalog lock is poisoned.
    pub fn insert_question(&self, question: Question) -> Result<(), ProviderError> {
        let mut guard = self.lock()?;
        guard.questions.insert(question.id(), question);
        Ok(())
    }

    /// Simulate an unreachable provider: every call fails while offline.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the catalog lock is poisoned.
    pub fn set_offline(&self, offline: bool) -> Result<(), ProviderError> {
        let mut guard = self
            .catalog
            .lock()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        guard.offline = offline;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Catalog>, ProviderError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        if guard.offline {
            return Err(ProviderError::Unavailable("provider is offline".into()));
        }
        Ok(guard)
    }

    fn pick(&self, candidates: &[&Question]) -> Option<Question> {
        match self.selection {
            Selection::Random => candidates.choose(&mut rand::rng()).map(|q| (*q).clone()),
            Selection::LowestId => candidates.iter().min_by_key(|q| q.id()).map(|q| (*q).clone()),
        }
    }
}

#[async_trait]
impl QuestionProvider for InMemoryProvider {
    async fn list_categories(&self) -> Result<Vec<Category>, ProviderError> {
        let guard = self.lock()?;
        Ok(guard.categories())
    }

    async fn list_questions(&self, page: Page) -> Result<QuestionPage, ProviderError> {
        let guard = self.lock()?;
        let listing = guard.page_of(guard.questions.values(), page, None);
        if listing.questions.is_empty() && page != Page::FIRST {
            return Err(ProviderError::NotFound);
        }
        Ok(listing)
    }

    async fn list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<QuestionPage, ProviderError> {
        let guard = self.lock()?;
        if !guard.categories.contains_key(&category) {
            return Err(ProviderError::NotFound);
        }
        let matching = guard.questions.values().filter(|q| q.category() == category);
        Ok(guard.page_of(matching, Page::FIRST, Some(category)))
    }

    async fn search_questions(&self, term: &str) -> Result<QuestionPage, ProviderError> {
        let guard = self.lock()?;
        let needle = term.to_lowercase();
        let matching = guard
            .questions
            .values()
            .filter(|q| q.prompt().to_lowercase().contains(&needle));
        Ok(guard.page_of(matching, Page::FIRST, None))
    }

    async fn create_question(&self, question: &NewQuestion) -> Result<QuestionId, ProviderError> {
        let mut guard = self.lock()?;
        if !guard.categories.contains_key(&question.category()) {
            return Err(ProviderError::Unprocessable(format!(
                "unknown category {}",
                question.category()
            )));
        }
        let next = guard
            .questions
            .keys()
            .next_back()
            .map_or(1, |id| id.value() + 1);
        let id = QuestionId::new(next);
        guard.questions.insert(id, question.clone().with_id(id));
        Ok(id)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), ProviderError> {
        let mut guard = self.lock()?;
        guard
            .questions
            .remove(&id)
            .map(|_| ())
            .ok_or(ProviderError::NotFound)
    }

    async fn next_quiz_question(
        &self,
        scope: SessionScope,
        exclude: &[QuestionId],
    ) -> Result<Option<Question>, ProviderError> {
        let guard = self.lock()?;
        let seen: HashSet<QuestionId> = exclude.iter().copied().collect();
        let candidates: Vec<&Question> = guard
            .questions
            .values()
            .filter(|q| scope.includes(q.category()) && !seen.contains(&q.id()))
            .collect();
        Ok(self.pick(&candidates))
    }
}

/// Provider handle behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionProvider>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(provider: InMemoryProvider) -> Self {
        Self {
            questions: Arc::new(provider),
        }
    }

    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the HTTP client cannot be built.
    pub fn http(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            questions: Arc::new(HttpProvider::new(config)?),
        })
    }
}
