use std::sync::Arc;

use quiz_core::model::{Category, CategoryId, Difficulty, NewQuestion, QuestionId};
use storage::QuestionProvider;
use tracing::info;

use crate::error::CatalogError;

/// Category listing plus adding and removing questions.
#[derive(Clone)]
pub struct CatalogService {
    questions: Arc<dyn QuestionProvider>,
}

impl CatalogService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionProvider>) -> Self {
        Self { questions }
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Provider` if the provider cannot be reached.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.questions.list_categories().await?)
    }

    /// Validate and store a new question.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` for blank text or a difficulty outside 1..=5;
    /// the provider is not called in that case.
    /// Returns `CatalogError::Provider` if the provider rejects or cannot store it.
    pub async fn create_question(
        &self,
        prompt: &str,
        answer: &str,
        difficulty: i64,
        category: CategoryId,
    ) -> Result<QuestionId, CatalogError> {
        let draft = NewQuestion::new(prompt, answer, Difficulty::new(difficulty)?, category)?;
        let id = self.questions.create_question(&draft).await?;
        info!(question = %id, %category, "question created");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Provider` (`NotFound` when the id is unknown).
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), CatalogError> {
        self.questions.delete_question(id).await?;
        info!(question = %id, "question deleted");
        Ok(())
    }
}
