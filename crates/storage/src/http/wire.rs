//! JSON shapes of the trivia REST API and their conversion into domain types.

use std::collections::BTreeMap;

use quiz_core::model::{Category, CategoryId, Difficulty, NewQuestion, Question, QuestionId};
use serde::{Deserialize, Serialize};

use crate::repository::{ProviderError, QuestionPage};

/// Ids arrive either as numbers or as numeric strings depending on the column type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireId {
    Number(u64),
    Text(String),
}

impl WireId {
    fn value(&self) -> Result<u64, ProviderError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ProviderError::Malformed(format!("invalid id {s:?}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionDto {
    id: WireId,
    question: String,
    answer: String,
    difficulty: i64,
    category: WireId,
}

impl QuestionDto {
    pub(crate) fn into_question(self) -> Result<Question, ProviderError> {
        let difficulty =
            Difficulty::new(self.difficulty).map_err(|e| ProviderError::Malformed(e.to_string()))?;
        Question::new(
            QuestionId::new(self.id.value()?),
            self.question,
            self.answer,
            difficulty,
            CategoryId::new(self.category.value()?),
        )
        .map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryDto {
    id: WireId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    categories: BTreeMap<String, String>,
}

impl CategoriesResponse {
    pub(crate) fn into_categories(self) -> Result<Vec<Category>, ProviderError> {
        parse_categories(self.categories)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    questions: Vec<QuestionDto>,
    total_questions: u64,
    #[serde(default)]
    categories: BTreeMap<String, String>,
    #[serde(default)]
    current_category: Option<CategoryDto>,
}

impl ListResponse {
    pub(crate) fn into_page(self) -> Result<QuestionPage, ProviderError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionDto::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        let current_category = self
            .current_category
            .map(|c| c.id.value().map(CategoryId::new))
            .transpose()?;
        Ok(QuestionPage {
            questions,
            total_questions: self.total_questions,
            categories: parse_categories(self.categories)?,
            current_category,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedResponse {
    pub(crate) created: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizResponse {
    #[serde(default)]
    pub(crate) question: Option<QuestionDto>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    #[serde(rename = "searchTerm")]
    pub(crate) search_term: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRequest<'a> {
    question: &'a str,
    answer: &'a str,
    difficulty: u8,
    category: u64,
}

impl<'a> From<&'a NewQuestion> for CreateRequest<'a> {
    fn from(q: &'a NewQuestion) -> Self {
        Self {
            question: q.prompt(),
            answer: q.answer(),
            difficulty: q.difficulty().value(),
            category: q.category().value(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizCategory {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) id: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizRequest {
    pub(crate) quiz_category: QuizCategory,
    pub(crate) previous_questions: Vec<u64>,
}

fn parse_categories(raw: BTreeMap<String, String>) -> Result<Vec<Category>, ProviderError> {
    let mut categories = raw
        .into_iter()
        .map(|(id, name)| {
            let id: CategoryId = id
                .parse()
                .map_err(|e: quiz_core::model::ParseIdError| ProviderError::Malformed(e.to_string()))?;
            Category::new(id, name).map_err(|e| ProviderError::Malformed(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    // String keys sort lexicographically ("10" < "2").
    categories.sort_by_key(Category::id);
    Ok(categories)
}
