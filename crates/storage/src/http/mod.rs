//! `QuestionProvider` backed by the trivia REST API.

mod config;
mod wire;

pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HttpProviderConfig};

use async_trait::async_trait;
use quiz_core::model::{Category, CategoryId, NewQuestion, Page, Question, QuestionId, SessionScope};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::repository::{ProviderError, QuestionPage, QuestionProvider};
use wire::{
    CategoriesResponse, CreateRequest, CreatedResponse, ListResponse, QuizCategory, QuizRequest,
    QuizResponse, SearchRequest,
};

#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    config: HttpProviderConfig,
}

impl HttpProvider {
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if the HTTP client cannot be built.
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProviderError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "trivia api request failed");
            if e.is_timeout() {
                ProviderError::Unavailable(format!(
                    "request timed out after {}s",
                    self.config.timeout.as_secs()
                ))
            } else if e.is_connect() {
                ProviderError::Unavailable(format!(
                    "trivia api not reachable at {}",
                    self.config.base_url
                ))
            } else {
                ProviderError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        debug!(%status, bytes = body.len(), "trivia api response");

        match status {
            s if s.is_success() => serde_json::from_str(&body)
                .map_err(|e| ProviderError::Malformed(format!("failed to parse response: {e}"))),
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound),
            StatusCode::UNPROCESSABLE_ENTITY => Err(ProviderError::Unprocessable(body)),
            other => Err(ProviderError::Unavailable(format!("HTTP {other}"))),
        }
    }
}

#[async_trait]
impl QuestionProvider for HttpProvider {
    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, ProviderError> {
        let url = self.config.endpoint("categories");
        let body: CategoriesResponse = self.send(self.client.get(url)).await?;
        body.into_categories()
    }

    #[instrument(skip(self))]
    async fn list_questions(&self, page: Page) -> Result<QuestionPage, ProviderError> {
        let url = self.config.endpoint("questions");
        let request = self.client.get(url).query(&[("page", page.value())]);
        let body: ListResponse = self.send(request).await?;
        body.into_page()
    }

    #[instrument(skip(self))]
    async fn list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<QuestionPage, ProviderError> {
        let url = self.config.endpoint(&format!("categories/{category}/questions"));
        let body: ListResponse = self.send(self.client.get(url)).await?;
        let mut page = body.into_page()?;
        page.current_category.get_or_insert(category);
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn search_questions(&self, term: &str) -> Result<QuestionPage, ProviderError> {
        let url = self.config.endpoint("search");
        let request = self.client.post(url).json(&SearchRequest { search_term: term });
        let body: ListResponse = self.send(request).await?;
        body.into_page()
    }

    #[instrument(skip(self, question), fields(category = %question.category()))]
    async fn create_question(&self, question: &NewQuestion) -> Result<QuestionId, ProviderError> {
        let url = self.config.endpoint("create_question");
        let request = self.client.post(url).json(&CreateRequest::from(question));
        let body: CreatedResponse = self.send(request).await?;
        Ok(QuestionId::new(body.created))
    }

    #[instrument(skip(self))]
    async fn delete_question(&self, id: QuestionId) -> Result<(), ProviderError> {
        let url = self.config.endpoint(&format!("questions/{id}"));
        let _: serde_json::Value = self.send(self.client.delete(url)).await?;
        Ok(())
    }

    #[instrument(skip(self, exclude), fields(excluded = exclude.len()))]
    async fn next_quiz_question(
        &self,
        scope: SessionScope,
        exclude: &[QuestionId],
    ) -> Result<Option<Question>, ProviderError> {
        let url = self.config.endpoint("quizzes");
        let kind = match scope {
            SessionScope::All => "ALL".to_owned(),
            SessionScope::Category(id) => id.to_string(),
        };
        let payload = QuizRequest {
            quiz_category: QuizCategory {
                kind,
                id: scope.wire_id(),
            },
            previous_questions: exclude.iter().map(QuestionId::value).collect(),
        };
        let body: QuizResponse = self.send(self.client.post(url).json(&payload)).await?;
        body.question.map(wire::QuestionDto::into_question).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> HttpProvider {
        HttpProvider::new(HttpProviderConfig::default().with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn lists_categories_in_id_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "categories": {"1": "Science", "2": "Art", "3": "Geography"},
            })))
            .mount(&server)
            .await;

        let categories = provider(&server).list_categories().await.unwrap();
        let names: Vec<&str> = categories.iter().map(Category::name).collect();
        assert_eq!(names, vec!["Science", "Art", "Geography"]);
    }

    #[tokio::test]
    async fn passes_page_as_query_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/questions"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "questions": [
                    {"id": 11, "question": "What boxer's original name is Cassius Clay?",
                     "answer": "Muhammad Ali", "difficulty": 1, "category": 4}
                ],
                "total_questions": 11,
                "categories": {"4": "History"},
            })))
            .mount(&server)
            .await;

        let page = provider(&server)
            .list_questions(Page::new(2).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total_questions, 11);
        assert_eq!(page.questions[0].answer(), "Muhammad Ali");
    }

    #[tokio::test]
    async fn quiz_request_sends_scope_and_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quizzes"))
            .and(body_json(serde_json::json!({
                "quiz_category": {"type": "3", "id": 3},
                "previous_questions": [13, 14],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "question": {"id": 15, "question": "The Taj Mahal is located in which Indian city?",
                             "answer": "Agra", "difficulty": 2, "category": 3},
            })))
            .mount(&server)
            .await;

        let question = provider(&server)
            .next_quiz_question(
                SessionScope::Category(CategoryId::new(3)),
                &[QuestionId::new(13), QuestionId::new(14)],
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(question.id(), QuestionId::new(15));
    }

    #[tokio::test]
    async fn null_quiz_question_means_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quizzes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "question": null})),
            )
            .mount(&server)
            .await;

        let next = provider(&server)
            .next_quiz_question(SessionScope::All, &[])
            .await
            .unwrap();
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn maps_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/questions/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "success": false, "error": 404, "message": "Resource Not Found",
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = provider(&server);
        assert_eq!(
            provider.delete_question(QuestionId::new(99)).await.unwrap_err(),
            ProviderError::NotFound
        );
        let err = provider.search_questions("title").await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn garbage_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider(&server).list_categories().await.unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[tokio::test]
    async fn create_posts_question_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/create_question"))
            .and(body_json(serde_json::json!({
                "question": "Which dung beetle was worshipped by the ancient Egyptians?",
                "answer": "Scarab",
                "difficulty": 4,
                "category": 4,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true, "created": 24, "total_questions": 20,
            })))
            .mount(&server)
            .await;

        let draft = NewQuestion::new(
            "Which dung beetle was worshipped by the ancient Egyptians?",
            "Scarab",
            quiz_core::model::Difficulty::new(4).unwrap(),
            CategoryId::new(4),
        )
        .unwrap();
        let id = provider(&server).create_question(&draft).await.unwrap();
        assert_eq!(id, QuestionId::new(24));
    }

    #[tokio::test]
    async fn unreachable_server_is_transient() {
        let config = HttpProviderConfig::default().with_base_url("http://127.0.0.1:9");
        let provider = HttpProvider::new(config).unwrap();
        let err = provider.list_categories().await.unwrap_err();
        assert!(err.is_transient());
    }
}
