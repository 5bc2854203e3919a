use thiserror::Error;

use crate::model::{CategoryError, PageError, QuestionError, SessionSummaryError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
