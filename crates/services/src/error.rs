//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SessionSummaryError};
use storage::ProviderError;

use crate::sessions::{SessionAction, SessionPhase};

/// Errors emitted by `SessionController`.
///
/// Every variant leaves the session exactly as it was before the call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question provider unavailable, please try again: {0}")]
    ProviderUnavailable(#[source] ProviderError),
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        phase: SessionPhase,
        action: SessionAction,
    },
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}

impl SessionError {
    /// Whether the same call may succeed when retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_))
    }
}

/// Errors emitted by `QuestionBrowser`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BrowseError {
    #[error("page {page} is out of range (1..={max})")]
    PageOutOfRange { page: u32, max: u32 },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Invalid(#[from] quiz_core::Error),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<QuestionError> for CatalogError {
    fn from(err: QuestionError) -> Self {
        Self::Invalid(err.into())
    }
}
