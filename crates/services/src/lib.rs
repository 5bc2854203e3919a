#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod question_browser;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use error::{BrowseError, CatalogError, SessionError};
pub use question_browser::{Listing, QuestionBrowser};

pub use sessions::{
    DrawOutcome, DrawStep, DrawTicket, GuessOutcome, QuestionView, SessionAction,
    SessionController, SessionPhase, SessionProgress, SessionSnapshot, SessionState,
};
