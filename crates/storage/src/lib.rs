#![forbid(unsafe_code)]

pub mod http;
pub mod repository;

pub use repository::{InMemoryProvider, ProviderError, QuestionPage, QuestionProvider, Selection, Storage};
