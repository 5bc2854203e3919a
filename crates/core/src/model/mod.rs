mod category;
mod ids;
mod page;
mod question;
mod scope;
mod session;

pub use category::{Category, CategoryError};
pub use ids::{CategoryId, ParseIdError, QuestionId};
pub use page::{PAGE_SIZE, Page, PageError, page_count};
pub use question::{Difficulty, NewQuestion, Question, QuestionError};
pub use scope::SessionScope;
pub use session::{EndReason, MAX_QUESTIONS_PER_SESSION, SessionSummary, SessionSummaryError};
