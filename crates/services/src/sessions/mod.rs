mod controller;
mod progress;
mod state;
mod view;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use controller::{DrawOutcome, DrawStep, DrawTicket, GuessOutcome, SessionController};
pub use progress::SessionProgress;
pub use state::{SessionAction, SessionPhase, SessionState};
pub use view::{QuestionView, SessionSnapshot};
