use std::sync::Arc;

use storage::{QuestionProvider, Storage};

use crate::catalog_service::CatalogService;
use crate::question_browser::QuestionBrowser;
use crate::sessions::SessionController;
use crate::Clock;

/// Assembles app-facing services around one question provider.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    questions: Arc<dyn QuestionProvider>,
    catalog: Arc<CatalogService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock) -> Self {
        let questions = Arc::clone(&storage.questions);
        let catalog = Arc::new(CatalogService::new(Arc::clone(&questions)));
        Self {
            clock,
            questions,
            catalog,
        }
    }

    /// A fresh controller with no session selected.
    #[must_use]
    pub fn session_controller(&self) -> SessionController {
        SessionController::new(self.clock, Arc::clone(&self.questions))
    }

    #[must_use]
    pub fn question_browser(&self) -> QuestionBrowser {
        QuestionBrowser::new(Arc::clone(&self.questions))
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }
}
