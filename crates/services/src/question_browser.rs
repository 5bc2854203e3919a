use std::sync::Arc;

use quiz_core::model::{Category, CategoryId, Page, Question, page_count};
use storage::{QuestionPage, QuestionProvider};
use tracing::debug;

use crate::error::BrowseError;

/// What the browser is currently listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Listing {
    #[default]
    All,
    Category(CategoryId),
    Search(String),
}

/// Paginated question list: one page at a time, replaced on every request.
pub struct QuestionBrowser {
    questions: Arc<dyn QuestionProvider>,
    listing: Listing,
    page: Page,
    total: u64,
    loaded: bool,
    categories: Vec<Category>,
    current_category: Option<CategoryId>,
    shown: Vec<Question>,
}

impl QuestionBrowser {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionProvider>) -> Self {
        Self {
            questions,
            listing: Listing::default(),
            page: Page::FIRST,
            total: 0,
            loaded: false,
            categories: Vec::new(),
            current_category: None,
            shown: Vec::new(),
        }
    }

    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn total_questions(&self) -> u64 {
        self.total
    }

    /// `ceil(total / PAGE_SIZE)` for the last loaded listing.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        page_count(self.total)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.shown
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn current_category(&self) -> Option<CategoryId> {
        self.current_category
    }

    /// Display name of a category, if known from the last listing.
    #[must_use]
    pub fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id() == id)
            .map(Category::name)
    }

    /// Show one page of the full question list.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::PageOutOfRange` for page `0` or a page past the
    /// last one of the previous listing.
    /// Returns `BrowseError::Provider` if the listing cannot be fetched.
    pub async fn load_page(&mut self, page: u32) -> Result<&[Question], BrowseError> {
        let max = self.page_count().max(1);
        let page = Page::new(page).map_err(|_| BrowseError::PageOutOfRange { page, max })?;
        if self.loaded && self.listing == Listing::All && page.value() > max {
            return Err(BrowseError::PageOutOfRange {
                page: page.value(),
                max,
            });
        }

        let listing = self.questions.list_questions(page).await?;
        self.replace(Listing::All, page, listing);
        Ok(&self.shown)
    }

    /// Show the questions of one category.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Provider` if the category is unknown or the
    /// listing cannot be fetched.
    pub async fn show_category(&mut self, category: CategoryId) -> Result<&[Question], BrowseError> {
        let listing = self.questions.list_questions_by_category(category).await?;
        self.replace(Listing::Category(category), Page::FIRST, listing);
        Ok(&self.shown)
    }

    /// Show questions whose prompt contains `term`. A blank term shows the
    /// first page of the full list.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Provider` if the listing cannot be fetched.
    pub async fn search(&mut self, term: &str) -> Result<&[Question], BrowseError> {
        let term = term.trim();
        if term.is_empty() {
            return self.load_page(1).await;
        }
        let listing = self.questions.search_questions(term).await?;
        self.replace(Listing::Search(term.to_owned()), Page::FIRST, listing);
        Ok(&self.shown)
    }

    /// Re-run the current listing, e.g. after a question was added or deleted.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError` as the underlying listing call does.
    pub async fn refresh(&mut self) -> Result<&[Question], BrowseError> {
        match self.listing.clone() {
            Listing::All => {
                let page = self.page.value();
                self.load_page(page).await
            }
            Listing::Category(id) => self.show_category(id).await,
            Listing::Search(term) => self.search(&term).await,
        }
    }

    fn replace(&mut self, listing: Listing, page: Page, result: QuestionPage) {
        debug!(
            ?listing,
            %page,
            shown = result.questions.len(),
            total = result.total_questions,
            "question listing replaced"
        );
        self.listing = listing;
        self.page = page;
        self.total = result.total_questions;
        self.loaded = true;
        self.shown = result.questions;
        self.current_category = result.current_category;
        // Search responses carry no category map; keep the last known one.
        if !result.categories.is_empty() {
            self.categories = result.categories;
        }
    }
}
