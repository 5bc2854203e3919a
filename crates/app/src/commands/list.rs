//! The `trivia list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use quiz_core::model::CategoryId;
use services::{AppServices, Listing, QuestionBrowser};

pub async fn execute(
    services: &AppServices,
    page: u32,
    category: Option<CategoryId>,
    search: Option<String>,
) -> Result<()> {
    let mut browser = services.question_browser();
    match (category, search) {
        (Some(category), _) => browser.show_category(category).await?,
        (None, Some(term)) => browser.search(&term).await?,
        (None, None) => browser.load_page(page).await?,
    };
    print!("{}", render(&browser));
    Ok(())
}

fn render(browser: &QuestionBrowser) -> String {
    let heading = match browser.listing() {
        Listing::All => format!(
            "Page {} of {} ({} questions)",
            browser.page(),
            browser.page_count().max(1),
            browser.total_questions()
        ),
        Listing::Category(id) => format!(
            "{} ({} questions)",
            browser
                .category_name(*id)
                .map_or_else(|| format!("Category {id}"), str::to_owned),
            browser.total_questions()
        ),
        Listing::Search(term) => format!(
            "Search \"{term}\" ({} questions)",
            browser.total_questions()
        ),
    };

    if browser.questions().is_empty() {
        return format!("{heading}\nNo questions.\n");
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Question", "Answer", "Difficulty", "Category"]);
    for question in browser.questions() {
        let category = browser
            .category_name(question.category())
            .map_or_else(|| question.category().to_string(), str::to_owned);
        table.add_row(vec![
            Cell::new(question.id()),
            Cell::new(question.prompt()),
            Cell::new(question.answer()),
            Cell::new(question.difficulty().value()),
            Cell::new(category),
        ]);
    }
    format!("{heading}\n{table}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;
    use storage::Storage;

    fn services() -> AppServices {
        let provider = crate::demo::provider().unwrap();
        AppServices::new(&Storage::in_memory(provider), fixed_clock())
    }

    #[tokio::test]
    async fn full_list_shows_page_position() {
        let services = services();
        let mut browser = services.question_browser();
        browser.load_page(2).await.unwrap();

        let text = render(&browser);
        assert!(text.starts_with("Page 2 of 2 (19 questions)"));
        assert!(text.contains("Uruguay"));
        assert!(text.contains("Sports"));
    }

    #[tokio::test]
    async fn category_listing_uses_the_category_name() {
        let services = services();
        let mut browser = services.question_browser();
        browser.show_category(CategoryId::new(3)).await.unwrap();

        let text = render(&browser);
        assert!(text.starts_with("Geography (3 questions)"));
        assert!(text.contains("Lake Victoria"));
    }

    #[tokio::test]
    async fn empty_search_result_says_so() {
        let services = services();
        let mut browser = services.question_browser();
        browser.search("zebra").await.unwrap();

        assert_eq!(
            render(&browser),
            "Search \"zebra\" (0 questions)\nNo questions.\n"
        );
    }
}
