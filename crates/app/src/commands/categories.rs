//! The `trivia categories` command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use quiz_core::model::Category;
use services::AppServices;

pub async fn execute(services: &AppServices) -> Result<()> {
    let categories = services.catalog().list_categories().await?;
    if categories.is_empty() {
        println!("No categories.");
        return Ok(());
    }
    println!("{}", render(&categories));
    Ok(())
}

fn render(categories: &[Category]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Category"]);
    for category in categories {
        table.add_row(vec![
            Cell::new(category.id()),
            Cell::new(category.name()),
        ]);
    }
    table
}
