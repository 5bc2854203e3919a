//! The `trivia add` command.

use anyhow::Result;
use quiz_core::model::CategoryId;
use services::AppServices;

pub async fn execute(
    services: &AppServices,
    question: &str,
    answer: &str,
    difficulty: i64,
    category: CategoryId,
) -> Result<()> {
    let id = services
        .catalog()
        .create_question(question, answer, difficulty, category)
        .await?;
    println!("Created question {id}");
    Ok(())
}
