//! The `trivia delete` command.

use anyhow::{Context, Result};
use quiz_core::model::QuestionId;
use services::AppServices;

pub async fn execute(services: &AppServices, id: QuestionId) -> Result<()> {
    services
        .catalog()
        .delete_question(id)
        .await
        .with_context(|| format!("could not delete question {id}"))?;
    println!("Deleted question {id}");
    Ok(())
}
