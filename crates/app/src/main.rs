//! trivia: terminal client for the trivia quiz API.

use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quiz_core::model::{CategoryId, QuestionId};
use services::{AppServices, Clock};
use storage::Storage;
use storage::http::HttpProviderConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod demo;
mod presenter;

#[derive(Parser)]
#[command(name = "trivia", version, about = "Play and manage trivia questions")]
struct Cli {
    /// Base URL of the trivia API (overrides TRIVIA_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use the built-in question set instead of the API
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz of up to five questions
    Play {
        /// Restrict the quiz to one category (default: ask)
        #[arg(long)]
        category: Option<CategoryId>,
    },

    /// List questions, ten per page
    List {
        /// Page of the full list
        #[arg(long, default_value = "1", conflicts_with_all = ["category", "search"])]
        page: u32,

        /// Only questions of this category
        #[arg(long, conflicts_with = "search")]
        category: Option<CategoryId>,

        /// Only questions whose text contains this term
        #[arg(long)]
        search: Option<String>,
    },

    /// List categories
    Categories,

    /// Add a question
    Add {
        #[arg(long)]
        question: String,

        #[arg(long)]
        answer: String,

        /// Difficulty from 1 to 5
        #[arg(long, allow_negative_numbers = true)]
        difficulty: i64,

        #[arg(long)]
        category: CategoryId,
    },

    /// Delete a question
    Delete {
        /// Id of the question to delete
        id: QuestionId,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let storage = if cli.demo {
        Storage::in_memory(demo::provider()?)
    } else {
        let mut config = HttpProviderConfig::from_env();
        if let Some(url) = cli.api_url {
            config = config.with_base_url(url);
        }
        tracing::debug!(base_url = %config.base_url, "using trivia API");
        Storage::http(config)?
    };
    let services = AppServices::new(&storage, Clock::default());

    match cli.command {
        Commands::Play { category } => commands::play::execute(&services, category).await,
        Commands::List {
            page,
            category,
            search,
        } => commands::list::execute(&services, page, category, search).await,
        Commands::Categories => commands::categories::execute(&services).await,
        Commands::Add {
            question,
            answer,
            difficulty,
            category,
        } => commands::add::execute(&services, &question, &answer, difficulty, category).await,
        Commands::Delete { id } => commands::delete::execute(&services, id).await,
    }
}
