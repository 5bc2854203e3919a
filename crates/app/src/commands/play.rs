//! The `trivia play` command.

use std::io::Write;

use anyhow::Result;
use quiz_core::model::{Category, CategoryId, SessionScope};
use services::{AppServices, DrawOutcome, SessionController, SessionError, SessionPhase};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::presenter::ScorePresenter;

const END_COMMAND: &str = ":end";

pub async fn execute(services: &AppServices, category: Option<CategoryId>) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    run(services, category, input, &mut out).await
}

/// Interactive quiz loop over any line-based input.
pub async fn run<R, W>(
    services: &AppServices,
    category: Option<CategoryId>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let categories: Vec<Category> = services.catalog().list_categories().await?;
    let presenter = ScorePresenter::new(&categories);
    let mut lines = input.lines();
    let mut controller = services.session_controller();
    let mut preset = category.map(SessionScope::Category);

    loop {
        let scope = match preset.take() {
            Some(scope) => scope,
            None => match choose_scope(&presenter, &categories, &mut lines, out).await? {
                Some(scope) => scope,
                None => return Ok(()),
            },
        };

        let first = controller.select_category(scope).await;
        settle_draw(&mut controller, first, &mut lines, out).await?;
        play_session(&mut controller, &presenter, &mut lines, out).await?;

        if !confirm(&mut lines, out, "Play again? [y/N] ").await? {
            return Ok(());
        }
        controller.restart();
    }
}

async fn play_session<R, W>(
    controller: &mut SessionController,
    presenter: &ScorePresenter<'_>,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        let snapshot = controller.snapshot();
        match snapshot.phase {
            SessionPhase::Presenting => {
                presenter.question(&snapshot, out)?;
                let guess = match prompt(lines, out, "Your answer: ").await? {
                    Some(line) if line.trim() != END_COMMAND => line,
                    _ => {
                        controller.force_end()?;
                        continue;
                    }
                };
                let outcome = controller.submit_guess(&guess)?;
                presenter.verdict(&outcome, out)?;
            }
            SessionPhase::Revealed => {
                match prompt(lines, out, "Press Enter for the next question: ").await? {
                    Some(line) if line.trim() != END_COMMAND => {
                        let drawn = controller.advance().await;
                        settle_draw(controller, drawn, lines, out).await?;
                    }
                    _ => controller.force_end()?,
                }
            }
            SessionPhase::AwaitingQuestion => {
                let drawn = controller.advance().await;
                settle_draw(controller, drawn, lines, out).await?;
            }
            SessionPhase::Terminal => {
                if let Some(summary) = &snapshot.summary {
                    presenter.summary(summary, out)?;
                }
                return Ok(());
            }
            SessionPhase::Unselected => return Ok(()),
        }
    }
}

/// Offer retries while the provider is unavailable. Declining ends the session.
async fn settle_draw<R, W>(
    controller: &mut SessionController,
    mut result: Result<DrawOutcome, SessionError>,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        match result {
            Ok(_) => return Ok(()),
            Err(err) if err.is_retryable() => {
                writeln!(out, "{err}")?;
                if !confirm_default_yes(lines, out, "Retry? [Y/n] ").await? {
                    controller.force_end()?;
                    return Ok(());
                }
                result = controller.advance().await;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

async fn choose_scope<R, W>(
    presenter: &ScorePresenter<'_>,
    categories: &[Category],
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<Option<SessionScope>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    presenter.category_menu(out)?;
    loop {
        let Some(line) = prompt(lines, out, "> ").await? else {
            return Ok(None);
        };
        match parse_scope(&line, categories) {
            Some(scope) => return Ok(Some(scope)),
            None => writeln!(out, "Unknown category: {}", line.trim())?,
        }
    }
}

/// Blank, `0` or `all` picks every category; otherwise a listed id.
fn parse_scope(line: &str, categories: &[Category]) -> Option<SessionScope> {
    let line = line.trim();
    if line.is_empty() || line.eq_ignore_ascii_case("all") {
        return Some(SessionScope::All);
    }
    let id: CategoryId = line.parse().ok()?;
    if id.value() == 0 {
        return Some(SessionScope::All);
    }
    categories
        .iter()
        .any(|c| c.id() == id)
        .then_some(SessionScope::Category(id))
}

async fn prompt<R, W>(lines: &mut Lines<R>, out: &mut W, label: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{label}")?;
    out.flush()?;
    let line = lines.next_line().await?;
    if line.is_none() {
        writeln!(out)?;
    }
    Ok(line)
}

async fn confirm<R, W>(lines: &mut Lines<R>, out: &mut W, label: &str) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let answer = prompt(lines, out, label).await?;
    Ok(answer.is_some_and(|a| matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes")))
}

async fn confirm_default_yes<R, W>(lines: &mut Lines<R>, out: &mut W, label: &str) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let answer = prompt(lines, out, label).await?;
    Ok(answer.is_some_and(|a| !matches!(a.trim().to_ascii_lowercase().as_str(), "n" | "no")))
}
