//! Plain-text rendering of quiz state.

use std::io::{self, Write};

use quiz_core::model::{Category, CategoryId, EndReason, SessionScope, SessionSummary};
use services::{GuessOutcome, SessionSnapshot};

/// Renders session snapshots with category names resolved.
pub struct ScorePresenter<'a> {
    categories: &'a [Category],
}

impl<'a> ScorePresenter<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self { categories }
    }

    pub fn category_menu(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Choose a category:")?;
        writeln!(out, "  0) ALL")?;
        for category in self.categories {
            writeln!(out, "  {}) {}", category.id(), category.name())?;
        }
        Ok(())
    }

    pub fn question(&self, snapshot: &SessionSnapshot, out: &mut impl Write) -> io::Result<()> {
        let Some(question) = &snapshot.question else {
            return Ok(());
        };
        writeln!(out)?;
        writeln!(
            out,
            "Question {} of {} [{} | difficulty {}]",
            snapshot.progress.served,
            snapshot.progress.total,
            self.category_label(question.category),
            question.difficulty.value(),
        )?;
        writeln!(out, "{}", question.prompt)
    }

    pub fn verdict(&self, outcome: &GuessOutcome, out: &mut impl Write) -> io::Result<()> {
        if outcome.correct {
            writeln!(out, "Correct! The answer is: {}", outcome.answer)?;
        } else {
            writeln!(out, "Incorrect. The answer was: {}", outcome.answer)?;
        }
        writeln!(out, "Score: {}", outcome.score)
    }

    pub fn summary(&self, summary: &SessionSummary, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        match summary.reason() {
            EndReason::BudgetExhausted => {}
            EndReason::Forced => writeln!(out, "Quiz ended early.")?,
            EndReason::QuestionsExhausted => {
                writeln!(out, "No more questions in {}.", self.scope_label(summary.scope()))?;
            }
        }
        writeln!(
            out,
            "Your final score is {} out of {}.",
            summary.score(),
            summary.asked()
        )?;
        writeln!(out, "Time: {}s", summary.duration().num_seconds())
    }

    fn scope_label(&self, scope: SessionScope) -> String {
        match scope {
            SessionScope::All => "any category".into(),
            SessionScope::Category(id) => self.category_label(id),
        }
    }

    fn category_label(&self, id: CategoryId) -> String {
        self.categories
            .iter()
            .find(|c| c.id() == id)
            .map_or_else(|| format!("category {id}"), |c| c.name().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Difficulty, QuestionId};
    use quiz_core::time::fixed_now;
    use services::{QuestionView, SessionPhase, SessionProgress};

    fn categories() -> Vec<Category> {
        vec![Category::new(CategoryId::new(3), "Geography").unwrap()]
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn question_shows_progress_and_category_name() {
        let categories = categories();
        let presenter = ScorePresenter::new(&categories);
        let snapshot = SessionSnapshot {
            generation: 1,
            phase: SessionPhase::Presenting,
            scope: Some(SessionScope::All),
            question: Some(QuestionView {
                id: QuestionId::new(13),
                prompt: "What is the largest lake in Africa?".into(),
                difficulty: Difficulty::new(2).unwrap(),
                category: CategoryId::new(3),
            }),
            answer: None,
            guess: String::new(),
            last_guess_correct: None,
            progress: SessionProgress {
                total: 5,
                served: 2,
                remaining: 3,
                score: 1,
                is_complete: false,
            },
            summary: None,
        };

        let text = render(|out| presenter.question(&snapshot, out));
        assert!(text.contains("Question 2 of 5 [Geography | difficulty 2]"));
        assert!(text.contains("largest lake in Africa"));
    }

    #[test]
    fn verdict_reveals_the_answer() {
        let presenter = ScorePresenter::new(&[]);
        let outcome = GuessOutcome {
            correct: false,
            answer: "Lake Victoria".into(),
            score: 0,
        };
        let text = render(|out| presenter.verdict(&outcome, out));
        assert_eq!(text, "Incorrect. The answer was: Lake Victoria\nScore: 0\n");
    }

    #[test]
    fn summary_explains_early_endings() {
        let categories = categories();
        let presenter = ScorePresenter::new(&categories);
        let summary = SessionSummary::new(
            SessionScope::Category(CategoryId::new(3)),
            fixed_now(),
            fixed_now() + chrono::Duration::seconds(42),
            2,
            1,
            EndReason::QuestionsExhausted,
        )
        .unwrap();

        let text = render(|out| presenter.summary(&summary, out));
        assert!(text.contains("No more questions in Geography."));
        assert!(text.contains("Your final score is 1 out of 2."));
        assert!(text.contains("Time: 42s"));
    }

    #[test]
    fn menu_lists_all_first() {
        let categories = categories();
        let presenter = ScorePresenter::new(&categories);
        let text = render(|out| presenter.category_menu(out));
        assert_eq!(text, "Choose a category:\n  0) ALL\n  3) Geography\n");
    }
}
