//! Built-in question set used by `--demo`.

use quiz_core::model::{Category, CategoryId, Difficulty, Question, QuestionId};
use storage::{InMemoryProvider, ProviderError};

const CATEGORIES: &[(u64, &str)] = &[
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

// (prompt, answer, difficulty, category)
const QUESTIONS: &[(&str, &str, i64, u64)] = &[
    ("What is the heaviest organ in the human body?", "The Liver", 4, 1),
    ("Who discovered penicillin?", "Alexander Fleming", 3, 1),
    (
        "Hematology is a branch of medicine involving the study of what?",
        "Blood",
        4,
        1,
    ),
    ("La Giaconda is better known as what?", "Mona Lisa", 3, 2),
    (
        "How many paintings did Van Gogh sell in his lifetime?",
        "One",
        4,
        2,
    ),
    (
        "Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?",
        "Jackson Pollock",
        2,
        2,
    ),
    (
        "Which Dutch graphic artist, initials M C, was a creator of optical illusions?",
        "Escher",
        1,
        2,
    ),
    ("What is the largest lake in Africa?", "Lake Victoria", 2, 3),
    (
        "In which royal palace would you find the Hall of Mirrors?",
        "The Palace of Versailles",
        3,
        3,
    ),
    ("The Taj Mahal is located in which Indian city?", "Agra", 2, 3),
    (
        "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?",
        "Maya Angelou",
        2,
        4,
    ),
    (
        "What boxer's original name is Cassius Clay?",
        "Muhammad Ali",
        1,
        4,
    ),
    ("Who invented Peanut Butter?", "George Washington Carver", 2, 4),
    (
        "Which dung beetle was worshipped by the ancient Egyptians?",
        "Scarab",
        4,
        4,
    ),
    (
        "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?",
        "Apollo 13",
        4,
        5,
    ),
    (
        "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?",
        "Tom Cruise",
        4,
        5,
    ),
    (
        "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?",
        "Edward Scissorhands",
        3,
        5,
    ),
    (
        "Which is the only team to play in every soccer World Cup tournament?",
        "Brazil",
        3,
        6,
    ),
    (
        "Which country won the first ever soccer World Cup in 1930?",
        "Uruguay",
        4,
        6,
    ),
];

/// An in-memory provider seeded with the demo categories and questions.
///
/// # Errors
///
/// Returns `ProviderError::Malformed` if the seed data is invalid.
pub fn provider() -> Result<InMemoryProvider, ProviderError> {
    let provider = InMemoryProvider::new();
    for &(id, name) in CATEGORIES {
        let category = Category::new(CategoryId::new(id), name)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        provider.insert_category(category)?;
    }
    for (index, &(prompt, answer, difficulty, category)) in QUESTIONS.iter().enumerate() {
        let difficulty =
            Difficulty::new(difficulty).map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let question = Question::new(
            QuestionId::new(index as u64 + 1),
            prompt,
            answer,
            difficulty,
            CategoryId::new(category),
        )
        .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        provider.insert_question(question)?;
    }
    Ok(provider)
}
