//! Free-text answer evaluation.
//!
//! Matching is intentionally permissive: every whitespace-separated token of
//! the canonical answer must occur somewhere in the guess as a substring.
//! Short tokens therefore match inside longer words (`"a"` matches `"cat"`),
//! and an empty canonical answer matches any guess.

/// Characters removed from a guess before comparison.
pub const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Returns `true` when `guess` contains every token of `canonical_answer`.
///
/// ```
/// use quiz_core::matcher::matches;
///
/// assert!(matches("the paris city", "Paris"));
/// assert!(!matches("pari", "Paris"));
/// ```
#[must_use]
pub fn matches(guess: &str, canonical_answer: &str) -> bool {
    let cleaned = normalize_guess(guess);
    canonical_answer
        .to_lowercase()
        .split_whitespace()
        .all(|token| cleaned.contains(token))
}

/// Strip punctuation and lower-case a guess.
#[must_use]
pub fn normalize_guess(guess: &str) -> String {
    guess
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect::<String>()
        .to_lowercase()
}
