//! Answer normalization and grading.
//!
//! Pure and total: grading always returns a boolean. Case folding is plain
//! `str::to_lowercase`, which is fine for the shipped locales; locales with
//! special casing rules (Turkish dotless i) are a known limitation.

/// Canonical form of a free-text answer: lowercased, trimmed, internal
/// whitespace runs collapsed to single spaces. Idempotent.
pub fn normalize_answer(answer: &str) -> String {
    answer
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a submitted answer names the expected civilization.
pub fn grade(user_answer: &str, expected_civilization: &str) -> bool {
    normalize_answer(user_answer) == normalize_answer(expected_civilization)
}
