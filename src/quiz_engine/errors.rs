use thiserror::Error;

/// Failures while loading game data or a locale string table.
///
/// The core never retries beyond the one default-locale fallback in
/// [`load_locale`](crate::quiz_engine::locale::load_locale); a `LoadError`
/// escaping that path is fatal to initialization and is surfaced to the
/// presentation layer as-is.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The external source could not produce the payload for a locale.
    #[error("failed to fetch {locale:?}: {reason}")]
    Fetch { locale: String, reason: String },

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of session operations. Grading itself never fails; these cover
/// calling an operation in the wrong state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No question is currently displayed (empty queue, or `next_question`
    /// was never called).
    #[error("no question is currently active")]
    NoActiveQuestion,

    /// The current batch slot was already graded; further submissions are
    /// disabled until `advance` is called.
    #[error("the current question was already answered")]
    AlreadyAnswered,

    /// No civilization yields a single record under the current toggles.
    #[error("no questions available under the current settings")]
    NoQuestions,
}
