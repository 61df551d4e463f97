//! # civ_quiz_gen
//!
//! A fully offline quiz engine for "guess the civilization" trivia built
//! from strategy-game metadata: it parses each civilization's localized,
//! HTML-tagged helptext into structured sections, derives question records
//! from them, runs a quiz session, and grades free-text guesses.
//!
//! ## How it works
//!
//! 1. Load [`GameData`] (civilization key → name/helptext string ids) and a
//!    [`LocaleTable`] (string id → localized text) from their JSON payloads.
//! 2. Call [`build_question_pool`] (or [`build_civ_pools`] for the streaming
//!    variant) — every helptext is run through the single-pass
//!    [`parse_helptext`] scanner and expanded into `{label, text,
//!    civilization}` records, filtered by [`CategoryToggles`].
//! 3. Create a [`QuizSession`] in batch mode (finite shuffled queue) or
//!    streaming mode (no-repeat random picker) and feed it user answers;
//!    [`grade`] is case- and whitespace-insensitive.
//!
//! ## Key properties
//!
//! - **Never panics on bad text**: the helptext parser is total; malformed
//!   or missing sections degrade to empty lists and hardcoded labels.
//! - **Deterministic**: pass a `u64` seed to reproduce the exact same
//!   shuffle and picks — useful for tests.
//! - **Locale-degradation built in**: string-table misses display the raw
//!   id, failed locales fall back to the default locale exactly once.
//!
//! ## Quick start
//!
//! ```rust
//! use civ_quiz_gen::{
//!     build_civ_pools, CategoryToggles, GameData, LocaleTable, QuizSession, SessionMode,
//! };
//!
//! let data = GameData::from_json(
//!     r#"{"civ_names": {"franks": "10271"}, "civ_helptexts": {"franks": "120150"}}"#,
//! )?;
//! let strings = LocaleTable::from_json(
//!     r#"{"10271": "Franks",
//!         "120150": "Cavalry civilization\nBonuses:</b>•Castles cost -25%\nUnique Unit:</b>Throwing Axeman\nUnique Tech:</b>•Bearded Axe\nTeam Bonus:</b>Knights +2 line of sight"}"#,
//! )?;
//!
//! let pools = build_civ_pools(&data, &strings, &CategoryToggles::default());
//! let mut session = QuizSession::new(SessionMode::Batch { question_count: 10 }, pools, Some(42));
//!
//! if let Some(question) = session.current_question() {
//!     println!("{}: {}", question.label, question.text);
//! }
//! let outcome = session.submit_answer("  fRaNkS ")?;
//! assert!(outcome.correct);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod quiz_engine;

// Convenience re-exports so callers can use `civ_quiz_gen::build_question_pool`
// directly without reaching into `quiz_engine::`.
pub use quiz_engine::{
    best_match, build_civ_pools, build_civ_questions, build_question_pool, civ_name_suggestions,
    grade, load_locale, normalize_answer, parse_helptext, placeholder_question, Advance,
    BatchSession, CategoryToggles, CivQuestions, GameData, LoadError, LocaleSource, LocaleTable,
    ParsedHelptext, QuestionRecord, QuizSession, QuizSettings, RequestToken, RequestTracker,
    SessionError, SessionMode, StreamingSession, SubmitOutcome,
};
