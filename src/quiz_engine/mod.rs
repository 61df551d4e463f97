//! Core quiz engine — helptext parsing, question generation, sessions, and
//! grading.
//!
//! ## Module overview
//!
//! | Module     | Purpose |
//! |------------|---------|
//! | `models`   | All shared types: parsed helptext, question records, toggles, game data |
//! | `helptext` | Single-pass scanner extracting structured sections from localized helptext |
//! | `builder`  | Turns parsed sections + toggles into question records, per civ or flat |
//! | `session`  | Batch (shuffled queue) and streaming (no-repeat random) sessions |
//! | `grader`   | Answer normalization and case/whitespace-insensitive grading |
//! | `locale`   | String table, load/fallback policy, request tokens, autocomplete |
//! | `errors`   | `LoadError` and `SessionError` |

pub mod builder;
pub mod errors;
pub mod grader;
pub mod helptext;
pub mod locale;
pub mod models;
pub mod session;

// Re-export the public API surface so callers can use
// `quiz_engine::build_question_pool` without reaching into sub-modules.
pub use builder::{build_civ_pools, build_civ_questions, build_question_pool, placeholder_question};
pub use errors::{LoadError, SessionError};
pub use grader::{grade, normalize_answer};
pub use helptext::parse_helptext;
pub use locale::{
    best_match, civ_name_suggestions, load_locale, LocaleSource, LocaleTable, RequestToken,
    RequestTracker,
};
pub use models::{
    CategoryToggles, CivQuestions, GameData, ParsedHelptext, QuestionRecord, QuizSettings,
    SubmitOutcome,
};
pub use session::{Advance, BatchSession, QuizSession, SessionMode, StreamingSession};
