use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::quiz_engine::errors::LoadError;

// ---------------------------------------------------------------------------
// Parsed helptext
// ---------------------------------------------------------------------------

/// Structured view of one civilization's localized helptext.
///
/// Produced by [`parse_helptext`](crate::quiz_engine::helptext::parse_helptext)
/// once per civilization per locale. Labels hold whatever the scan extracted —
/// possibly empty (real game text has no bonus header line, for instance); the
/// builder substitutes the hardcoded fallbacks for empty labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedHelptext {
    /// First non-empty line of the text, markup stripped.
    pub civ_type: String,
    /// Bullet-separated bonus descriptions, in source-text order.
    pub bonuses: Vec<String>,
    pub unique_units: Vec<String>,
    pub unique_techs: Vec<String>,
    /// Unlabeled trailing line; empty when absent.
    pub team_bonus: String,
    pub bonuses_label: String,
    pub unique_units_label: String,
    pub unique_techs_label: String,
    pub team_bonus_label: String,
}

// ---------------------------------------------------------------------------
// Question records
// ---------------------------------------------------------------------------

/// One quizzable fact: a labeled snippet of helptext whose answer is the
/// civilization it belongs to. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub label: String,
    pub text: String,
    pub civilization: String,
}

/// All question records for one civilization, keyed for the streaming
/// session's no-repeat bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivQuestions {
    pub key: String,
    pub records: Vec<QuestionRecord>,
}

/// Result of grading one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub correct_answer: String,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Per-category question toggles.
///
/// The settings collaborator guarantees at least one toggle stays enabled;
/// the builder itself accepts any combination and may legally produce an
/// empty pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryToggles {
    pub bonuses: bool,
    pub units: bool,
    pub techs: bool,
    pub team: bool,
}

impl Default for CategoryToggles {
    fn default() -> Self {
        CategoryToggles { bonuses: true, units: true, techs: true, team: true }
    }
}

impl CategoryToggles {
    pub fn any_enabled(&self) -> bool {
        self.bonuses || self.units || self.techs || self.team
    }
}

/// User-facing quiz configuration. Presentation-only settings (theme,
/// animation modes) are out of scope and live with the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    pub toggles: CategoryToggles,
    /// Batch-session queue cap.
    pub question_count: usize,
    pub locale: String,
}

impl Default for QuizSettings {
    fn default() -> Self {
        QuizSettings {
            toggles: CategoryToggles::default(),
            question_count: 10,
            locale: "en".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Game data source
// ---------------------------------------------------------------------------

/// The civilization metadata shipped with the game: two mappings over the
/// same key set, from civilization key to name / helptext string-table ids.
///
/// Insertion order of `civ_names` is the authoritative iteration order for
/// question generation (serde_json's `preserve_order` keeps it intact).
#[derive(Debug, Clone, Deserialize)]
pub struct GameData {
    pub civ_names: Map<String, Value>,
    pub civ_helptexts: Map<String, Value>,
}

impl GameData {
    /// Parse the `data.json` payload.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let data = serde_json::from_str(text)?;
        Ok(data)
    }

    /// Civilization keys in source insertion order.
    pub fn civ_keys(&self) -> impl Iterator<Item = &str> {
        self.civ_names.keys().map(String::as_str)
    }

    pub fn name_id(&self, civ_key: &str) -> Option<&str> {
        self.civ_names.get(civ_key).and_then(Value::as_str)
    }

    pub fn helptext_id(&self, civ_key: &str) -> Option<&str> {
        self.civ_helptexts.get(civ_key).and_then(Value::as_str)
    }
}
