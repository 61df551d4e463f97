//! Question model builder — turns parsed helptext into quizzable records.
//!
//! One record per bonus, unit, and tech, plus at most one team-bonus record,
//! filtered by the category toggles. Records keep the section order
//! bonus → unit → tech → team within a civilization; across civilizations
//! the game data's insertion order is authoritative.

use log::debug;

use crate::quiz_engine::{
    helptext::parse_helptext,
    locale::LocaleTable,
    models::{CategoryToggles, CivQuestions, GameData, ParsedHelptext, QuestionRecord},
};

pub const BONUS_LABEL_FALLBACK: &str = "Civ Bonus";
pub const UNIT_LABEL_FALLBACK: &str = "Unique Unit";
pub const TECH_LABEL_FALLBACK: &str = "Unique Tech";
pub const TEAM_LABEL_FALLBACK: &str = "Team Bonus";

/// Shown by the streaming presentation when the pool is empty.
pub const PLACEHOLDER_QUESTION_TEXT: &str = "Guess the civilization";

fn label_or<'a>(extracted: &'a str, fallback: &'a str) -> &'a str {
    if extracted.is_empty() {
        fallback
    } else {
        extracted
    }
}

/// Build the question records for a single civilization.
///
/// May legally return an empty list (all toggles off, or nothing parsed);
/// callers handle that case.
pub fn build_civ_questions(
    parsed: &ParsedHelptext,
    localized_name: &str,
    toggles: &CategoryToggles,
) -> Vec<QuestionRecord> {
    let mut questions = Vec::new();
    let record = |label: &str, text: &str| QuestionRecord {
        label: label.to_string(),
        text: text.to_string(),
        civilization: localized_name.to_string(),
    };

    if toggles.bonuses {
        let label = label_or(&parsed.bonuses_label, BONUS_LABEL_FALLBACK);
        for bonus in &parsed.bonuses {
            questions.push(record(label, bonus));
        }
    }
    if toggles.units {
        let label = label_or(&parsed.unique_units_label, UNIT_LABEL_FALLBACK);
        for unit in &parsed.unique_units {
            questions.push(record(label, unit));
        }
    }
    if toggles.techs {
        let label = label_or(&parsed.unique_techs_label, TECH_LABEL_FALLBACK);
        for tech in &parsed.unique_techs {
            questions.push(record(label, tech));
        }
    }
    if toggles.team && !parsed.team_bonus.is_empty() {
        let label = label_or(&parsed.team_bonus_label, TEAM_LABEL_FALLBACK);
        questions.push(record(label, &parsed.team_bonus));
    }

    questions
}

/// Per-civilization question pools, in game-data insertion order.
///
/// Localizes each civilization's name and helptext, parses the helptext,
/// and delegates to [`build_civ_questions`]. Civilizations whose helptext
/// yields nothing under the current toggles still appear, with an empty
/// record list.
pub fn build_civ_pools(
    data: &GameData,
    strings: &LocaleTable,
    toggles: &CategoryToggles,
) -> Vec<CivQuestions> {
    let mut pools = Vec::new();
    for key in data.civ_keys() {
        let name = strings.localized(data.name_id(key).unwrap_or(key));
        let helptext = data
            .helptext_id(key)
            .map(|id| strings.localized(id))
            .unwrap_or_default();
        let parsed = parse_helptext(helptext);
        let records = build_civ_questions(&parsed, name, toggles);
        debug!("{key}: {} question(s) from parsed helptext", records.len());
        pools.push(CivQuestions { key: key.to_string(), records });
    }
    pools
}

/// Flat question pool across all civilizations, in game-data insertion order
/// with section order preserved within each civilization.
pub fn build_question_pool(
    data: &GameData,
    strings: &LocaleTable,
    toggles: &CategoryToggles,
) -> Vec<QuestionRecord> {
    build_civ_pools(data, strings, toggles)
        .into_iter()
        .flat_map(|pool| pool.records)
        .collect()
}

/// Stand-in record for presentations that must always display something.
pub fn placeholder_question() -> QuestionRecord {
    QuestionRecord {
        label: String::new(),
        text: PLACEHOLDER_QUESTION_TEXT.to_string(),
        civilization: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed_fixture() -> ParsedHelptext {
        ParsedHelptext {
            civ_type: "Infantry civilization".to_string(),
            bonuses: vec!["Bonus A".to_string(), "Bonus B".to_string()],
            unique_units: vec!["Huskarl".to_string()],
            unique_techs: vec!["Anarchy".to_string()],
            team_bonus: "Barracks work faster".to_string(),
            bonuses_label: String::new(),
            unique_units_label: "Einzigartige Einheit".to_string(),
            unique_techs_label: String::new(),
            team_bonus_label: String::new(),
        }
    }

    #[test]
    fn records_follow_section_order_and_share_civilization() {
        let questions =
            build_civ_questions(&parsed_fixture(), "Goths", &CategoryToggles::default());
        let texts: Vec<&str> = questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["Bonus A", "Bonus B", "Huskarl", "Anarchy", "Barracks work faster"]);
        assert!(questions.iter().all(|q| q.civilization == "Goths"));
    }

    #[test]
    fn extracted_labels_win_over_fallbacks() {
        let questions =
            build_civ_questions(&parsed_fixture(), "Goths", &CategoryToggles::default());
        assert_eq!(questions[0].label, BONUS_LABEL_FALLBACK);
        assert_eq!(questions[2].label, "Einzigartige Einheit");
        assert_eq!(questions[3].label, TECH_LABEL_FALLBACK);
        assert_eq!(questions[4].label, TEAM_LABEL_FALLBACK);
    }

    #[test]
    fn disabled_categories_produce_no_records() {
        let toggles = CategoryToggles { bonuses: true, units: false, techs: true, team: false };
        let questions = build_civ_questions(&parsed_fixture(), "Goths", &toggles);
        assert!(questions.iter().all(|q| q.label != UNIT_LABEL_FALLBACK));
        assert!(questions.iter().all(|q| q.text != "Huskarl"));
        assert!(questions.iter().all(|q| q.text != "Barracks work faster"));
        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn empty_team_bonus_yields_no_team_record() {
        let mut parsed = parsed_fixture();
        parsed.team_bonus.clear();
        let questions = build_civ_questions(&parsed, "Goths", &CategoryToggles::default());
        assert_eq!(questions.len(), 4);
    }

    #[test]
    fn all_toggles_off_is_a_legal_empty_pool() {
        let toggles = CategoryToggles { bonuses: false, units: false, techs: false, team: false };
        assert!(!toggles.any_enabled());
        let questions = build_civ_questions(&parsed_fixture(), "Goths", &toggles);
        assert!(questions.is_empty());
    }
}
