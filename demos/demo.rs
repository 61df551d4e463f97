//! End-to-end demo of the quiz engine.
//!
//! Run with: `cargo run --example demo`
//!
//! This example shows how `civ_quiz_gen` works end to end:
//!
//! 1. **Parsing** — each civilization's localized helptext is broken into
//!    structured sections (bonuses, unique unit, unique techs, team bonus).
//!
//! 2. **Batch session** — a seeded, shuffled 5-question queue is played to
//!    exhaustion with simulated answers, showing grading, the running score,
//!    and the cycle restart.
//!
//! 3. **Streaming session** — the no-repeat random picker cycles through all
//!    civilizations before any repeats.
//!
//! ## Key concepts demonstrated
//!
//! - `Some(seed)` makes the shuffles and picks fully deterministic.
//! - Grading is case- and whitespace-insensitive (`"  fRaNkS "` is correct).
//! - `CategoryToggles` filter which sections become questions.
//! - String-table misses degrade to the raw id instead of failing.

use civ_quiz_gen::{
    build_civ_pools, civ_name_suggestions, Advance, BatchSession, CategoryToggles, GameData,
    LocaleTable, SessionMode, StreamingSession,
};

const DATA_JSON: &str = r#"{
    "civ_names": {
        "aztecs": "10287",
        "franks": "10271",
        "goths":  "10277"
    },
    "civ_helptexts": {
        "aztecs": "120162",
        "franks": "120150",
        "goths":  "120156"
    }
}"#;

const STRINGS_JSON: &str = r#"{
    "10287": "Aztecs",
    "10271": "Franks",
    "10277": "Goths",
    "120162": "Infantry and Monk civilization\nBonuses:</b>•Villagers carry +3•Military units created 11% faster•Start with +50 gold\nUnique Unit:</b>Jaguar Warrior, Eagle Warrior\nUnique Techs:</b>•Garland Wars\nTeam Bonus:</b>Relics generate +33% gold",
    "120150": "Cavalry civilization\nBonuses:</b>•Castles cost -25%•Knights +20% hit points\nUnique Unit:</b>Throwing Axeman\nUnique Techs:</b>•Bearded Axe\nTeam Bonus:</b>Knights +2 line of sight",
    "120156": "Infantry civilization\nBonuses:</b>•Infantry cost -35%•Hunters carry +15\nUnique Unit:</b>Huskarl\nUnique Techs:</b>•Anarchy•Perfusion\nTeam Bonus:</b>Barracks work +20% faster"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let data = GameData::from_json(DATA_JSON)?;
    let strings = LocaleTable::from_json(STRINGS_JSON)?;
    let pools = build_civ_pools(&data, &strings, &CategoryToggles::default());

    // ── Parsed pools ───────────────────────────────────────────────────────
    println!();
    println!("══ Question pools (insertion order, all categories on) ══");
    println!();
    for pool in &pools {
        let name = pool.records.first().map(|q| q.civilization.as_str()).unwrap_or(&pool.key);
        println!("  {} — {} question(s)", name, pool.records.len());
        for record in &pool.records {
            println!("    [{}] {}", record.label, record.text);
        }
        println!();
    }

    // ── Batch session ──────────────────────────────────────────────────────
    println!("══ Batch session: 5 questions, seed 42 ══");
    println!();
    let mut batch = BatchSession::new(
        pools.iter().flat_map(|p| p.records.clone()).collect(),
        5,
        Some(42),
    );
    // Answer every other question correctly (with sloppy casing) to show
    // grading and the running score.
    let mut slot = 0usize;
    let mut running_total = 0u32;
    loop {
        let question = match batch.current_question() {
            Some(q) => q.clone(),
            None => break,
        };
        let guess = if slot % 2 == 0 {
            format!("  {} ", question.civilization.to_uppercase())
        } else {
            "Byzantines".to_string()
        };
        let outcome = batch.submit_answer(&guess)?;
        let marker = if outcome.correct { "✓" } else { "✗" };
        println!("  {marker} {}: {}", question.label, question.text);
        println!("      guessed {:?}, answer was {}", guess.trim(), outcome.correct_answer);
        slot += 1;
        match batch.advance() {
            Advance::Next => {}
            Advance::CycleComplete { session_score } => {
                running_total += session_score;
                println!();
                println!("  Cycle complete: {session_score}/{slot} — running total {running_total}");
                break;
            }
        }
    }

    // ── Streaming session ──────────────────────────────────────────────────
    println!();
    println!("══ Streaming session: no repeats until every civ is used ══");
    println!();
    let mut streaming = StreamingSession::new(pools.clone(), Some(7));
    for round in 1..=4 {
        let question = streaming.next_question()?;
        streaming.submit_answer(&question.civilization)?;
        println!(
            "  round {round}: [{}] {} → {}",
            question.label, question.text, question.civilization
        );
    }
    println!();
    println!(
        "  score {}/{} (round 4 reuses a civ: the asked set cleared)",
        streaming.score(),
        streaming.total_asked()
    );

    // ── Autocomplete + toggles ─────────────────────────────────────────────
    println!();
    println!("══ Extras ══");
    println!();
    println!("  Suggestions: {}", civ_name_suggestions(&data, &strings).join(", "));
    let techs_only = CategoryToggles { bonuses: false, units: false, techs: true, team: false };
    let tech_pool = build_civ_pools(&data, &strings, &techs_only);
    let tech_count: usize = tech_pool.iter().map(|p| p.records.len()).sum();
    println!("  Techs-only pool: {tech_count} question(s)");
    println!("  Session modes available: {:?} and {:?}", SessionMode::Batch { question_count: 5 }, SessionMode::Streaming);
    println!();

    Ok(())
}
