//! Helptext parser — extracts structured sections from one localized,
//! HTML-tagged civilization description.
//!
//! The source text is authored as a civilization-type line followed by a
//! fixed sequence of bold-labeled sections, each opened by a `label:</b>`
//! marker (ASCII or fullwidth colon) and holding bullet- or comma-separated
//! items:
//!
//! ```text
//! Infantry civilization
//! <b>Civilization bonuses:</b>
//! • Bonus A
//! • Bonus B
//! <b>Unique unit:</b>
//! Huskarl, Champion
//! <b>Unique techs:</b>
//! • Anarchy
//! <b>Team bonus:</b>
//! Barracks work 20% faster
//! ```
//!
//! The parse is a single left-to-right scan with an explicit section state;
//! each boundary marker advances exactly one step along
//! `civ → bonus → unit → tech → team`, finalizing the section it closes and
//! capturing the label of the one it opens. No section is ever revisited.
//! Malformed or truncated input degrades to a partial result — parsing never
//! fails.

use crate::quiz_engine::models::ParsedHelptext;

const ASCII_MARKER: &str = ":</b>";
const FULLWIDTH_MARKER: &str = "\u{FF1A}</b>";

/// Which labeled section is currently accumulating content. `Civ` covers the
/// preamble before any boundary marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Civ,
    Bonus,
    Unit,
    Tech,
    Team,
}

/// Parse one localized helptext string into its structured sections.
///
/// Total: empty or malformed input yields a best-effort (possibly all-empty)
/// [`ParsedHelptext`], never an error.
pub fn parse_helptext(helptext: &str) -> ParsedHelptext {
    if helptext.is_empty() {
        return ParsedHelptext::default();
    }

    // "Foo: </b>" and "Foo:</b>" must behave identically; some locales put
    // whitespace between the colon and the closing tag.
    let text = normalize_marker_whitespace(helptext);
    let text = text.as_str();

    let mut out = ParsedHelptext::default();
    let mut section = Section::Civ;
    let mut line_start = 0usize;
    let mut block_start = 0usize;

    for (i, c) in text.char_indices() {
        if let Some(marker_len) = marker_len_at(text, i) {
            // The marker closes the open section and opens the next one.
            // Content closed is everything from the previous marker up to
            // the current line; the current line up to the marker is the
            // *next* section's localized label.
            match section {
                Section::Civ => {
                    out.bonuses_label = clean_label(&text[line_start..i]);
                    section = Section::Bonus;
                }
                Section::Bonus => {
                    let block = clean_block(&text[block_start..line_start], true);
                    out.bonuses.extend(split_bulleted(&block));
                    out.unique_units_label = clean_label(&text[line_start..i]);
                    section = Section::Unit;
                }
                Section::Unit => {
                    let block = clean_block(&text[block_start..line_start], false);
                    out.unique_units.extend(split_comma_separated(&block));
                    out.unique_techs_label = clean_label(&text[line_start..i]);
                    section = Section::Tech;
                }
                Section::Tech => {
                    let block = clean_block(&text[block_start..line_start], true);
                    out.unique_techs.extend(split_bulleted(&block));
                    out.team_bonus_label = clean_label(&text[line_start..i]);
                    section = Section::Team;
                }
                Section::Team => {}
            }
            block_start = i + marker_len;
        }

        if c == '\n' {
            let line = &text[line_start..i];
            line_start = i + 1;
            let logical = line.replacen("<br>", "", 1);
            let logical = logical.trim();
            // Blank lines have no effect; the first non-blank line is the
            // civilization type.
            if !logical.is_empty() && out.civ_type.is_empty() {
                out.civ_type = logical.to_string();
                block_start = i;
            }
        }
    }

    // End-of-text capture for the unlabeled trailing team bonus. When the
    // team section was properly opened its content runs from the marker;
    // otherwise fall back to the last logical line, whatever section is
    // still open.
    let tail = match section {
        Section::Team => &text[block_start..],
        _ => &text[line_start..],
    };
    out.team_bonus = tail.replace('\u{2022}', "").trim().to_string();

    out
}

/// Length in bytes of a section boundary marker starting at `i`, if any.
/// ASCII `:</b>` and fullwidth `：</b>` are treated identically.
fn marker_len_at(text: &str, i: usize) -> Option<usize> {
    let rest = &text[i..];
    if rest.starts_with(ASCII_MARKER) {
        Some(ASCII_MARKER.len())
    } else if rest.starts_with(FULLWIDTH_MARKER) {
        Some(FULLWIDTH_MARKER.len())
    } else {
        None
    }
}

/// Collapse whitespace sitting between a colon (ASCII or fullwidth) and
/// `</b>` so the marker scan sees a contiguous `:</b>`.
fn normalize_marker_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        out.push(c);
        rest = &rest[c.len_utf8()..];
        if c == ':' || c == '\u{FF1A}' {
            let skipped = rest.trim_start();
            if skipped.len() < rest.len() && skipped.starts_with("</b>") {
                rest = skipped;
            }
        }
    }
    out
}

/// Strip markup from a section's raw content before splitting it into items.
fn clean_block(raw: &str, strip_newlines: bool) -> String {
    let mut block = raw.trim().replace("<br>", "").replace("</b>", "");
    if strip_newlines {
        block = block.replace('\n', "");
    }
    block.trim().to_string()
}

/// A section label as captured from the text between the line start and the
/// boundary marker.
fn clean_label(raw: &str) -> String {
    raw.replace("<b>", "").trim().to_string()
}

/// Bullet-separated lists (bonuses, unique techs): zero-length fragments are
/// dropped *before* trimming, so a whitespace-only fragment survives as an
/// empty item.
fn split_bulleted(block: &str) -> Vec<String> {
    block
        .split('\u{2022}')
        .filter(|frag| !frag.is_empty())
        .map(|frag| frag.trim().to_string())
        .collect()
}

/// Comma-separated lists (unique units): no empty-fragment filtering. An
/// empty block still yields one empty item — kept as-is; real game text may
/// depend on the asymmetry with [`split_bulleted`].
fn split_comma_separated(block: &str) -> Vec<String> {
    block
        .split(", ")
        .map(|frag| frag.replace('\u{2022}', "").trim().to_string())
        .collect()
}
