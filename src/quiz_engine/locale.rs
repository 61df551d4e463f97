//! Locale string table, load/fallback policy, and autocomplete helpers.
//!
//! The core never fetches anything itself; an external [`LocaleSource`]
//! produces the raw `strings.json` payload and this module applies the
//! degradation policy: a lookup miss displays the raw string id, a failed
//! locale falls back to the default locale exactly once, and a failure of
//! the default locale is surfaced as a fatal load error.

use std::collections::HashMap;

use log::{debug, warn};

use crate::quiz_engine::{errors::LoadError, models::GameData};

/// Localized string table: `stringId -> localizedText`.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    strings: HashMap<String, String>,
}

impl LocaleTable {
    pub fn new(strings: HashMap<String, String>) -> Self {
        LocaleTable { strings }
    }

    /// Parse a `strings.json` payload.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let strings = serde_json::from_str(text)?;
        Ok(LocaleTable { strings })
    }

    /// Look up a string id, degrading to the id itself on a miss.
    pub fn localized<'a>(&'a self, string_id: &'a str) -> &'a str {
        match self.strings.get(string_id) {
            Some(text) => text,
            None => {
                debug!("no entry for string id {string_id:?}, displaying the id");
                string_id
            }
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// External collaborator that produces the raw locale payload (a file read,
/// an HTTP fetch — the core does not care).
pub trait LocaleSource {
    fn fetch(&self, locale: &str) -> Result<String, LoadError>;
}

/// Load a locale, retrying once with the fixed default locale on failure.
///
/// A failure of the default locale itself is fatal to initialization and is
/// returned as-is, never retried further.
pub fn load_locale<S: LocaleSource + ?Sized>(
    source: &S,
    locale: &str,
    default_locale: &str,
) -> Result<LocaleTable, LoadError> {
    match fetch_table(source, locale) {
        Ok(table) => Ok(table),
        Err(err) if locale != default_locale => {
            warn!("failed to load locale {locale:?} ({err}), falling back to {default_locale:?}");
            fetch_table(source, default_locale)
        }
        Err(err) => Err(err),
    }
}

fn fetch_table<S: LocaleSource + ?Sized>(
    source: &S,
    locale: &str,
) -> Result<LocaleTable, LoadError> {
    let payload = source.fetch(locale)?;
    LocaleTable::from_json(&payload)
}

/// Token issuer for in-flight locale reloads.
///
/// Only one logical thread of control exists, but a reload completes
/// asynchronously; a second locale change before the first resolves must win.
/// The handler checks its token against the tracker and discards stale
/// completions (last-write-wins).
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestTracker {
    pub fn begin(&mut self) -> RequestToken {
        self.current += 1;
        RequestToken(self.current)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.current
    }
}

/// Localized civilization names, sorted, for autocomplete suggestions.
pub fn civ_name_suggestions(data: &GameData, strings: &LocaleTable) -> Vec<String> {
    let mut names: Vec<String> = data
        .civ_keys()
        .map(|key| strings.localized(data.name_id(key).unwrap_or(key)).to_string())
        .collect();
    names.sort();
    names
}

/// First suggestion whose name starts with `input`, case-insensitively.
pub fn best_match<'a>(input: &str, suggestions: &'a [String]) -> Option<&'a str> {
    if input.is_empty() {
        return None;
    }
    let needle = input.to_lowercase();
    suggestions
        .iter()
        .map(String::as_str)
        .find(|name| name.to_lowercase().starts_with(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MapSource(HashMap<String, String>);

    impl LocaleSource for MapSource {
        fn fetch(&self, locale: &str) -> Result<String, LoadError> {
            self.0.get(locale).cloned().ok_or_else(|| LoadError::Fetch {
                locale: locale.to_string(),
                reason: "not found".to_string(),
            })
        }
    }

    fn source_with_en() -> MapSource {
        let mut payloads = HashMap::new();
        payloads.insert("en".to_string(), r#"{"10271": "Franks"}"#.to_string());
        MapSource(payloads)
    }

    #[test]
    fn lookup_miss_degrades_to_the_id() {
        let table = LocaleTable::from_json(r#"{"10271": "Franks"}"#).unwrap();
        assert_eq!(table.localized("10271"), "Franks");
        assert_eq!(table.localized("99999"), "99999");
    }

    #[test]
    fn failed_locale_falls_back_to_default_once() {
        let table = load_locale(&source_with_en(), "xx", "en").unwrap();
        assert_eq!(table.localized("10271"), "Franks");
    }

    #[test]
    fn failed_default_locale_is_fatal() {
        let empty = MapSource(HashMap::new());
        assert!(load_locale(&empty, "en", "en").is_err());
        assert!(load_locale(&empty, "xx", "en").is_err());
    }

    #[test]
    fn stale_request_tokens_are_not_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn best_match_is_case_insensitive_prefix() {
        let names = vec!["Britons".to_string(), "Burgundians".to_string(), "Franks".to_string()];
        assert_eq!(best_match("bri", &names), Some("Britons"));
        assert_eq!(best_match("BU", &names), Some("Burgundians"));
        assert_eq!(best_match("", &names), None);
        assert_eq!(best_match("z", &names), None);
    }
}
