//! Static condition-code table and localized condition text lookup.
//!
//! The table is read once from the provider's condition list at startup and
//! then shared read-only between all requests.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

// ---

/// Localized day/night text for one language.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageText {
    pub lang_iso: String,
    pub day_text: String,
    pub night_text: String,
}

/// One condition code with its default texts and translations.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionCodeEntry {
    pub code: i64,
    pub day: String,
    pub night: String,
    #[serde(default)]
    pub languages: Vec<LanguageText>,
}

/// Immutable list of condition codes.
#[derive(Debug, Clone, Default)]
pub struct ConditionTable {
    entries: Vec<ConditionCodeEntry>,
}

impl ConditionTable {
    // ---
    /// Build a table, rejecting duplicate codes.
    pub fn new(entries: Vec<ConditionCodeEntry>) -> Result<Self> {
        // ---
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.code) {
                return Err(anyhow!("Duplicate condition code {}", entry.code));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a table from the provider's JSON condition list.
    pub fn from_json(raw: &str) -> Result<Self> {
        // ---
        let entries: Vec<ConditionCodeEntry> =
            serde_json::from_str(raw).context("Malformed condition dataset")?;
        Self::new(entries)
    }

    /// Load the table from a file on disk. Any failure here is fatal at startup.
    pub fn load(path: &Path) -> Result<Self> {
        // ---
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read condition dataset '{}'", path.display()))?;
        let table = Self::from_json(&raw)
            .with_context(|| format!("Failed to load condition dataset '{}'", path.display()))?;

        tracing::info!(
            "Loaded {} condition codes from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Localized text for a condition code.
    ///
    /// Returns `None` for an unknown code. An empty or unknown `lang_iso`
    /// yields the entry's default day or night text.
    pub fn lookup(&self, code: i64, is_day: bool, lang_iso: &str) -> Option<String> {
        // ---
        let entry = self.entries.iter().find(|e| e.code == code)?;

        let localized = (!lang_iso.is_empty())
            .then(|| entry.languages.iter().find(|l| l.lang_iso == lang_iso))
            .flatten();

        let text = match (localized, is_day) {
            (Some(lang), true) => &lang.day_text,
            (Some(lang), false) => &lang.night_text,
            (None, true) => &entry.day,
            (None, false) => &entry.night,
        };
        Some(text.clone())
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {
            "code": 1000, "day": "Sunny", "night": "Clear", "icon": 113,
            "languages": [
                {"lang_name": "French", "lang_iso": "fr", "day_text": "Ensoleillé", "night_text": "Clair"}
            ]
        },
        { "code": 1003, "day": "Partly cloudy", "night": "Partly cloudy", "icon": 116, "languages": [] }
    ]"#;

    fn sample_table() -> ConditionTable {
        ConditionTable::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn test_default_text_by_day_flag() {
        // ---
        let table = sample_table();
        assert_eq!(table.lookup(1000, true, "").as_deref(), Some("Sunny"));
        assert_eq!(table.lookup(1000, false, "").as_deref(), Some("Clear"));
    }

    #[test]
    fn test_localized_text() {
        // ---
        let table = sample_table();
        assert_eq!(table.lookup(1000, true, "fr").as_deref(), Some("Ensoleillé"));
        assert_eq!(table.lookup(1000, false, "fr").as_deref(), Some("Clair"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_default() {
        // ---
        let table = sample_table();
        assert_eq!(table.lookup(1000, true, "xx").as_deref(), Some("Sunny"));
        assert_eq!(table.lookup(1003, false, "fr").as_deref(), Some("Partly cloudy"));
    }

    #[test]
    fn test_unknown_code_has_no_text() {
        // ---
        let table = sample_table();
        assert_eq!(table.lookup(9999, true, "en"), None);
    }

    #[test]
    fn test_lookup_is_deterministic() {
        // ---
        let table = sample_table();
        let first = table.lookup(1000, true, "fr");
        for _ in 0..10 {
            assert_eq!(table.lookup(1000, true, "fr"), first);
        }
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        // ---
        let raw = r#"[
            {"code": 1000, "day": "Sunny", "night": "Clear"},
            {"code": 1000, "day": "Sunny", "night": "Clear"}
        ]"#;
        let err = ConditionTable::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("Duplicate condition code 1000"));
    }

    #[test]
    fn test_load_from_file() {
        // ---
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = ConditionTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_missing_or_malformed_file_fails() {
        // ---
        assert!(ConditionTable::load(Path::new("/nonexistent/conditions.json")).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(ConditionTable::load(file.path()).is_err());
    }

    #[test]
    fn test_shipped_dataset_loads() {
        // ---
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("conditions.json");
        let table = ConditionTable::load(&path).unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.lookup(1000, true, "").as_deref(), Some("Sunny"));
    }
}
