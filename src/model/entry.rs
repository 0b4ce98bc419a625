//! Glossary entries and the read-only dataset that holds them

use serde::{Deserialize, Serialize};

/// Stable identifier of a glossary entry
pub type EntryId = u32;

/// A single glossary term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub id: EntryId,
    pub term: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub definition: String,
    /// Index bucket label (a kana row symbol or "A-Z")
    #[serde(default)]
    pub initial: String,
}

impl GlossaryEntry {
    /// Whether the reading begins with an ASCII letter
    pub fn reading_starts_latin(&self) -> bool {
        self.reading
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
    }
}

/// Immutable, ordered collection of entries loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<GlossaryEntry>,
    /// Where the entries came from, for the status line
    source: String,
}

impl Dataset {
    pub fn new(entries: Vec<GlossaryEntry>, source: impl Into<String>) -> Self {
        Self {
            entries,
            source: source.into(),
        }
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id
    pub fn get(&self, id: EntryId) -> Option<&GlossaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: EntryId, reading: &str) -> GlossaryEntry {
        GlossaryEntry {
            id,
            term: format!("term{}", id),
            reading: reading.to_string(),
            definition: String::new(),
            initial: String::new(),
        }
    }

    #[test]
    fn test_reading_starts_latin() {
        assert!(entry(1, "ETF").reading_starts_latin());
        assert!(entry(2, "ideco").reading_starts_latin());
        assert!(!entry(3, "かぶしき").reading_starts_latin());
        assert!(!entry(4, "").reading_starts_latin());
        assert!(!entry(5, "１２３").reading_starts_latin());
    }

    #[test]
    fn test_dataset_get_by_id() {
        let dataset = Dataset::new(vec![entry(10, "a"), entry(20, "b")], "test");
        assert_eq!(dataset.get(20).map(|e| e.reading.as_str()), Some("b"));
        assert!(dataset.get(30).is_none());
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.source(), "test");
    }

    #[test]
    fn test_entry_deserializes_with_missing_optional_fields() {
        let json = r#"{"id": 7, "term": "NISA"}"#;
        let entry: GlossaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert!(entry.reading.is_empty());
        assert!(entry.initial.is_empty());
    }
}
