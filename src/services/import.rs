//! Build a dataset from scraped glossary records
//!
//! Scrapers produce loose `{term, reading, definition, source}` records from
//! several sites. This turns them into dataset entries: first record per term
//! wins, empty definitions are dropped, list markers left over from the
//! source pages are stripped, definitions are reworded and initials come from
//! the reading.
//!
//! Given an existing dataset the import is append-only: its entries are kept
//! as they are and only terms it does not have yet are added after them.

use super::dataset::{derive_initial, load_file};
use crate::model::GlossaryEntry;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Definitions longer than this many characters are cut
pub const MAX_DEFINITION_CHARS: usize = 300;

/// Leading arrow/bracket markers and whitespace copied from link lists
static LEADING_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[〉＞>\s]+").expect("valid marker regex"));

static TRAILING_TO_IIMASU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"といいます$").expect("valid suffix regex"));

static TRAILING_DEARU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"である$").expect("valid suffix regex"));

/// A record as written by the scrapers
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub term: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default, alias = "src")]
    pub source: Option<String>,
}

/// What an import run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries added by this run
    pub added: usize,
    /// Entries in the written dataset, existing ones included
    pub total: usize,
}

/// Strip leading markers and surrounding whitespace from a definition
pub fn clean_definition(definition: &str) -> String {
    LEADING_MARKERS.replace(definition.trim(), "").trim().to_string()
}

/// Reword a source definition and cap its length
pub fn rephrase_definition(definition: &str) -> String {
    let text = definition
        .replace("。です。", "。")
        .replace("のことです。", "を意味します。");
    let text = TRAILING_TO_IIMASU.replace(&text, "と呼ばれます。");
    let text = TRAILING_DEARU.replace(&text, "を指します。").into_owned();

    if text.chars().count() > MAX_DEFINITION_CHARS {
        let mut cut: String = text.chars().take(MAX_DEFINITION_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        text
    }
}

/// Convert raw records into entries with sequential ids
pub fn build_entries(records: Vec<RawRecord>) -> Vec<GlossaryEntry> {
    append_entries(&[], records)
}

/// Add the records' new terms after `existing`
///
/// Existing entries come first and unchanged. New ids continue after the
/// highest existing id.
pub fn append_entries(existing: &[GlossaryEntry], records: Vec<RawRecord>) -> Vec<GlossaryEntry> {
    let mut seen_terms: HashSet<String> = existing.iter().map(|e| e.term.trim().to_string()).collect();
    let mut next_id = existing.iter().map(|e| e.id).max().unwrap_or(0) + 1;
    let mut entries = existing.to_vec();

    for record in records {
        let term = record.term.trim().to_string();
        let definition = clean_definition(&record.definition);
        if term.is_empty() || definition.is_empty() {
            continue;
        }
        if !seen_terms.insert(term.clone()) {
            tracing::debug!(%term, source = ?record.source, "skipping known term");
            continue;
        }

        let reading = record.reading.trim().to_string();
        entries.push(GlossaryEntry {
            id: next_id,
            initial: derive_initial(&reading),
            term,
            reading,
            definition: rephrase_definition(&definition),
        });
        next_id += 1;
    }

    entries
}

/// Read scraped records from `input` and write a dataset JSON to `output`
///
/// With `existing`, that dataset is loaded first and only unknown terms are
/// appended to it. `existing` and `output` may be the same file.
pub fn import_file(input: &Path, existing: Option<&Path>, output: &Path) -> Result<ImportSummary> {
    let contents = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let records: Vec<RawRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse scraped records in {}", input.display()))?;

    let current = match existing {
        Some(path) => load_file(path)
            .with_context(|| format!("Failed to load existing dataset {}", path.display()))?
            .entries()
            .to_vec(),
        None => Vec::new(),
    };

    let total_records = records.len();
    let entries = append_entries(&current, records);
    let summary = ImportSummary {
        added: entries.len() - current.len(),
        total: entries.len(),
    };
    tracing::info!(
        records = total_records,
        added = summary.added,
        total = summary.total,
        "imported glossary records"
    );

    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryId;

    fn raw(term: &str, reading: &str, definition: &str) -> RawRecord {
        RawRecord {
            term: term.to_string(),
            reading: reading.to_string(),
            definition: definition.to_string(),
            source: None,
        }
    }

    fn existing_entry(id: EntryId, term: &str) -> GlossaryEntry {
        GlossaryEntry {
            id,
            term: term.to_string(),
            reading: "かぶしき".to_string(),
            definition: "既存の説明".to_string(),
            initial: "か".to_string(),
        }
    }

    #[test]
    fn test_clean_definition_strips_markers() {
        assert_eq!(clean_definition("〉 株式の一種"), "株式の一種");
        assert_eq!(clean_definition("＞＞説明"), "説明");
        assert_eq!(clean_definition("  plain  "), "plain");
        assert_eq!(clean_definition("a〉b"), "a〉b");
    }

    #[test]
    fn test_rephrase_rewrites_endings() {
        assert_eq!(rephrase_definition("配当の一種。です。"), "配当の一種。");
        assert_eq!(rephrase_definition("利益の分配のことです。"), "利益の分配を意味します。");
        assert_eq!(rephrase_definition("これを配当といいます"), "これを配当と呼ばれます。");
        assert_eq!(rephrase_definition("株主への分配である"), "株主への分配を指します。");
    }

    #[test]
    fn test_rephrase_only_touches_trailing_suffixes() {
        assert_eq!(rephrase_definition("であるか否か"), "であるか否か");
        assert_eq!(rephrase_definition("といいますが違います"), "といいますが違います");
    }

    #[test]
    fn test_rephrase_cuts_long_definitions() {
        let exact = "あ".repeat(MAX_DEFINITION_CHARS);
        assert_eq!(rephrase_definition(&exact), exact);

        let long = "株".repeat(MAX_DEFINITION_CHARS + 20);
        let cut = rephrase_definition(&long);
        assert_eq!(cut.chars().count(), MAX_DEFINITION_CHARS + 3);
        assert!(cut.ends_with("株..."));
    }

    #[test]
    fn test_build_entries_dedups_by_term() {
        let entries = build_entries(vec![
            raw("株式", "かぶしき", "first"),
            raw("株式", "かぶしき", "second"),
            raw("ETF", "ETF", "fund"),
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].definition, "first");
        assert_eq!(entries[1].id, 2);
        assert_eq!(entries[1].initial, "A-Z");
    }

    #[test]
    fn test_build_entries_drops_empty_definitions() {
        let entries = build_entries(vec![raw("空", "から", "〉 "), raw("債券", "さいけん", "bond")]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].term, "債券");
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].initial, "さ");
    }

    #[test]
    fn test_build_entries_rephrases() {
        let entries = build_entries(vec![raw("配当", "はいとう", "〉利益の分配のことです。")]);
        assert_eq!(entries[0].definition, "利益の分配を意味します。");
    }

    #[test]
    fn test_append_entries_skips_known_terms_and_continues_ids() {
        let existing = vec![existing_entry(3, "株式"), existing_entry(7, "債券")];
        let entries = append_entries(
            &existing,
            vec![
                raw("株式", "かぶしき", "新しい説明"),
                raw("配当", "はいとう", "利益の分配"),
                raw(" 債券 ", "さいけん", "別の説明"),
                raw("NISA", "NISA", "非課税制度"),
            ],
        );

        assert_eq!(&entries[..2], &existing[..]);
        let added: Vec<(EntryId, &str)> = entries[2..].iter().map(|e| (e.id, e.term.as_str())).collect();
        assert_eq!(added, vec![(8, "配当"), (9, "NISA")]);
    }

    #[test]
    fn test_raw_record_accepts_src_alias() {
        let json = r#"[{"term": "NISA", "reading": "", "definition": "x", "src": "SMBC"}]"#;
        let records: Vec<RawRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].source.as_deref(), Some("SMBC"));
    }

    #[test]
    fn test_import_file_writes_loadable_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scraped.json");
        let output = dir.path().join("glossary.json");
        fs::write(
            &input,
            r#"[{"term": "配当", "reading": "はいとう", "definition": "〉利益の分配"}]"#,
        )
        .unwrap();

        let summary = import_file(&input, None, &output).unwrap();
        assert_eq!(summary, ImportSummary { added: 1, total: 1 });

        let dataset = load_file(&output).unwrap();
        let entry = dataset.get(1).unwrap();
        assert_eq!(entry.definition, "利益の分配");
        assert_eq!(entry.initial, "は");
    }

    #[test]
    fn test_import_file_appends_to_existing_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scraped.json");
        let dataset_path = dir.path().join("glossary.json");
        fs::write(
            &dataset_path,
            r#"[{"id": 10, "term": "株式", "reading": "かぶしき", "definition": "出資証券", "initial": "か"}]"#,
        )
        .unwrap();
        fs::write(
            &input,
            r#"[
                {"term": "株式", "reading": "かぶしき", "definition": "上書きされない"},
                {"term": "ETF", "reading": "ETF", "definition": "上場投資信託である"}
            ]"#,
        )
        .unwrap();

        let summary = import_file(&input, Some(&dataset_path), &dataset_path).unwrap();
        assert_eq!(summary, ImportSummary { added: 1, total: 2 });

        let dataset = load_file(&dataset_path).unwrap();
        assert_eq!(dataset.get(10).unwrap().definition, "出資証券");
        let etf = dataset.get(11).unwrap();
        assert_eq!(etf.definition, "上場投資信託を指します。");
        assert_eq!(etf.initial, "A-Z");
    }

    #[test]
    fn test_import_file_missing_existing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scraped.json");
        fs::write(&input, "[]").unwrap();
        let err = import_file(&input, Some(&dir.path().join("nope.json")), &dir.path().join("out.json"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load existing dataset"));
    }
}
