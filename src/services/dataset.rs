//! Dataset loading
//!
//! The default glossary is compiled into the binary. A different file can be
//! loaded instead; its format is chosen by extension (JSON, YAML, or a CSV
//! export of the maintained spreadsheet).

use crate::model::{Dataset, EntryId, GlossaryEntry, IndexSymbol};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static BUNDLED_JSON: &str = include_str!("../../assets/glossary.json");

/// Errors raised while loading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML dataset: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid CSV dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported dataset format: {0} (expected .json, .yaml, .yml or .csv)")]
    UnsupportedFormat(String),

    #[error("duplicate entry id {0}")]
    DuplicateId(EntryId),

    #[error("entry {0} has an empty term")]
    EmptyTerm(EntryId),
}

/// One row of the spreadsheet export, in sheet column order
#[derive(Debug, Deserialize)]
struct SheetRow {
    #[serde(default)]
    initial: String,
    term: String,
    #[serde(default)]
    reading: String,
    #[serde(default)]
    definition: String,
}

/// Load the dataset compiled into the binary
pub fn load_bundled() -> Result<Dataset, DatasetError> {
    let entries = parse_json(BUNDLED_JSON)?;
    Ok(Dataset::new(entries, "bundled"))
}

/// Load a dataset file, picking the parser from the extension
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let entries = match extension.as_str() {
        "json" => parse_json(&contents)?,
        "yaml" | "yml" => parse_yaml(&contents)?,
        "csv" => parse_csv(&contents)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string())),
    };

    tracing::info!(path = %path.display(), entries = entries.len(), "loaded dataset");
    Ok(Dataset::new(entries, path.display().to_string()))
}

pub fn parse_json(contents: &str) -> Result<Vec<GlossaryEntry>, DatasetError> {
    let entries: Vec<GlossaryEntry> = serde_json::from_str(contents)?;
    validate(entries)
}

pub fn parse_yaml(contents: &str) -> Result<Vec<GlossaryEntry>, DatasetError> {
    let entries: Vec<GlossaryEntry> = serde_yaml::from_str(contents)?;
    validate(entries)
}

/// Parse a sheet export with header `initial,term,reading,definition`
///
/// Ids follow row order starting at 1. The sheet's initial column holds the
/// raw first character of the reading, so it is folded like any other
/// initial during validation.
pub fn parse_csv(contents: &str) -> Result<Vec<GlossaryEntry>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut entries = Vec::new();
    for (row, record) in reader.deserialize::<SheetRow>().enumerate() {
        let record = record?;
        entries.push(GlossaryEntry {
            id: row as EntryId + 1,
            term: record.term,
            reading: record.reading,
            definition: record.definition,
            initial: record.initial,
        });
    }
    validate(entries)
}

/// Index label for a reading, or an empty string when it has none
pub fn derive_initial(reading: &str) -> String {
    IndexSymbol::for_reading(reading)
        .map(|s| s.label())
        .unwrap_or_default()
}

/// Map a stored initial onto the index symbol set
///
/// Labels already in the set are kept. Anything else (`が`, `パ`, `E`) is
/// folded like a reading; if that still names no symbol the reading decides.
pub fn normalize_initial(initial: &str, reading: &str) -> String {
    let initial = initial.trim();
    if let Some(symbol) = IndexSymbol::parse(initial) {
        return symbol.label();
    }
    IndexSymbol::for_reading(initial)
        .map(|s| s.label())
        .unwrap_or_else(|| derive_initial(reading))
}

fn validate(mut entries: Vec<GlossaryEntry>) -> Result<Vec<GlossaryEntry>, DatasetError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &mut entries {
        if !seen.insert(entry.id) {
            return Err(DatasetError::DuplicateId(entry.id));
        }
        if entry.term.trim().is_empty() {
            return Err(DatasetError::EmptyTerm(entry.id));
        }
        let initial = normalize_initial(&entry.initial, &entry.reading);
        if initial != entry.initial {
            tracing::debug!(id = entry.id, from = %entry.initial, to = %initial, "normalized initial");
            entry.initial = initial;
        }
    }
    Ok(entries)
}
