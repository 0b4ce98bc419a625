//! Command-line interface
//!
//! With no subcommand the interactive glossary opens. `search` and `import`
//! run without touching the terminal UI.

use crate::model::engine::ResultSet;
use crate::model::{Dataset, IndexSymbol, QueryState};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "glossary-tui", version, about = "Browse the investment glossary in the terminal")]
pub struct Cli {
    /// Dataset file (.json, .yaml, .yml or .csv) to use instead of the bundled glossary
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Skip the title screen
    #[arg(long)]
    pub no_splash: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one page of matching terms
    Search {
        /// Text to look for in terms, readings and definitions
        text: Option<String>,

        /// Index symbol to filter by (a kana row such as か, or A-Z)
        #[arg(long, conflicts_with = "text")]
        initial: Option<String>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Convert scraped records (JSON) into a dataset file
    Import {
        input: PathBuf,
        output: PathBuf,

        /// Dataset to append to; terms it already has are skipped
        #[arg(long, value_name = "PATH")]
        existing: Option<PathBuf>,
    },
}

/// Build the query state a `search` invocation describes
pub fn search_query(
    dataset: &Dataset,
    text: Option<&str>,
    initial: Option<&str>,
    page: usize,
) -> Result<QueryState> {
    let mut query = QueryState::new();
    if let Some(label) = initial {
        let Some(symbol) = IndexSymbol::parse(label) else {
            bail!("Unknown index symbol '{}'", label);
        };
        query.select_initial(symbol);
    } else if let Some(text) = text {
        query.set_search_text(text);
    }

    let total = ResultSet::compute(dataset.entries(), &query).total_pages();
    for _ in 1..page {
        if !query.next_page(total) {
            break;
        }
    }
    Ok(query)
}

/// Print the current page of results
pub fn print_results<W: Write>(out: &mut W, dataset: &Dataset, query: &QueryState) -> Result<()> {
    let results = ResultSet::compute(dataset.entries(), query);

    if results.is_empty() {
        writeln!(out, "見つかりませんでした")?;
        return Ok(());
    }

    for entry in results.visible() {
        writeln!(out, "[{}] {} ({})", entry.initial, entry.term, entry.reading)?;
        writeln!(out, "    {}", entry.definition)?;
    }

    if let Some((start, end)) = results.display_range() {
        writeln!(
            out,
            "{} 件中 {} 〜 {} 件を表示 ({} / {} ページ)",
            results.len(),
            start,
            end,
            results.page(),
            results.total_pages()
        )?;
    }
    Ok(())
}
