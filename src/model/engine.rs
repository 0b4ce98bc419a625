//! Filtering and pagination over the dataset
//!
//! Everything here is a pure function of the entries and the query state.
//! Results keep dataset order; nothing is ranked or reordered.

use super::entry::GlossaryEntry;
use super::index::IndexSymbol;
use super::query::QueryState;

/// Cards per page
pub const PAGE_SIZE: usize = 100;

/// Free-text match against term, reading and definition
///
/// Term and definition compare case-insensitively. The reading compares
/// as-is since kana has no case.
pub fn matches_text(entry: &GlossaryEntry, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let needle = search_text.to_lowercase();
    entry.term.to_lowercase().contains(&needle)
        || entry.reading.contains(search_text)
        || entry.definition.to_lowercase().contains(&needle)
}

/// Index-bar match
pub fn matches_initial(entry: &GlossaryEntry, selected: Option<IndexSymbol>) -> bool {
    match selected {
        None => true,
        // Acronyms are often stored with a kana reading (ETF as いーてぃーえふ)
        // but an A-Z initial, so either one puts the entry in the bucket
        Some(IndexSymbol::Latin) => {
            entry.reading_starts_latin() || IndexSymbol::Latin.is_label(&entry.initial)
        }
        Some(symbol) => symbol.is_label(&entry.initial),
    }
}

/// Entries matching both the search text and the index selection
pub fn filter_entries<'a>(entries: &'a [GlossaryEntry], query: &QueryState) -> Vec<&'a GlossaryEntry> {
    let search_text = query.search_text();
    let selected = query.selected_initial();
    entries
        .iter()
        .filter(|entry| matches_text(entry, search_text) && matches_initial(entry, selected))
        .collect()
}

/// Number of pages for `count` results; 0 when there are none
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// The items on a 1-based page. Out-of-range pages give an empty slice.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Filtered entries together with the page being viewed
#[derive(Debug)]
pub struct ResultSet<'a> {
    filtered: Vec<&'a GlossaryEntry>,
    page: usize,
}

impl<'a> ResultSet<'a> {
    pub fn compute(entries: &'a [GlossaryEntry], query: &QueryState) -> Self {
        Self {
            filtered: filter_entries(entries, query),
            page: query.current_page(),
        }
    }

    /// Number of matching entries across all pages
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    /// True when nothing matches; drives the empty-state message
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len())
    }

    pub fn all(&self) -> &[&'a GlossaryEntry] {
        &self.filtered
    }

    /// Entries on the current page
    pub fn visible(&self) -> &[&'a GlossaryEntry] {
        page_slice(&self.filtered, self.page)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// 1-based inclusive range of the visible entries
    pub fn display_range(&self) -> Option<(usize, usize)> {
        let visible = self.visible().len();
        if visible == 0 {
            return None;
        }
        let start = (self.page - 1) * PAGE_SIZE + 1;
        Some((start, start + visible - 1))
    }
}
