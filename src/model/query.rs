//! Query state and its transitions
//!
//! All changes to the search text, the selected index symbol, the current
//! page and the open detail entry go through the methods here. They keep two
//! rules in one place: a non-empty search and an index selection never
//! coexist, and any filter change sends the user back to page 1.

use super::entry::EntryId;
use super::index::IndexSymbol;
use super::scroll_lock::{ScrollLock, ScrollLockGuard};

/// The entry shown in the detail overlay, plus the lock it holds on the grid
#[derive(Debug)]
struct OpenDetail {
    entry_id: EntryId,
    _lock: ScrollLockGuard,
}

/// Current search/filter/page selection
#[derive(Debug)]
pub struct QueryState {
    search_text: String,
    selected_initial: Option<IndexSymbol>,
    current_page: usize,
    detail: Option<OpenDetail>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self {
            search_text: String::new(),
            selected_initial: None,
            current_page: 1,
            detail: None,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn selected_initial(&self) -> Option<IndexSymbol> {
        self.selected_initial
    }

    /// 1-based page number
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn selected_entry_id(&self) -> Option<EntryId> {
        self.detail.as_ref().map(|d| d.entry_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filter transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the search text; a non-empty search drops the index selection
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        if !self.search_text.is_empty() {
            self.selected_initial = None;
        }
        self.current_page = 1;
    }

    /// Filter by an index symbol; clears the search text
    ///
    /// Selecting the symbol that is already active keeps it selected.
    pub fn select_initial(&mut self, symbol: IndexSymbol) {
        self.selected_initial = Some(symbol);
        self.search_text.clear();
        self.current_page = 1;
    }

    /// Show everything again
    pub fn clear_all(&mut self) {
        self.search_text.clear();
        self.selected_initial = None;
        self.current_page = 1;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Paging
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance one page; returns false at the last page
    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.current_page < total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; returns false on page 1
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Detail overlay
    // ─────────────────────────────────────────────────────────────────────────

    /// Show an entry in the detail overlay, locking the given scroll surface
    pub fn open_detail(&mut self, entry_id: EntryId, lock: &ScrollLock) {
        // Release the previous entry's hold before taking a new one
        self.detail = None;
        self.detail = Some(OpenDetail {
            entry_id,
            _lock: lock.acquire(),
        });
    }

    /// Close the overlay, returning the entry that was shown
    pub fn close_detail(&mut self) -> Option<EntryId> {
        self.detail.take().map(|d| d.entry_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_exclusive(q: &QueryState) {
        assert!(q.search_text().is_empty() || q.selected_initial().is_none());
    }

    #[test]
    fn test_defaults() {
        let q = QueryState::new();
        assert_eq!(q.search_text(), "");
        assert_eq!(q.selected_initial(), None);
        assert_eq!(q.current_page(), 1);
        assert_eq!(q.selected_entry_id(), None);
    }

    #[test]
    fn test_search_clears_initial_and_resets_page() {
        let mut q = QueryState::new();
        q.select_initial(IndexSymbol::Kana('か'));
        q.next_page(5);
        q.set_search_text("株");
        assert_eq!(q.selected_initial(), None);
        assert_eq!(q.current_page(), 1);
        assert_exclusive(&q);
    }

    #[test]
    fn test_empty_search_keeps_initial() {
        let mut q = QueryState::new();
        q.select_initial(IndexSymbol::Latin);
        q.next_page(3);
        q.set_search_text("");
        assert_eq!(q.selected_initial(), Some(IndexSymbol::Latin));
        assert_eq!(q.current_page(), 1);
    }

    #[test]
    fn test_select_initial_clears_search() {
        let mut q = QueryState::new();
        q.set_search_text("bond");
        q.next_page(2);
        q.select_initial(IndexSymbol::Kana('さ'));
        assert_eq!(q.search_text(), "");
        assert_eq!(q.current_page(), 1);
        assert_exclusive(&q);
    }

    #[test]
    fn test_reselecting_initial_is_idempotent() {
        let mut q = QueryState::new();
        q.select_initial(IndexSymbol::Kana('あ'));
        q.select_initial(IndexSymbol::Kana('あ'));
        assert_eq!(q.selected_initial(), Some(IndexSymbol::Kana('あ')));
    }

    #[test]
    fn test_clear_all() {
        let mut q = QueryState::new();
        q.set_search_text("x");
        q.next_page(4);
        q.clear_all();
        assert_eq!(q.search_text(), "");
        assert_eq!(q.selected_initial(), None);
        assert_eq!(q.current_page(), 1);
    }

    #[test]
    fn test_paging_is_clamped() {
        let mut q = QueryState::new();
        assert!(!q.prev_page());
        assert!(q.next_page(3));
        assert!(q.next_page(3));
        assert!(!q.next_page(3));
        assert_eq!(q.current_page(), 3);
        assert!(q.prev_page());
        assert_eq!(q.current_page(), 2);
    }

    #[test]
    fn test_next_page_with_no_results_is_noop() {
        let mut q = QueryState::new();
        assert!(!q.next_page(0));
        assert_eq!(q.current_page(), 1);
    }

    #[test]
    fn test_mutual_exclusion_over_transition_sequence() {
        let mut q = QueryState::new();
        q.set_search_text("a");
        assert_exclusive(&q);
        q.select_initial(IndexSymbol::Latin);
        assert_exclusive(&q);
        q.set_search_text("b");
        assert_exclusive(&q);
        q.clear_all();
        assert_exclusive(&q);
    }

    #[test]
    fn test_detail_holds_scroll_lock() {
        let lock = ScrollLock::new();
        let mut q = QueryState::new();

        q.open_detail(42, &lock);
        assert_eq!(q.selected_entry_id(), Some(42));
        assert!(lock.is_locked());

        assert_eq!(q.close_detail(), Some(42));
        assert_eq!(q.selected_entry_id(), None);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_replacing_detail_keeps_single_hold() {
        let lock = ScrollLock::new();
        let mut q = QueryState::new();
        q.open_detail(1, &lock);
        q.open_detail(2, &lock);
        assert_eq!(q.selected_entry_id(), Some(2));

        q.close_detail();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_dropping_state_releases_lock() {
        let lock = ScrollLock::new();
        {
            let mut q = QueryState::new();
            q.open_detail(7, &lock);
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_close_without_open_is_noop() {
        let mut q = QueryState::new();
        assert_eq!(q.close_detail(), None);
    }

    #[derive(Debug, Clone)]
    enum Transition {
        Search(&'static str),
        Select(IndexSymbol),
        ShowAll,
        Next(usize),
        Prev,
        Open(EntryId),
        Close,
    }

    fn arb_transition() -> impl Strategy<Value = Transition> {
        prop_oneof![
            prop::sample::select(vec!["", "株", "ETF", "かぶ"]).prop_map(Transition::Search),
            prop::sample::select(IndexSymbol::all()).prop_map(Transition::Select),
            Just(Transition::ShowAll),
            (0..5usize).prop_map(Transition::Next),
            Just(Transition::Prev),
            (1..50u32).prop_map(Transition::Open),
            Just(Transition::Close),
        ]
    }

    proptest! {
        #[test]
        fn prop_transitions_keep_query_consistent(
            transitions in prop::collection::vec(arb_transition(), 0..60)
        ) {
            let lock = ScrollLock::new();
            let mut q = QueryState::new();

            for transition in transitions {
                let before = q.current_page();
                match transition.clone() {
                    Transition::Search(text) => q.set_search_text(text),
                    Transition::Select(symbol) => q.select_initial(symbol),
                    Transition::ShowAll => q.clear_all(),
                    Transition::Next(total) => {
                        let moved = q.next_page(total);
                        prop_assert_eq!(moved, before < total);
                    }
                    Transition::Prev => {
                        let moved = q.prev_page();
                        prop_assert_eq!(moved, before > 1);
                    }
                    Transition::Open(id) => q.open_detail(id, &lock),
                    Transition::Close => {
                        q.close_detail();
                    }
                }

                prop_assert!(q.search_text().is_empty() || q.selected_initial().is_none());
                prop_assert!(q.current_page() >= 1);
                if matches!(
                    transition,
                    Transition::Search(_) | Transition::Select(_) | Transition::ShowAll
                ) {
                    prop_assert_eq!(q.current_page(), 1);
                }
                prop_assert_eq!(lock.is_locked(), q.selected_entry_id().is_some());
            }

            drop(q);
            prop_assert!(!lock.is_locked());
        }
    }
}
