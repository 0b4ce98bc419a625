//! Domain state - the loaded glossary, separate from UI concerns

use super::entry::{Dataset, EntryId, GlossaryEntry};
use super::query::QueryState;

/// Domain state: the read-only dataset and the query applied to it
#[derive(Debug, Default)]
pub struct DomainState {
    pub dataset: Dataset,
    pub query: QueryState,
}

impl DomainState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            query: QueryState::new(),
        }
    }

    /// The entry currently shown in the detail overlay
    pub fn selected_entry(&self) -> Option<&GlossaryEntry> {
        self.query
            .selected_entry_id()
            .and_then(|id| self.dataset.get(id))
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.dataset.get(id).is_some()
    }
}
