//! Model layer - centralized state management
//!
//! - `Dataset` / `GlossaryEntry` - the read-only glossary
//! - `QueryState` - search text, index selection, page, open entry
//! - `engine` - filtering and pagination over the dataset
//! - `ModalStack` - dialog overlay management

pub mod domain;
pub mod engine;
pub mod entry;
pub mod index;
pub mod modal;
pub mod query;
pub mod scroll_lock;
pub mod ui;

pub use entry::{Dataset, EntryId, GlossaryEntry};
pub use index::IndexSymbol;
pub use query::QueryState;
