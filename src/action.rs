//! Action enum - All possible application actions
//!
//! Components turn key and mouse events into Actions; the App applies them
//! to the query state and the UI.

use crate::model::{EntryId, IndexSymbol};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,
    /// Leave the title screen
    SplashComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Focus the search box
    EnterSearchMode,
    /// Leave the search box (the query stays)
    ExitSearchMode,
    /// Append a character to the search text
    SearchInput(char),
    /// Remove the last character of the search text
    SearchBackspace,
    /// Empty the search box
    ClearSearch,

    // ─────────────────────────────────────────────────────────────────────────
    // Index Bar
    // ─────────────────────────────────────────────────────────────────────────
    /// Filter by an index symbol
    SelectInitial(IndexSymbol),
    /// Drop search text and index selection ("show all")
    ShowAll,
    /// Move the index bar cursor left
    IndexLeft,
    /// Move the index bar cursor right
    IndexRight,
    /// Activate the button under the index bar cursor
    IndexActivate,
    /// Switch focus between index bar and cards
    ToggleFocus,

    // ─────────────────────────────────────────────────────────────────────────
    // Pages
    // ─────────────────────────────────────────────────────────────────────────
    NextPage,
    PrevPage,

    // ─────────────────────────────────────────────────────────────────────────
    // Card Grid
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to the next card
    NextCard,
    /// Move to the previous card
    PrevCard,
    /// Move one grid row down
    CardDown,
    /// Move one grid row up
    CardUp,
    /// Jump to the first card on the page
    FirstCard,
    /// Jump to the last card on the page
    LastCard,
    /// Scroll the grid by a number of rows (mouse wheel)
    ScrollGrid(i16),

    // ─────────────────────────────────────────────────────────────────────────
    // Detail Overlay
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the card under the cursor
    OpenSelected,
    /// Open the detail overlay for an entry
    OpenDetail(EntryId),
    /// Close the detail overlay
    CloseDetail,
    /// Scroll the detail text up one line
    DetailScrollUp,
    /// Scroll the detail text down one line
    DetailScrollDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the top dialog
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::SelectInitial(symbol) => write!(f, "SelectInitial({})", symbol),
            Action::ShowAll => write!(f, "ShowAll"),
            Action::IndexLeft => write!(f, "IndexLeft"),
            Action::IndexRight => write!(f, "IndexRight"),
            Action::IndexActivate => write!(f, "IndexActivate"),
            Action::ToggleFocus => write!(f, "ToggleFocus"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::NextCard => write!(f, "NextCard"),
            Action::PrevCard => write!(f, "PrevCard"),
            Action::CardDown => write!(f, "CardDown"),
            Action::CardUp => write!(f, "CardUp"),
            Action::FirstCard => write!(f, "FirstCard"),
            Action::LastCard => write!(f, "LastCard"),
            Action::ScrollGrid(rows) => write!(f, "ScrollGrid({})", rows),
            Action::OpenSelected => write!(f, "OpenSelected"),
            Action::OpenDetail(id) => write!(f, "OpenDetail({})", id),
            Action::CloseDetail => write!(f, "CloseDetail"),
            Action::DetailScrollUp => write!(f, "DetailScrollUp"),
            Action::DetailScrollDown => write!(f, "DetailScrollDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
