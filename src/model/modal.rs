//! Modal stack for dialogs drawn over the glossary screen
//!
//! The detail overlay is not a stack entry: it is driven by the query
//! state's selected entry so that closing it always releases the grid's
//! scroll lock. Dialogs on this stack sit above it.

/// A dialog that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Keyboard shortcut reference
    Help,
}

/// A stack of modal dialogs
///
/// Only the top dialog receives input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Push the modal unless it is already on top, in which case pop it
    pub fn toggle(&mut self, modal: Modal) {
        let same_kind = self
            .top()
            .is_some_and(|top| std::mem::discriminant(top) == std::mem::discriminant(&modal));
        if same_kind {
            self.stack.pop();
        } else {
            self.stack.push(modal);
        }
    }
}
