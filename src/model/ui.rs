//! Presentation state shared between the app and its components

/// Main application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Splash,
    Running,
}

/// Which part of the glossary screen receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Index,
    #[default]
    Cards,
}

impl Focus {
    pub fn toggle(self) -> Focus {
        match self {
            Focus::Index => Focus::Cards,
            Focus::Cards => Focus::Index,
        }
    }
}
