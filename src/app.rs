//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Query-state changes all happen here so that the card grid's cursor and the
//! detail overlay stay in step with the filter.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, DetailDialog, HelpDialog, HomeComponent, HomeRenderContext, QuitDialog,
    SplashComponent,
};
use crate::model::domain::DomainState;
use crate::model::engine::ResultSet;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::AppMode;
use crate::model::{Dataset, EntryId};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{layout::Rect, Frame};

// ═══════════════════════════════════════════════════════════════════════════════
// App State
// ═══════════════════════════════════════════════════════════════════════════════

/// Root application state
pub struct App {
    /// Current mode
    pub mode: AppMode,

    /// Dataset and query
    pub domain: DomainState,

    /// Dialogs above the glossary screen
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub home: HomeComponent,
    pub detail_dialog: DetailDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    /// Create the app over a loaded dataset
    pub fn new(dataset: Dataset, show_splash: bool) -> App {
        let splash = SplashComponent::new(dataset.len());
        let mode = if show_splash {
            AppMode::Splash
        } else {
            AppMode::Running
        };

        App {
            mode,
            domain: DomainState::new(dataset),
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            splash,
            home: HomeComponent::new(),
            detail_dialog: DetailDialog::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    /// Show an error in the footer
    pub fn with_error(mut self, error: Option<String>) -> App {
        self.error = error;
        self
    }

    fn results(&self) -> ResultSet<'_> {
        ResultSet::compute(self.domain.dataset.entries(), &self.domain.query)
    }

    fn visible_len(&self) -> usize {
        self.results().visible().len()
    }

    /// Entry under the card cursor
    fn selected_card(&self) -> Option<EntryId> {
        let results = self.results();
        let visible = results.visible();
        self.home
            .grid
            .selected(visible.len())
            .and_then(|i| visible.get(i))
            .map(|entry| entry.id)
    }

    /// Whether the detail overlay is showing
    pub fn detail_open(&self) -> bool {
        self.domain.query.selected_entry_id().is_some()
    }

    /// The filter changed: back to the first card
    fn on_filter_changed(&mut self) {
        self.home.grid.reset();
        self.home.index_bar.focus(self.domain.query.selected_initial());
        tracing::debug!(
            search = self.domain.query.search_text(),
            initial = ?self.domain.query.selected_initial(),
            matches = self.results().len(),
            "filter changed"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else if self.detail_open() {
                    self.detail_dialog.handle_key_event(key)
                } else if self.home.search_mode {
                    self.handle_search_key_event(key)
                } else {
                    self.home.handle_key_event(key)
                }
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Splash => Ok(None),
            AppMode::Running => {
                if !self.modals.is_empty() {
                    Ok(None)
                } else if self.detail_open() {
                    self.detail_dialog.handle_mouse_event(mouse)
                } else {
                    self.home.handle_mouse_event(mouse)
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash {
                    return self.splash.update(action);
                }
            }
            Action::SplashComplete => {
                self.mode = AppMode::Running;
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode | Action::ExitSearchMode => {
                self.home.update(action)?;
            }
            Action::SearchInput(c) => {
                let mut text = self.domain.query.search_text().to_string();
                text.push(c);
                self.domain.query.set_search_text(text);
                self.on_filter_changed();
            }
            Action::SearchBackspace => {
                let mut text = self.domain.query.search_text().to_string();
                if text.pop().is_some() {
                    self.domain.query.set_search_text(text);
                    self.on_filter_changed();
                }
            }
            Action::ClearSearch => {
                self.domain.query.set_search_text("");
                self.on_filter_changed();
            }

            // ─────────────────────────────────────────────────────────────────
            // Index Bar
            // ─────────────────────────────────────────────────────────────────
            Action::SelectInitial(symbol) => {
                self.domain.query.select_initial(symbol);
                self.home.exit_search_mode();
                self.on_filter_changed();
            }
            Action::ShowAll => {
                self.domain.query.clear_all();
                self.home.exit_search_mode();
                self.on_filter_changed();
            }
            Action::IndexLeft | Action::IndexRight | Action::IndexActivate | Action::ToggleFocus => {
                return self.home.update(action);
            }

            // ─────────────────────────────────────────────────────────────────
            // Pages
            // ─────────────────────────────────────────────────────────────────
            Action::NextPage => {
                let total_pages = self.results().total_pages();
                if self.domain.query.next_page(total_pages) {
                    self.home.grid.reset();
                }
            }
            Action::PrevPage => {
                if self.domain.query.prev_page() {
                    self.home.grid.reset();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Card Grid (delegate to CardGrid)
            // ─────────────────────────────────────────────────────────────────
            Action::NextCard => {
                let len = self.visible_len();
                self.home.grid.next(len);
            }
            Action::PrevCard => {
                let len = self.visible_len();
                self.home.grid.previous(len);
            }
            Action::CardDown => {
                let len = self.visible_len();
                self.home.grid.down(len);
            }
            Action::CardUp => {
                let len = self.visible_len();
                self.home.grid.up(len);
            }
            Action::FirstCard => {
                let len = self.visible_len();
                self.home.grid.first(len);
            }
            Action::LastCard => {
                let len = self.visible_len();
                self.home.grid.last(len);
            }
            Action::ScrollGrid(rows) => {
                let len = self.visible_len();
                self.home.grid.scroll(rows, len);
            }

            // ─────────────────────────────────────────────────────────────────
            // Detail Overlay
            // ─────────────────────────────────────────────────────────────────
            Action::OpenSelected => {
                return Ok(self.selected_card().map(Action::OpenDetail));
            }
            Action::OpenDetail(id) => {
                if self.domain.contains(id) {
                    self.domain
                        .query
                        .open_detail(id, self.home.grid.scroll_lock());
                    self.detail_dialog.reset();
                    tracing::debug!(id, "detail opened");
                } else {
                    tracing::warn!(id, "detail requested for unknown entry");
                }
            }
            Action::CloseDetail => {
                if let Some(id) = self.domain.query.close_detail() {
                    tracing::debug!(id, "detail closed");
                }
            }
            Action::DetailScrollUp | Action::DetailScrollDown => {
                self.detail_dialog.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Dialogs
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.toggle(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area)?,
            AppMode::Running => {
                let results =
                    ResultSet::compute(self.domain.dataset.entries(), &self.domain.query);
                let ctx = HomeRenderContext {
                    query: &self.domain.query,
                    results: &results,
                    error: self.error.as_deref(),
                    status_message: self.status_message.as_deref(),
                };
                draw_home_screen(frame, area, &mut self.home, &ctx)?;

                if let Some(entry) = self.domain.selected_entry() {
                    self.detail_dialog.draw_entry(frame, area, entry);
                }

                // Draw modal overlay if active
                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ClearSearch)
            }
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GlossaryEntry, IndexSymbol};
    use crossterm::event::{MouseButton, MouseEventKind};
    use ratatui::{backend::TestBackend, Terminal};

    fn entry(id: EntryId, term: &str, reading: &str, initial: &str) -> GlossaryEntry {
        GlossaryEntry {
            id,
            term: term.to_string(),
            reading: reading.to_string(),
            definition: format!("{}の説明", term),
            initial: initial.to_string(),
        }
    }

    fn app() -> App {
        let dataset = Dataset::new(
            vec![
                entry(1, "株式", "かぶしき", "か"),
                entry(2, "ETF", "いーてぃーえふ", "A-Z"),
                entry(3, "債券", "さいけん", "さ"),
            ],
            "test",
        );
        App::new(dataset, false)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Feed a key through routing and update, following chained actions
    fn press(app: &mut App, code: KeyCode) {
        let mut action = app.handle_key_event(key(code)).unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.draw(f, f.area()).unwrap()).unwrap();
    }

    #[test]
    fn test_search_mode_routes_characters_to_query() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.home.search_mode);

        // 'q' is text while searching, not quit
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.domain.query.search_text(), "q");
        assert!(app.modals.is_empty());

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('株'));
        assert_eq!(app.results().len(), 1);

        press(&mut app, KeyCode::Enter);
        assert!(!app.home.search_mode);
        assert_eq!(app.domain.query.search_text(), "株");
    }

    #[test]
    fn test_index_activation_clears_search() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Tab);
        // Cursor starts on "show all"; last button is A-Z
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.domain.query.selected_initial(), Some(IndexSymbol::Latin));
        assert_eq!(app.domain.query.search_text(), "");
        let ids: Vec<EntryId> = app.results().visible().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_open_selected_locks_grid_until_closed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.domain.query.selected_entry_id(), Some(2));
        assert!(app.home.grid.is_locked());

        // Grid keys now go to the overlay; the cursor does not move
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.home.grid.cursor(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.domain.query.selected_entry_id(), None);
        assert!(!app.home.grid.is_locked());
    }

    #[test]
    fn test_backdrop_click_closes_detail() {
        let mut app = app();
        app.update(Action::OpenDetail(1)).unwrap();
        draw(&mut app);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        let action = app.handle_mouse_event(click).unwrap();
        assert_eq!(action, Some(Action::CloseDetail));
        app.update(Action::CloseDetail).unwrap();
        assert!(!app.home.grid.is_locked());
    }

    #[test]
    fn test_unknown_entry_is_ignored() {
        let mut app = app();
        app.update(Action::OpenDetail(99)).unwrap();
        assert!(!app.detail_open());
        assert!(!app.home.grid.is_locked());
    }

    #[test]
    fn test_dropping_app_releases_lock() {
        let mut app = app();
        let lock = app.home.grid.scroll_lock().clone();
        app.update(Action::OpenDetail(3)).unwrap();
        assert!(lock.is_locked());
        drop(app);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('n'));
        assert!(app.modals.is_empty());

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
    }

    #[test]
    fn test_help_toggles() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.modals.top(), Some(Modal::Help)));
        press(&mut app, KeyCode::Char('?'));
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_filter_change_resets_cursor() {
        let mut app = app();
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.home.grid.cursor(), 2);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.home.grid.cursor(), 0);
    }

    #[test]
    fn test_draw_with_detail_and_empty_results() {
        let mut app = app();
        app.update(Action::OpenDetail(1)).unwrap();
        draw(&mut app);
        app.update(Action::CloseDetail).unwrap();

        app.update(Action::SearchInput('z')).unwrap();
        assert_eq!(app.results().len(), 0);
        draw(&mut app);
    }
}
