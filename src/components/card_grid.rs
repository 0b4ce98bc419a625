//! Card grid component
//!
//! Lays the current page out as cards in 1, 2 or 4 columns depending on the
//! terminal width. The grid owns its scroll position and the scroll lock
//! that the detail overlay holds while it is open.

use crate::action::Action;
use crate::component::Component;
use crate::components::text::{truncate_to_width, wrap_text};
use crate::model::scroll_lock::ScrollLock;
use crate::model::{EntryId, GlossaryEntry};
use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows per card: border, reading, term, three definition lines, badge, border
pub const CARD_HEIGHT: u16 = 8;
/// Definition lines shown on a card
pub const DEFINITION_LINES: usize = 3;

/// Column count for a grid of the given width
pub fn columns_for_width(width: u16) -> usize {
    match width {
        0..=79 => 1,
        80..=139 => 2,
        _ => 4,
    }
}

/// Card grid state
pub struct CardGrid {
    cursor: usize,
    scroll_row: usize,
    columns: usize,
    lock: ScrollLock,
    card_areas: Vec<(Rect, EntryId)>,
}

impl Default for CardGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl CardGrid {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            scroll_row: 0,
            columns: 1,
            lock: ScrollLock::new(),
            card_areas: Vec::new(),
        }
    }

    /// Handle to the lock the detail overlay takes on this grid
    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.lock
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Index of the highlighted card, if the page has any
    pub fn selected(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.cursor.min(len - 1))
    }

    /// Back to the top-left card; used whenever the page content changes
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.scroll_row = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Movement (ignored while locked)
    // ─────────────────────────────────────────────────────────────────────────

    fn move_to(&mut self, index: usize, len: usize) -> bool {
        if self.is_locked() || len == 0 {
            return false;
        }
        let index = index.min(len - 1);
        let moved = index != self.cursor;
        self.cursor = index;
        moved
    }

    /// Move the cursor by `delta` cards, clamped to the page
    pub fn move_by(&mut self, delta: isize, len: usize) -> bool {
        let target = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta as usize)
        };
        self.move_to(target, len)
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.move_by(1, len)
    }

    pub fn previous(&mut self, len: usize) -> bool {
        self.move_by(-1, len)
    }

    pub fn down(&mut self, len: usize) -> bool {
        self.move_by(self.columns as isize, len)
    }

    pub fn up(&mut self, len: usize) -> bool {
        self.move_by(-(self.columns as isize), len)
    }

    pub fn first(&mut self, len: usize) -> bool {
        self.move_to(0, len)
    }

    pub fn last(&mut self, len: usize) -> bool {
        self.move_to(len.saturating_sub(1), len)
    }

    /// Wheel scrolling moves whole rows
    pub fn scroll(&mut self, rows: i16, len: usize) -> bool {
        self.move_by(rows as isize * self.columns as isize, len)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_visible(&mut self, visible_rows: usize) {
        let cursor_row = self.cursor / self.columns;
        if cursor_row < self.scroll_row {
            self.scroll_row = cursor_row;
        } else if cursor_row >= self.scroll_row + visible_rows {
            self.scroll_row = cursor_row + 1 - visible_rows;
        }
    }

    /// Render the cards of the current page
    pub fn draw_cards(&mut self, frame: &mut Frame, area: Rect, entries: &[&GlossaryEntry]) {
        self.card_areas.clear();
        self.columns = columns_for_width(area.width);
        if entries.is_empty() || area.height == 0 {
            return;
        }
        self.cursor = self.cursor.min(entries.len() - 1);

        let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
        self.ensure_visible(visible_rows);

        let col_width = area.width / self.columns as u16;
        let first = self.scroll_row * self.columns;
        let last = (first + visible_rows * self.columns).min(entries.len());

        for (index, entry) in entries.iter().enumerate().take(last).skip(first) {
            let row = (index / self.columns - self.scroll_row) as u16;
            let col = (index % self.columns) as u16;
            let y = area.y + row * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(area.y + area.height - y);
            let card_area = Rect::new(area.x + col * col_width, y, col_width, height);

            render_card(frame, card_area, entry, index == self.cursor);
            self.card_areas.push((card_area, entry.id));
        }
    }

    fn card_at(&self, column: u16, row: u16) -> Option<EntryId> {
        self.card_areas
            .iter()
            .find(|(rect, _)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(_, id)| *id)
    }
}

fn render_card(frame: &mut Frame, area: Rect, entry: &GlossaryEntry, highlighted: bool) {
    let border_style = if highlighted {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    let width = inner.width as usize;

    let mut lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&entry.reading, width),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            truncate_to_width(&entry.term, width),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let mut definition = wrap_text(&entry.definition, width, Some(DEFINITION_LINES));
    definition.resize(DEFINITION_LINES, String::new());
    lines.extend(
        definition
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Gray)))),
    );

    if !entry.initial.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("索引: {}", entry.initial),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

impl Component for CardGrid {
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.card_at(mouse.column, mouse.row).map(Action::OpenDetail)
            }
            MouseEventKind::ScrollDown if !self.is_locked() => Some(Action::ScrollGrid(1)),
            MouseEventKind::ScrollUp if !self.is_locked() => Some(Action::ScrollGrid(-1)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_cards(frame, area, &[]);
        Ok(())
    }
}
