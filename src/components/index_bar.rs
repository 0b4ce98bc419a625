//! Index bar component
//!
//! A row of buttons for "show all" and every index symbol. Buttons flow onto
//! as many lines as the width needs; the positions from the last draw are
//! kept for mouse hit testing.

use crate::action::Action;
use crate::component::Component;
use crate::model::IndexSymbol;
use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const SHOW_ALL_LABEL: &str = "すべて";
const BUTTON_GAP: u16 = 1;

/// One clickable button of the index bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexButton {
    ShowAll,
    Symbol(IndexSymbol),
}

impl IndexButton {
    fn label(&self) -> String {
        match self {
            IndexButton::ShowAll => SHOW_ALL_LABEL.to_string(),
            IndexButton::Symbol(symbol) => symbol.label(),
        }
    }

    /// Width including one column of padding on each side
    fn width(&self) -> u16 {
        self.label().width() as u16 + 2
    }

    pub fn action(&self) -> Action {
        match self {
            IndexButton::ShowAll => Action::ShowAll,
            IndexButton::Symbol(symbol) => Action::SelectInitial(*symbol),
        }
    }
}

/// Index bar with a keyboard cursor
pub struct IndexBar {
    buttons: Vec<IndexButton>,
    cursor: usize,
    hit_areas: Vec<(Rect, IndexButton)>,
}

impl Default for IndexBar {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBar {
    pub fn new() -> Self {
        let buttons = std::iter::once(IndexButton::ShowAll)
            .chain(IndexSymbol::all().into_iter().map(IndexButton::Symbol))
            .collect();
        Self {
            buttons,
            cursor: 0,
            hit_areas: Vec::new(),
        }
    }

    pub fn buttons(&self) -> &[IndexButton] {
        &self.buttons
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> IndexButton {
        self.buttons[self.cursor]
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.checked_sub(1).unwrap_or(self.buttons.len() - 1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1) % self.buttons.len();
    }

    /// Put the cursor on the button for `symbol` (or "show all")
    pub fn focus(&mut self, symbol: Option<IndexSymbol>) {
        let target = match symbol {
            Some(symbol) => IndexButton::Symbol(symbol),
            None => IndexButton::ShowAll,
        };
        if let Some(pos) = self.buttons.iter().position(|b| *b == target) {
            self.cursor = pos;
        }
    }

    /// Button positions relative to the bar's inner area, as (x, y, width)
    fn flow(&self, inner_width: u16) -> Vec<(u16, u16, u16)> {
        let mut positions = Vec::with_capacity(self.buttons.len());
        let (mut x, mut y) = (0u16, 0u16);
        for button in &self.buttons {
            let w = button.width();
            if x > 0 && x + w > inner_width {
                x = 0;
                y += 1;
            }
            positions.push((x, y, w));
            x += w + BUTTON_GAP;
        }
        positions
    }

    /// Height the bar needs at `width`, borders included
    pub fn required_height(&self, width: u16) -> u16 {
        let inner_width = width.saturating_sub(2);
        let rows = self
            .flow(inner_width)
            .last()
            .map(|&(_, y, _)| y + 1)
            .unwrap_or(1);
        rows + 2
    }

    /// Render with the selected symbol highlighted
    pub fn draw_with_selection(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        selected: Option<IndexSymbol>,
        focused: bool,
    ) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" 索引 ")
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.hit_areas.clear();
        for (i, (x, y, w)) in self.flow(inner.width).into_iter().enumerate() {
            if y >= inner.height {
                break;
            }
            let button = self.buttons[i];
            let rect = Rect::new(inner.x + x, inner.y + y, w.min(inner.width), 1);

            let is_active = match button {
                IndexButton::ShowAll => selected.is_none(),
                IndexButton::Symbol(symbol) => selected == Some(symbol),
            };
            let mut style = if is_active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            if focused && i == self.cursor {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
            }

            let label = Span::styled(format!(" {} ", button.label()), style);
            frame.render_widget(Paragraph::new(label), rect);
            self.hit_areas.push((rect, button));
        }
    }

    fn button_at(&self, column: u16, row: u16) -> Option<IndexButton> {
        self.hit_areas
            .iter()
            .find(|(rect, _)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(_, button)| *button)
    }
}

impl Component for IndexBar {
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let Some(button) = self.button_at(mouse.column, mouse.row) else {
            return Ok(None);
        };
        if let Some(pos) = self.buttons.iter().position(|b| *b == button) {
            self.cursor = pos;
        }
        Ok(Some(button.action()))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::IndexLeft => self.move_left(),
            Action::IndexRight => self.move_right(),
            Action::IndexActivate => return Ok(Some(self.current().action())),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_selection(frame, area, None, false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_buttons_start_with_show_all() {
        let bar = IndexBar::new();
        assert_eq!(bar.buttons().len(), 46);
        assert_eq!(bar.buttons()[0], IndexButton::ShowAll);
        assert_eq!(bar.buttons()[45], IndexButton::Symbol(IndexSymbol::Latin));
    }

    #[test]
    fn test_cursor_wraps() {
        let mut bar = IndexBar::new();
        bar.move_left();
        assert_eq!(bar.current(), IndexButton::Symbol(IndexSymbol::Latin));
        bar.move_right();
        assert_eq!(bar.current(), IndexButton::ShowAll);
    }

    #[test]
    fn test_activate_returns_selection() {
        let mut bar = IndexBar::new();
        bar.update(Action::IndexRight).unwrap();
        let action = bar.update(Action::IndexActivate).unwrap();
        assert_eq!(action, Some(Action::SelectInitial(IndexSymbol::Kana('あ'))));
    }

    #[test]
    fn test_focus_follows_selection() {
        let mut bar = IndexBar::new();
        bar.focus(Some(IndexSymbol::Kana('か')));
        assert_eq!(bar.current(), IndexButton::Symbol(IndexSymbol::Kana('か')));
        bar.focus(None);
        assert_eq!(bar.cursor(), 0);
    }

    #[test]
    fn test_required_height_grows_when_narrow() {
        let bar = IndexBar::new();
        let wide = bar.required_height(400);
        let narrow = bar.required_height(40);
        assert_eq!(wide, 3);
        assert!(narrow > wide);
    }

    #[test]
    fn test_click_selects_button() {
        let mut bar = IndexBar::new();
        let backend = TestBackend::new(300, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| bar.draw_with_selection(f, f.area(), None, false))
            .unwrap();

        // Inner area starts at (1, 1); " すべて " is 8 wide, then a gap, then " あ "
        let action = bar.handle_mouse_event(click(2, 1)).unwrap();
        assert_eq!(action, Some(Action::ShowAll));

        let action = bar.handle_mouse_event(click(11, 1)).unwrap();
        assert_eq!(action, Some(Action::SelectInitial(IndexSymbol::Kana('あ'))));
        assert_eq!(bar.cursor(), 1);

        assert_eq!(bar.handle_mouse_event(click(0, 0)).unwrap(), None);
    }
}
