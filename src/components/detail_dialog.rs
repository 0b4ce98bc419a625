//! Detail overlay for a single glossary entry
//!
//! Drawn over a dimmed glossary screen. Clicking anywhere outside the popup
//! (the backdrop) or on the close button closes it.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::text::wrap_text;
use crate::model::GlossaryEntry;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 72;
const CLOSE_LABEL: &str = " 閉じる ";

/// Detail overlay state
#[derive(Default)]
pub struct DetailDialog {
    pub scroll_offset: usize,
    popup_area: Option<Rect>,
    close_area: Option<Rect>,
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

impl DetailDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget scroll position and hit areas when a new entry is opened
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.popup_area = None;
        self.close_area = None;
    }

    /// Render the overlay for `entry`
    pub fn draw_entry(&mut self, frame: &mut Frame, area: Rect, entry: &GlossaryEntry) {
        // Dim whatever is behind the overlay
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));

        let width = MAX_WIDTH.min(area.width.saturating_sub(4)).max(20);
        let text_width = width.saturating_sub(4) as usize;
        let definition = wrap_text(&entry.definition, text_width, None);

        // Borders, reading, term, separator, definition, blank, footer
        let wanted = definition.len() as u16 + 8;
        let height = wanted.min(area.height.saturating_sub(2)).max(8);
        let popup = centered_popup(area, width, height);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                entry.reading.clone(),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                entry.term.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, chunks[0]);

        let body_area = chunks[1].inner(ratatui::layout::Margin {
            vertical: 0,
            horizontal: 1,
        });
        let max_scroll = definition.len().saturating_sub(body_area.height as usize);
        self.scroll_offset = self.scroll_offset.min(max_scroll);
        let body: Vec<Line> = definition
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::White))))
            .collect();
        frame.render_widget(
            Paragraph::new(body).scroll((self.scroll_offset as u16, 0)),
            body_area,
        );

        let footer = chunks[2];
        if !entry.initial.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" 索引: {}", entry.initial),
                    Style::default().fg(Color::DarkGray),
                )),
                footer,
            );
        }
        let close_width = unicode_width::UnicodeWidthStr::width(CLOSE_LABEL) as u16;
        let close_area = Rect::new(
            footer.x + footer.width.saturating_sub(close_width + 1),
            footer.y,
            close_width.min(footer.width),
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                CLOSE_LABEL,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            close_area,
        );

        self.popup_area = Some(popup);
        self.close_area = Some(close_area);
    }
}

impl Component for DetailDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(Action::CloseDetail),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::DetailScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::DetailScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let on_close = self
                    .close_area
                    .is_some_and(|r| contains(r, mouse.column, mouse.row));
                let on_popup = self
                    .popup_area
                    .is_some_and(|r| contains(r, mouse.column, mouse.row));
                (on_close || !on_popup).then_some(Action::CloseDetail)
            }
            MouseEventKind::ScrollDown => Some(Action::DetailScrollDown),
            MouseEventKind::ScrollUp => Some(Action::DetailScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::DetailScrollDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::DetailScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the entry; see draw_entry
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn sample() -> GlossaryEntry {
        GlossaryEntry {
            id: 1,
            term: "株式".to_string(),
            reading: "かぶしき".to_string(),
            definition: "会社が資金を集めるために発行する証券。".to_string(),
            initial: "か".to_string(),
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn render(dialog: &mut DetailDialog) -> Terminal<TestBackend> {
        let entry = sample();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| dialog.draw_entry(f, f.area(), &entry))
            .unwrap();
        terminal
    }

    #[test]
    fn test_renders_entry_and_close_button() {
        let mut dialog = DetailDialog::new();
        let terminal = render(&mut dialog);
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
            .replace(' ', "");
        assert!(text.contains("かぶしき"));
        assert!(text.contains("株式"));
        assert!(text.contains("閉じる"));
        assert!(text.contains("索引:か"));
    }

    #[test]
    fn test_backdrop_click_closes() {
        let mut dialog = DetailDialog::new();
        render(&mut dialog);
        assert_eq!(
            dialog.handle_mouse_event(click(0, 0)).unwrap(),
            Some(Action::CloseDetail)
        );
    }

    #[test]
    fn test_click_inside_popup_keeps_it_open() {
        let mut dialog = DetailDialog::new();
        render(&mut dialog);
        let popup = dialog.popup_area.unwrap();
        assert_eq!(
            dialog.handle_mouse_event(click(popup.x + 2, popup.y + 1)).unwrap(),
            None
        );
    }

    #[test]
    fn test_close_button_click_closes() {
        let mut dialog = DetailDialog::new();
        render(&mut dialog);
        let close = dialog.close_area.unwrap();
        assert_eq!(
            dialog.handle_mouse_event(click(close.x + 1, close.y)).unwrap(),
            Some(Action::CloseDetail)
        );
    }

    #[test]
    fn test_keys() {
        let mut dialog = DetailDialog::new();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseDetail)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::CloseDetail)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Down)).unwrap(),
            Some(Action::DetailScrollDown)
        );
    }

    #[test]
    fn test_scroll_is_clamped_on_draw() {
        let mut dialog = DetailDialog::new();
        for _ in 0..50 {
            dialog.update(Action::DetailScrollDown).unwrap();
        }
        render(&mut dialog);
        assert_eq!(dialog.scroll_offset, 0);
    }
}
