//! Home component - Main glossary screen
//!
//! Search box, index bar, result count with pagination, the card grid and
//! the footer. Owns focus and the child components' presentation state;
//! the query itself lives in the App's domain state.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::components::card_grid::CardGrid;
use crate::components::index_bar::IndexBar;
use crate::components::text::format_count;
use crate::model::engine::{ResultSet, PAGE_SIZE};
use crate::model::ui::Focus;
use crate::model::QueryState;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PLACEHOLDER: &str = "調べたい用語を入力...";
const EMPTY_TITLE: &str = "見つかりませんでした";
const EMPTY_HINT: &str = "キーワードを変えてもう一度お試しください。";
const DISCLAIMER: &str =
    "※本用語集は一般的な解説を目的としており、特定の投資を勧誘するものではありません。";

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Home component for the main glossary view
pub struct HomeComponent {
    /// Whether key presses go to the search box
    pub search_mode: bool,

    /// Which part of the screen gets navigation keys
    pub focus: Focus,

    pub index_bar: IndexBar,

    pub grid: CardGrid,

    /// Pagination buttons drawn in the last frame, for mouse clicks
    page_buttons: Vec<(Rect, Action)>,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            search_mode: false,
            focus: Focus::default(),
            index_bar: IndexBar::new(),
            grid: CardGrid::new(),
            page_buttons: Vec::new(),
        }
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    fn page_button_at(&self, column: u16, row: u16) -> Option<Action> {
        self.page_buttons
            .iter()
            .find(|(rect, _)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(_, action)| action.clone())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Search
            KeyCode::Char('/') => Some(Action::EnterSearchMode),

            // Paging
            KeyCode::Char('n') | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('p') | KeyCode::PageUp => Some(Action::PrevPage),

            // Filters
            KeyCode::Char('a') => Some(Action::ShowAll),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleFocus),

            // Dialogs
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => match self.focus {
                Focus::Index => match key.code {
                    KeyCode::Char('h') | KeyCode::Left => Some(Action::IndexLeft),
                    KeyCode::Char('l') | KeyCode::Right => Some(Action::IndexRight),
                    KeyCode::Enter | KeyCode::Char(' ') => Some(Action::IndexActivate),
                    KeyCode::Char('j') | KeyCode::Down => Some(Action::ToggleFocus),
                    _ => None,
                },
                Focus::Cards => match key.code {
                    KeyCode::Char('l') | KeyCode::Right => Some(Action::NextCard),
                    KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevCard),
                    KeyCode::Char('j') | KeyCode::Down => Some(Action::CardDown),
                    KeyCode::Char('k') | KeyCode::Up => Some(Action::CardUp),
                    KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstCard),
                    KeyCode::Char('G') | KeyCode::End => Some(Action::LastCard),
                    KeyCode::Enter => Some(Action::OpenSelected),
                    _ => None,
                },
            },
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            if let Some(action) = self.page_button_at(mouse.column, mouse.row) {
                return Ok(Some(action));
            }
            if let Some(action) = self.index_bar.handle_mouse_event(mouse)? {
                self.focus = Focus::Index;
                return Ok(Some(action));
            }
        }
        let action = self.grid.handle_mouse_event(mouse)?;
        if matches!(action, Some(Action::OpenDetail(_))) {
            self.focus = Focus::Cards;
        }
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EnterSearchMode => self.enter_search_mode(),
            Action::ExitSearchMode => self.exit_search_mode(),
            Action::ToggleFocus => self.toggle_focus(),
            Action::IndexLeft | Action::IndexRight | Action::IndexActivate => {
                return self.index_bar.update(action);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub query: &'a QueryState,
    pub results: &'a ResultSet<'a>,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let index_height = home.index_bar.required_height(area.width);
    let layout = calculate_main_layout(area, index_height, ctx.results.total_pages() > 1);

    render_search_bar(frame, layout.search, home, ctx.query);

    let index_focused = home.focus == Focus::Index && !home.search_mode;
    home.index_bar.draw_with_selection(
        frame,
        layout.index,
        ctx.query.selected_initial(),
        index_focused,
    );

    home.page_buttons.clear();
    render_results_header(frame, layout.header, home, ctx.results);

    if ctx.results.is_empty() {
        render_empty_state(frame, layout.grid);
        home.grid.draw_cards(frame, layout.grid, &[]);
    } else {
        home.grid.draw_cards(frame, layout.grid, ctx.results.visible());
    }

    if let Some(pagination_area) = layout.pagination {
        render_pagination(frame, pagination_area, home, ctx.results);
    }

    render_footer(frame, layout.footer, ctx);
    render_help_bar(frame, layout.help, home);

    Ok(())
}

fn render_search_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, query: &QueryState) {
    let border_color = if home.search_mode {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let mut spans = vec![Span::styled(" › ", Style::default().fg(Color::DarkGray))];
    if query.search_text().is_empty() {
        spans.push(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(
            query.search_text().to_string(),
            Style::default().fg(Color::White),
        ));
    }
    if home.search_mode {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 検索 ")
        .border_style(Style::default().fg(border_color));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw a pagination button, remembering it for clicks when enabled
fn render_page_button(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    label: &str,
    action: Action,
    enabled: bool,
) {
    let style = if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(Paragraph::new(Span::styled(label.to_string(), style)), area);
    if enabled {
        home.page_buttons.push((area, action));
    }
}

fn render_results_header(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    results: &ResultSet,
) {
    let total_pages = results.total_pages();
    let mut spans = vec![Span::styled(
        format!(" 検索結果: {} 件", format_count(results.len())),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if total_pages > 1 {
        spans.push(Span::styled(
            format!("  {} / {} ページ", results.page(), total_pages),
            Style::default().fg(Color::Cyan),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if total_pages > 1 {
        let prev = " 前へ ";
        let next = " 次へ ";
        let prev_width = prev.width() as u16;
        let next_width = next.width() as u16;
        let right = area.x + area.width;
        let next_area = Rect::new(right.saturating_sub(next_width + 1), area.y, next_width, 1);
        let prev_area = Rect::new(next_area.x.saturating_sub(prev_width + 1), area.y, prev_width, 1);

        render_page_button(frame, prev_area, home, prev, Action::PrevPage, results.has_prev());
        render_page_button(frame, next_area, home, next, Action::NextPage, results.has_next());
    }
}

fn render_pagination(frame: &mut Frame, area: Rect, home: &mut HomeComponent, results: &ResultSet) {
    let prev = format!(" 前の{}件 ", PAGE_SIZE);
    let next = format!(" 次の{}件 ", PAGE_SIZE);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(prev.width() as u16 + 1),
            Constraint::Min(0),
            Constraint::Length(next.width() as u16 + 1),
        ])
        .split(area);

    let prev_area = Rect::new(chunks[0].x + 1, area.y, chunks[0].width.saturating_sub(1), 1);
    let next_area = Rect::new(chunks[2].x, area.y, chunks[2].width.saturating_sub(1), 1);
    render_page_button(frame, prev_area, home, &prev, Action::PrevPage, results.has_prev());
    render_page_button(frame, next_area, home, &next, Action::NextPage, results.has_next());

    if let Some((start, end)) = results.display_range() {
        let summary = format!(
            "{} 件中 {} 〜 {} 件を表示",
            format_count(results.len()),
            format_count(start),
            format_count(end)
        );
        frame.render_widget(
            Paragraph::new(Span::styled(summary, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center),
            chunks[1],
        );
    }
}

fn render_empty_state(frame: &mut Frame, area: Rect) {
    let top = area.height.saturating_sub(3) / 2;
    let content_area = Rect::new(area.x, area.y + top, area.width, area.height.min(3));
    let lines = vec![
        Line::from(Span::styled(
            EMPTY_TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(EMPTY_HINT, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content_area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let span = if let Some(error) = ctx.error {
        Span::styled(format!(" Error: {} ", error), Style::default().fg(Color::Red))
    } else if let Some(status) = ctx.status_message {
        Span::styled(format!(" {} ", status), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(format!(" {}", DISCLAIMER), Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(Line::from(span)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let help_spans = if home.search_mode {
        vec![
            key(" Esc/Enter ", Color::Yellow),
            Span::raw("Done  "),
            key(" Ctrl+u ", Color::Red),
            Span::raw("Clear"),
        ]
    } else {
        vec![
            key(" q ", Color::Yellow),
            Span::raw("Quit "),
            key(" / ", Color::Cyan),
            Span::raw("Search "),
            key(" Tab ", Color::Cyan),
            Span::raw("Index/Cards "),
            key(" Enter ", Color::Green),
            Span::raw("Open "),
            key(" n/p ", Color::Magenta),
            Span::raw("Page "),
            key(" a ", Color::Magenta),
            Span::raw("All "),
            key(" ? ", Color::White),
            Span::raw("Help"),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}
