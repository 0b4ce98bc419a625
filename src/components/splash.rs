//! Splash screen component
//!
//! Shows the glossary title and tagline briefly before the main screen.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const TITLE: &str = "投資部 用語集";
const TAGLINE: &str = "講義でわからない投資用語をすぐに調べられます。";

/// Splash screen component
pub struct SplashComponent {
    /// When the splash screen was shown
    start_time: Option<Instant>,
    /// Duration to show splash before auto-advancing
    duration: Duration,
    /// Number of entries, shown under the tagline
    entry_count: usize,
}

impl Default for SplashComponent {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SplashComponent {
    pub fn new(entry_count: usize) -> Self {
        Self {
            start_time: None,
            duration: Duration::from_millis(1200),
            entry_count,
        }
    }

    /// Check if splash duration has elapsed
    pub fn is_complete(&self) -> bool {
        self.start_time
            .map(|t| t.elapsed() >= self.duration)
            .unwrap_or(false)
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Any key press skips the splash screen
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.is_complete() {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let bg = Color::Rgb(12, 24, 48);

        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(area.height.saturating_sub(5) / 2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let centered = |text: Line<'static>| Paragraph::new(text).alignment(Alignment::Center);

        frame.render_widget(
            centered(Line::from(Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::White)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ))),
            chunks[1],
        );
        frame.render_widget(
            centered(Line::from(Span::styled(
                TAGLINE,
                Style::default().fg(Color::Cyan).bg(bg),
            ))),
            chunks[3],
        );
        frame.render_widget(
            centered(Line::from(Span::styled(
                format!("{} 語収録", self.entry_count),
                Style::default().fg(Color::DarkGray).bg(bg),
            ))),
            chunks[5],
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_any_key_skips() {
        let mut splash = SplashComponent::new(3);
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(
            splash.handle_key_event(key).unwrap(),
            Some(Action::SplashComplete)
        );
    }

    #[test]
    fn test_not_complete_before_init() {
        let mut splash = SplashComponent::new(3);
        assert!(!splash.is_complete());
        assert_eq!(splash.update(Action::Tick).unwrap(), None);
    }
}
