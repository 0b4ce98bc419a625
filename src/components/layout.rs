//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub search: Rect,
    pub index: Rect,
    pub header: Rect,
    pub grid: Rect,
    pub pagination: Option<Rect>,
    pub footer: Rect,
    pub help: Rect,
}

/// Calculate centered popup area inside `area`
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let popup_x = area.x + (area.width - width) / 2;
    let popup_y = area.y + (area.height - height) / 2;

    Rect::new(popup_x, popup_y, width, height)
}

/// Calculate main screen layout
///
/// `index_height` comes from the index bar's flow layout for this width.
/// The bottom pagination row only exists when there is more than one page.
pub fn calculate_main_layout(area: Rect, index_height: u16, show_pagination: bool) -> MainLayout {
    let pagination_height = if show_pagination { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(index_height),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(pagination_height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        search: chunks[0],
        index: chunks[1],
        header: chunks[2],
        grid: chunks[3],
        pagination: show_pagination.then_some(chunks[4]),
        footer: chunks[5],
        help: chunks[6],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_respects_offset() {
        let area = Rect::new(10, 5, 40, 20);
        let popup = centered_popup(area, 20, 10);
        assert_eq!(popup, Rect::new(20, 10, 20, 10));
    }

    #[test]
    fn test_centered_popup_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered_popup(area, 60, 20);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_main_layout_without_pagination() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 40), 5, false);
        assert!(layout.pagination.is_none());
        assert_eq!(layout.search.height, 3);
        assert_eq!(layout.index.height, 5);
        assert_eq!(layout.grid.height, 40 - 3 - 5 - 1 - 1 - 1);
    }

    #[test]
    fn test_main_layout_with_pagination() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 40), 5, true);
        let pagination = layout.pagination.expect("pagination row");
        assert_eq!(pagination.height, 1);
        assert_eq!(pagination.y, layout.grid.y + layout.grid.height);
    }
}
