use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    /// Instruction text (left) and status line (right)
    pub header: Rect,
    /// Scrollable preview list
    pub list: Rect,
    /// One column to the right of the list, reserved for the scrollbar
    pub scrollbar: Rect,
    /// Keyboard hints bar
    pub hints: Rect,
}

/// Create main application layout: header, preview list with scrollbar, keyboard hints
pub fn create_main_layout(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Spacing below header
            Constraint::Min(3),    // Preview list
            Constraint::Length(1), // Keyboard hints bar
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1), // Left margin
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Right margin
        ])
        .split(rows[0])[1];

    // The scrollbar column is always reserved so the list never shifts sideways
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1), // Left margin
            Constraint::Min(10),   // List
            Constraint::Length(1), // Scrollbar
            Constraint::Length(1), // Right margin
        ])
        .split(rows[2]);

    MainLayout {
        header,
        list: content[1],
        scrollbar: content[2],
        hints: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_layout() {
        let layout = create_main_layout(Rect::new(0, 0, 80, 40));
        assert_eq!(layout.header, Rect::new(1, 0, 78, 1));
        assert_eq!(layout.list, Rect::new(1, 2, 77, 37));
        assert_eq!(layout.scrollbar, Rect::new(78, 2, 1, 37));
        assert_eq!(layout.hints, Rect::new(0, 39, 80, 1));
    }
}
