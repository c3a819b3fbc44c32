use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::Theme;

/// Where the tooltip for `anchor` goes: just below it, nudged right,
/// flipped above when there is no room below, always inside `frame_area`
pub fn tooltip_area(frame_area: Rect, anchor: Rect, text: &str) -> Rect {
    // Border plus one column of padding on each side
    let chrome = 4;
    let max_width = frame_area.width.max(chrome + 1);
    let width = (text.width() as u16).saturating_add(chrome).min(max_width);
    let inner = width.saturating_sub(chrome).max(1);
    let lines = (text.width() as u16).div_ceil(inner).max(1);
    let height = (lines + 2).min(frame_area.height);

    let mut x = anchor.x.saturating_add(1);
    if x + width > frame_area.right() {
        x = frame_area.right().saturating_sub(width);
    }

    let below = anchor.bottom();
    let y = if below + height <= frame_area.bottom() {
        below
    } else {
        anchor.y.saturating_sub(height).max(frame_area.y)
    };

    Rect::new(x.max(frame_area.x), y, width, height)
}

/// Render a floating tooltip with the full `text` below `anchor`
pub fn render_tooltip(frame: &mut Frame, anchor: Rect, text: &str, theme: &Theme) {
    let area = tooltip_area(frame.area(), anchor, text);

    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.tooltip_border)
                .style(theme.tooltip)
                .padding(Padding::horizontal(1)),
        )
        .style(theme.tooltip)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
