use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use crate::app::{Status, StatusLevel};

const INSTRUCTION: &str = "Press Ctrl+V to paste an image";

const HINTS: &[(&[&str], &str)] = &[
    (&["Ctrl-V"], "paste"),
    (&["click"], "copy path"),
    (&["j", "k"], "scroll"),
    (&["PgUp", "PgDn"], "page"),
    (&["q"], "quit"),
];

/// Render the header: instruction on the left, latest status on the right
pub fn render_header(frame: &mut Frame, area: Rect, status: Option<&Status>, theme: &Theme) {
    let instruction = Paragraph::new(Span::styled(INSTRUCTION, theme.header_text));
    frame.render_widget(instruction, area);

    if let Some(status) = status {
        let style = match status.level {
            StatusLevel::Info => theme.status_info,
            StatusLevel::Error => theme.status_error,
        };
        let message = Paragraph::new(Line::from(Span::styled(status.message.as_str(), style)))
            .alignment(Alignment::Right);
        frame.render_widget(message, area);
    }
}

/// Render keyboard hints bar
pub fn render_keyboard_hints(frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut hints = vec![Span::raw(" ")];

    for (keys, description) in HINTS {
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                hints.push(Span::styled("/", theme.status_desc.add_modifier(Modifier::DIM)));
            }
            hints.push(Span::styled(*key, theme.status_key));
        }

        hints.push(Span::raw(" "));
        hints.push(Span::styled(*description, theme.status_desc));
        hints.push(Span::raw("  "));
    }

    let paragraph =
        Paragraph::new(Line::from(hints)).style(theme.status_desc.bg(theme.status_bar_bg));

    frame.render_widget(paragraph, area);
}
