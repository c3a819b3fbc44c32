use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui_image::StatefulImage;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::Theme;
use crate::app::PreviewRow;

const PLACEHOLDER: &str = "Pasted images will be previewed here";

/// Lines a row takes besides its thumbnail: gap, path label, gap
pub const ROW_CHROME_LINES: usize = 3;

/// Screen placement of one (at least partly) visible row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSlot {
    pub index: usize,
    /// Present only when the whole thumbnail is on screen
    pub thumbnail: Option<Rect>,
    pub label: Option<Rect>,
}

/// Total height of a row with a thumbnail `thumb_rows` lines tall
pub fn row_height(thumb_rows: u16) -> usize {
    usize::from(thumb_rows) + ROW_CHROME_LINES
}

/// Place rows inside `area` with the list scrolled down by `offset` lines
///
/// `sizes` holds each row's thumbnail size in cells (columns, rows).
pub fn layout_rows(area: Rect, sizes: &[(u16, u16)], offset: usize) -> Vec<RowSlot> {
    let view_top = offset;
    let view_bottom = offset + usize::from(area.height);
    let screen_y = |content_y: usize| area.y + (content_y - view_top) as u16;

    let mut slots = Vec::new();
    let mut top = 0usize;

    for (index, &(cols, rows)) in sizes.iter().enumerate() {
        let height = row_height(rows);
        if top >= view_bottom {
            break;
        }
        if top + height <= view_top {
            top += height;
            continue;
        }

        let thumbnail = (top >= view_top && top + usize::from(rows) <= view_bottom).then(|| {
            let width = cols.min(area.width);
            Rect::new(
                area.x + (area.width - width) / 2,
                screen_y(top),
                width,
                rows,
            )
        });

        let label_y = top + usize::from(rows) + 1;
        let label = (label_y >= view_top && label_y < view_bottom)
            .then(|| Rect::new(area.x, screen_y(label_y), area.width, 1));

        if thumbnail.is_some() || label.is_some() {
            slots.push(RowSlot {
                index,
                thumbnail,
                label,
            });
        }
        top += height;
    }

    slots
}

/// Shorten `text` to `max_width` columns, keeping the end (the file name) visible
pub fn truncate_start(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1; // room for the ellipsis
    let mut kept = Vec::new();
    let mut used = 0;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(c);
    }

    let mut out = String::from("…");
    out.extend(kept.into_iter().rev());
    out
}

/// Render placeholder shown until the first image is pasted
pub fn render_placeholder(frame: &mut Frame, area: Rect, theme: &Theme) {
    // Roughly a third of the way down, like the empty-state label it replaces
    let y = area.y + area.height / 3;
    let line_area = Rect::new(area.x, y, area.width, 1).intersection(area);
    let paragraph = Paragraph::new(Span::styled(PLACEHOLDER, theme.placeholder))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, line_area);
}

/// Render the visible rows: thumbnail, then path label
pub fn render_preview_list(
    frame: &mut Frame,
    slots: &[RowSlot],
    rows: &mut [PreviewRow],
    hovered: Option<usize>,
    theme: &Theme,
) {
    for slot in slots {
        let Some(row) = rows.get_mut(slot.index) else {
            continue;
        };

        if let Some(area) = slot.thumbnail {
            let image = StatefulImage::new(None);
            frame.render_stateful_widget(image, area, row.thumbnail_mut());
        }

        if let Some(area) = slot.label {
            let style = if hovered == Some(slot.index) {
                theme.path_label_hovered
            } else {
                theme.path_label
            };
            // One column of padding on each side
            let text = truncate_start(&row.label, usize::from(area.width.saturating_sub(2)));
            let paragraph = Paragraph::new(Line::from(vec![Span::raw(" "), Span::raw(text)]))
                .style(style);
            frame.render_widget(paragraph, area);
        }
    }
}

/// Render the vertical scrollbar when the content is taller than the list
pub fn render_scrollbar(
    frame: &mut Frame,
    area: Rect,
    content_height: usize,
    offset: usize,
    theme: &Theme,
) {
    let viewport = usize::from(area.height);
    if content_height <= viewport {
        return;
    }

    let mut state = ScrollbarState::new(content_height - viewport)
        .position(offset)
        .viewport_content_length(viewport);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .style(theme.scrollbar);

    frame.render_stateful_widget(scrollbar, area, &mut state);
}
