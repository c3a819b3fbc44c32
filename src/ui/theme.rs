use ratatui::prelude::*;
use std::str::FromStr;

use crate::storage::ColorConfig;

/// Theme errors
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Invalid color for {field}: {value:?} (expected #rrggbb or a color name)")]
    InvalidColor { field: &'static str, value: String },
}

/// Runtime theme with direct field access for all UI elements
#[derive(Debug, Clone)]
pub struct Theme {
    // === Default Colors ===
    pub default_fg: Color,
    pub default_bg: Color,

    // === Header ===
    pub header_text: Style,
    pub status_info: Style,
    pub status_error: Style,

    // === Preview List ===
    pub placeholder: Style,
    pub path_label: Style,
    pub path_label_hovered: Style,
    pub scrollbar: Style,

    // === Tooltip ===
    pub tooltip: Style,
    pub tooltip_border: Style,

    // === Keyboard Hints ===
    pub status_key: Style,
    pub status_desc: Style,
    pub status_bar_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Palette every style is derived from
struct Palette {
    background: Color,
    foreground: Color,
    path_bg: Color,
    path_fg: Color,
    path_hover_bg: Color,
    info: Color,
    error: Color,
    tooltip_bg: Color,
    tooltip_fg: Color,
}

impl Palette {
    fn dark() -> Self {
        Palette {
            background: Color::Rgb(0x2d, 0x2d, 0x2d),
            foreground: Color::Rgb(0xff, 0xff, 0xff),
            path_bg: Color::Rgb(0x3d, 0x3d, 0x3d),
            path_fg: Color::Rgb(0xa0, 0xc4, 0xff),
            path_hover_bg: Color::Rgb(0x4d, 0x4d, 0x4d),
            info: Color::Rgb(0x69, 0xdb, 0x7c),
            error: Color::Rgb(0xff, 0x6b, 0x6b),
            tooltip_bg: Color::Rgb(0xff, 0xff, 0xe0),
            tooltip_fg: Color::Rgb(0x00, 0x00, 0x00),
        }
    }

    fn into_theme(self) -> Theme {
        let dim = Color::Rgb(0xa0, 0xa0, 0xa0);
        Theme {
            default_fg: self.foreground,
            default_bg: self.background,

            header_text: Style::default()
                .fg(self.foreground)
                .add_modifier(Modifier::BOLD),
            status_info: Style::default().fg(self.info),
            status_error: Style::default().fg(self.error),

            placeholder: Style::default().fg(dim),
            path_label: Style::default().fg(self.path_fg).bg(self.path_bg),
            path_label_hovered: Style::default().fg(self.path_fg).bg(self.path_hover_bg),
            scrollbar: Style::default().fg(self.path_hover_bg),

            tooltip: Style::default().fg(self.tooltip_fg).bg(self.tooltip_bg),
            tooltip_border: Style::default().fg(self.tooltip_fg).bg(self.tooltip_bg),

            status_key: Style::default()
                .fg(self.foreground)
                .add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(dim),
            status_bar_bg: self.path_bg,
        }
    }
}

fn override_color(
    slot: &mut Color,
    field: &'static str,
    value: &Option<String>,
) -> Result<(), ThemeError> {
    if let Some(value) = value {
        *slot = Color::from_str(value.trim()).map_err(|_| ThemeError::InvalidColor {
            field,
            value: value.clone(),
        })?;
    }
    Ok(())
}

impl Theme {
    /// Built-in dark theme
    pub fn dark() -> Self {
        Palette::dark().into_theme()
    }

    /// Dark theme with any colors from the `[colors]` config section applied
    pub fn from_config(colors: &ColorConfig) -> Result<Self, ThemeError> {
        let mut palette = Palette::dark();
        override_color(&mut palette.background, "background", &colors.background)?;
        override_color(&mut palette.foreground, "foreground", &colors.foreground)?;
        override_color(&mut palette.path_bg, "path_bg", &colors.path_bg)?;
        override_color(&mut palette.path_fg, "path_fg", &colors.path_fg)?;
        override_color(&mut palette.path_hover_bg, "path_hover_bg", &colors.path_hover_bg)?;
        override_color(&mut palette.info, "info", &colors.info)?;
        override_color(&mut palette.error, "error", &colors.error)?;
        override_color(&mut palette.tooltip_bg, "tooltip_bg", &colors.tooltip_bg)?;
        override_color(&mut palette.tooltip_fg, "tooltip_fg", &colors.tooltip_fg)?;
        Ok(palette.into_theme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let theme = Theme::default();
        assert_eq!(theme.default_bg, Color::Rgb(0x2d, 0x2d, 0x2d));
        assert_eq!(theme.path_label.bg, Some(Color::Rgb(0x3d, 0x3d, 0x3d)));
        assert_eq!(theme.path_label_hovered.bg, Some(Color::Rgb(0x4d, 0x4d, 0x4d)));
        assert_eq!(theme.status_error.fg, Some(Color::Rgb(0xff, 0x6b, 0x6b)));
    }

    #[test]
    fn test_color_overrides() {
        let colors = ColorConfig {
            info: Some("#112233".to_string()),
            tooltip_bg: Some("white".to_string()),
            ..ColorConfig::default()
        };
        let theme = Theme::from_config(&colors).unwrap();
        assert_eq!(theme.status_info.fg, Some(Color::Rgb(0x11, 0x22, 0x33)));
        assert_eq!(theme.tooltip.bg, Some(Color::White));
        // Untouched entries keep the dark palette
        assert_eq!(theme.status_error.fg, Some(Color::Rgb(0xff, 0x6b, 0x6b)));
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let colors = ColorConfig {
            error: Some("#zzzzzz".to_string()),
            ..ColorConfig::default()
        };
        let err = Theme::from_config(&colors).unwrap_err();
        assert!(err.to_string().contains("error"));
    }
}
