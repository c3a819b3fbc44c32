use image::DynamicImage;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

/// Font size assumed when the terminal does not report one
const FALLBACK_FONT_SIZE: (u16, u16) = (8, 16);

/// Image protocol handler for ratatui-based rendering
/// Uses ratatui-image library which integrates properly with ratatui's rendering
pub struct ImageProtocol {
    /// Protocol picker that auto-detects terminal capabilities
    picker: Picker,
}

impl ImageProtocol {
    /// Query the terminal for its graphics protocol and cell size
    /// (Kitty, Sixel, iTerm2, or Halfblocks fallback)
    ///
    /// Must run after the terminal has been switched to raw mode.
    pub fn from_terminal() -> Self {
        let picker = Picker::from_query_stdio().unwrap_or_else(|e| {
            log::debug!("Terminal graphics query failed, using halfblocks: {}", e);
            Picker::from_fontsize(FALLBACK_FONT_SIZE)
        });
        log::debug!("Terminal font size {:?}", picker.font_size());
        ImageProtocol { picker }
    }

    /// Halfblocks protocol with a fixed cell size, no terminal query
    pub fn with_font_size(font_size: (u16, u16)) -> Self {
        ImageProtocol {
            picker: Picker::from_fontsize(font_size),
        }
    }

    /// Terminal cell size in pixels (width, height)
    pub fn font_size(&self) -> (u16, u16) {
        self.picker.font_size()
    }

    /// Number of terminal cells (columns, rows) covering `width` x `height` pixels
    pub fn cells_for(&self, width: u32, height: u32) -> (u16, u16) {
        let (font_w, font_h) = self.font_size();
        let cols = width.div_ceil(u32::from(font_w.max(1)));
        let rows = height.div_ceil(u32::from(font_h.max(1)));
        (
            cols.clamp(1, u32::from(u16::MAX)) as u16,
            rows.clamp(1, u32::from(u16::MAX)) as u16,
        )
    }

    /// Wrap an already-scaled thumbnail for rendering
    pub fn new_thumbnail(&mut self, thumbnail: DynamicImage) -> StatefulProtocol {
        self.picker.new_resize_protocol(thumbnail)
    }
}
