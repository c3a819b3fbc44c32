use arboard::Clipboard;
use image::{DynamicImage, RgbaImage};

use super::backend::{ClipboardBackend, ClipboardError, ClipboardPayload};

/// Cross-platform clipboard backend built on arboard
///
/// The `Clipboard` handle is kept for the whole session: on X11 the copied
/// text is served by this handle, so dropping it would drop the selection.
pub struct ArboardBackend {
    clipboard: Clipboard,
}

impl ArboardBackend {
    pub fn new() -> Result<Self, ClipboardError> {
        let clipboard =
            Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        log::debug!("ArboardBackend initialized successfully");
        Ok(ArboardBackend { clipboard })
    }
}

impl ClipboardBackend for ArboardBackend {
    fn read(&mut self) -> Result<ClipboardPayload, ClipboardError> {
        match self.clipboard.get_image() {
            Ok(data) => {
                let (width, height) = (data.width, data.height);
                let rgba = RgbaImage::from_raw(width as u32, height as u32, data.bytes.into_owned())
                    .ok_or(ClipboardError::InvalidImage { width, height })?;
                log::debug!("Read {}x{} image from clipboard", width, height);
                return Ok(ClipboardPayload::Image(DynamicImage::ImageRgba8(rgba)));
            }
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(e) => return Err(ClipboardError::Unavailable(e.to_string())),
        }

        match self.clipboard.get().file_list() {
            Ok(files) if !files.is_empty() => {
                log::debug!("Read {} file reference(s) from clipboard", files.len());
                return Ok(ClipboardPayload::Files(files));
            }
            Ok(_) => return Ok(ClipboardPayload::Unsupported("empty file list".to_string())),
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(e) => log::debug!("Clipboard file list unavailable: {}", e),
        }

        // Text on its own is not an image; report it the same way as nothing at all
        match self.clipboard.get_text() {
            Ok(text) => log::debug!("Clipboard holds {} bytes of text, no image", text.len()),
            Err(e) => log::debug!("Clipboard has no text either: {}", e),
        }
        Ok(ClipboardPayload::Empty)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        log::debug!("Wrote {} bytes text to clipboard", text.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "arboard"
    }
}
