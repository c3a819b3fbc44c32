use image::DynamicImage;
use std::path::PathBuf;

/// Clipboard backend failures
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("{command} failed: {message}")]
    Command { command: &'static str, message: String },

    #[error("Clipboard image has an invalid {width}x{height} buffer")]
    InvalidImage { width: usize, height: usize },

    #[error("Failed to decode clipboard image: {0}")]
    Decode(#[from] image::ImageError),
}

/// What the clipboard currently holds, as far as pasting images goes
#[derive(Debug)]
pub enum ClipboardPayload {
    /// Nothing image-like (nothing at all, or plain text)
    Empty,
    /// A bitmap image
    Image(DynamicImage),
    /// File references, e.g. files copied in a file manager
    Files(Vec<PathBuf>),
    /// Some other content; the string names what it was
    Unsupported(String),
}

/// Trait for clipboard backend abstraction
/// Supports different clipboard systems (arboard, Wayland wl-clipboard)
pub trait ClipboardBackend {
    /// Read the current clipboard content
    fn read(&mut self) -> Result<ClipboardPayload, ClipboardError>;

    /// Write text to clipboard
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Get the backend name (for logging/debugging)
    fn name(&self) -> &'static str;
}
