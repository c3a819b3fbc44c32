//! Turning clipboard payloads into images
//!
//! Every failure a paste can hit is a [`PasteError`]. The app converts it to
//! an error status and carries on; nothing here is fatal.

use image::DynamicImage;
use std::path::PathBuf;

use crate::clipboard::{ClipboardError, ClipboardPayload};

/// Why a paste produced no saved image
#[derive(Debug, thiserror::Error)]
pub enum PasteError {
    #[error("Clipboard has no image")]
    NoImage,

    #[error("Clipboard content is not an image ({0})")]
    NotAnImage(String),

    #[error("Failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl PasteError {
    /// Empty clipboard and non-image content are expected outcomes, the rest are failures
    pub fn is_expected(&self) -> bool {
        matches!(self, PasteError::NoImage | PasteError::NotAnImage(_))
    }
}

/// Resolve a clipboard payload to a decoded image
///
/// A file list opens its first entry; remaining entries are ignored.
pub fn image_from_payload(payload: ClipboardPayload) -> Result<DynamicImage, PasteError> {
    match payload {
        ClipboardPayload::Empty => Err(PasteError::NoImage),
        ClipboardPayload::Image(image) => Ok(image),
        ClipboardPayload::Files(files) => {
            let Some(first) = files.into_iter().next() else {
                return Err(PasteError::NotAnImage("empty file list".to_string()));
            };
            log::debug!("Opening first clipboard file {:?}", first);
            image::open(&first).map_err(|source| PasteError::Open {
                path: first,
                source,
            })
        }
        ClipboardPayload::Unsupported(kind) => Err(PasteError::NotAnImage(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pasteimg-paste-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_empty_clipboard_is_no_image() {
        let err = image_from_payload(ClipboardPayload::Empty).unwrap_err();
        assert!(matches!(err, PasteError::NoImage));
        assert!(err.is_expected());
        assert_eq!(err.to_string(), "Clipboard has no image");
    }

    #[test]
    fn test_unsupported_content_is_not_an_image() {
        let err = image_from_payload(ClipboardPayload::Unsupported("text/plain".into()))
            .unwrap_err();
        assert!(matches!(err, PasteError::NotAnImage(_)));
        assert!(err.is_expected());
    }

    #[test]
    fn test_empty_file_list_is_not_an_image() {
        let err = image_from_payload(ClipboardPayload::Files(Vec::new())).unwrap_err();
        assert!(matches!(err, PasteError::NotAnImage(_)));
    }

    #[test]
    fn test_image_payload_passes_through() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])));
        let out = image_from_payload(ClipboardPayload::Image(img)).unwrap();
        assert_eq!((out.width(), out.height()), (3, 2));
    }

    #[test]
    fn test_file_list_opens_first_entry() {
        let dir = scratch_dir("first");
        let first = dir.join("first.png");
        let second = dir.join("second.png");
        RgbaImage::from_pixel(7, 5, Rgba([0, 0, 0, 255]))
            .save_with_format(&first, ImageFormat::Png)
            .unwrap();
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]))
            .save_with_format(&second, ImageFormat::Png)
            .unwrap();

        let out = image_from_payload(ClipboardPayload::Files(vec![first, second])).unwrap();
        assert_eq!((out.width(), out.height()), (7, 5));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_non_image_file_is_an_open_error() {
        let dir = scratch_dir("notimage");
        let file = dir.join("notes.txt");
        fs::write(&file, "just some text").unwrap();

        let err = image_from_payload(ClipboardPayload::Files(vec![file.clone()])).unwrap_err();
        match err {
            PasteError::Open { path, .. } => assert_eq!(path, file),
            other => panic!("unexpected error: {other:?}"),
        }

        fs::remove_dir_all(&dir).unwrap();
    }
}
