use std::path::PathBuf;

/// An image that was pasted and written to the session directory
///
/// Created once per successful paste and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// 1-based sequence number within the session
    pub number: u32,
    /// Absolute path of the PNG file
    pub path: PathBuf,
    /// Original pixel width (before thumbnail scaling)
    pub width: u32,
    /// Original pixel height (before thumbnail scaling)
    pub height: u32,
}

impl SavedImage {
    /// File name for the given sequence number: `image_001.png`, `image_002.png`, ...
    pub fn file_name(number: u32) -> String {
        format!("image_{:03}.png", number)
    }

    /// Path as display/clipboard text
    pub fn path_text(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_zero_padded() {
        assert_eq!(SavedImage::file_name(1), "image_001.png");
        assert_eq!(SavedImage::file_name(42), "image_042.png");
        assert_eq!(SavedImage::file_name(999), "image_999.png");
        // Padding is a minimum width, larger numbers keep all digits
        assert_eq!(SavedImage::file_name(1234), "image_1234.png");
    }

    #[test]
    fn test_path_text() {
        let saved = SavedImage {
            number: 3,
            path: PathBuf::from("/tmp/pasteimg/image_003.png"),
            width: 10,
            height: 20,
        };
        assert_eq!(saved.path_text(), "/tmp/pasteimg/image_003.png");
    }
}
