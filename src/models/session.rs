use image::{DynamicImage, ImageFormat};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::SavedImage;
use crate::paste::PasteError;

/// Images saved during one run of the program
///
/// Owns the save directory, the sequence counter and the saved images in
/// paste order. Only the UI thread touches it.
#[derive(Debug)]
pub struct Session {
    dir: PathBuf,
    /// Number of the last successfully saved image (0 = none yet)
    counter: u32,
    saved: Vec<SavedImage>,
}

impl Session {
    /// Start a session saving into `dir` (which must already exist)
    pub fn new(dir: PathBuf) -> io::Result<Self> {
        let dir = std::path::absolute(&dir)?;
        Ok(Session {
            dir,
            counter: 0,
            saved: Vec::new(),
        })
    }

    /// Encode `image` as PNG into the next `image_NNN.png`
    ///
    /// The counter only advances once the file is written, so failed saves
    /// never leave gaps in the numbering.
    pub fn save(&mut self, image: &DynamicImage) -> Result<SavedImage, PasteError> {
        let number = self.counter + 1;
        let path = self.dir.join(SavedImage::file_name(number));

        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| PasteError::Save {
                path: path.clone(),
                source,
            })?;

        self.counter = number;
        let saved = SavedImage {
            number,
            path,
            width: image.width(),
            height: image.height(),
        };
        self.saved.push(saved.clone());

        log::debug!(
            "Saved image {} ({}x{}) to {:?}",
            number,
            saved.width,
            saved.height,
            saved.path
        );
        Ok(saved)
    }

    /// Delete every saved file
    ///
    /// Files that are already gone are fine. Other failures are logged and
    /// skipped. Returns the number of files actually removed.
    pub fn cleanup(&self) -> usize {
        let mut removed = 0;
        for image in &self.saved {
            match fs::remove_file(&image.path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("Failed to delete {:?}: {}", image.path, e),
            }
        }
        log::debug!(
            "Cleanup removed {} of {} saved files",
            removed,
            self.saved.len()
        );
        removed
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of images saved so far
    pub fn count(&self) -> u32 {
        self.counter
    }

    /// Saved images in paste order
    pub fn saved(&self) -> &[SavedImage] {
        &self.saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn session_in(name: &str) -> Session {
        let dir = std::env::temp_dir().join(format!(
            "pasteimg-session-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        Session::new(dir).unwrap()
    }

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])))
    }

    #[test]
    fn test_sequential_file_names() {
        let mut session = session_in("names");

        let a = session.save(&solid(300, 100)).unwrap();
        let b = session.save(&solid(2000, 1000)).unwrap();

        assert_eq!(a.number, 1);
        assert_eq!(b.number, 2);
        assert!(a.path.ends_with("image_001.png"));
        assert!(b.path.ends_with("image_002.png"));
        assert!(a.path.is_absolute());
        assert_eq!((b.width, b.height), (2000, 1000));
        assert_eq!(session.count(), 2);
        assert_eq!(session.saved(), &[a.clone(), b.clone()]);

        // Written files decode back to the original size
        let reread = image::open(&a.path).unwrap();
        assert_eq!((reread.width(), reread.height()), (300, 100));

        session.cleanup();
        fs::remove_dir_all(session.dir()).unwrap();
    }

    #[test]
    fn test_failed_save_does_not_advance_counter() {
        let mut session = session_in("gaps");

        session.save(&solid(4, 4)).unwrap();

        // Pull the directory out from under the session
        fs::remove_dir_all(session.dir()).unwrap();
        let err = session.save(&solid(4, 4)).unwrap_err();
        assert!(matches!(err, PasteError::Save { .. }));
        assert_eq!(session.count(), 1);
        assert_eq!(session.saved().len(), 1);

        fs::create_dir_all(session.dir()).unwrap();
        let next = session.save(&solid(4, 4)).unwrap();
        assert_eq!(next.number, 2);
        assert!(next.path.ends_with("image_002.png"));

        session.cleanup();
        fs::remove_dir_all(session.dir()).unwrap();
    }

    #[test]
    fn test_cleanup_removes_everything_and_tolerates_missing_files() {
        let mut session = session_in("cleanup");

        let a = session.save(&solid(2, 2)).unwrap();
        let b = session.save(&solid(2, 2)).unwrap();
        let c = session.save(&solid(2, 2)).unwrap();
        for image in [&a, &b, &c] {
            assert!(image.path.exists());
        }

        // Someone else already deleted one of them
        fs::remove_file(&b.path).unwrap();

        assert_eq!(session.cleanup(), 2);
        for image in [&a, &b, &c] {
            assert!(!image.path.exists());
        }

        // Running it again is harmless
        assert_eq!(session.cleanup(), 0);

        fs::remove_dir_all(session.dir()).unwrap();
    }
}
