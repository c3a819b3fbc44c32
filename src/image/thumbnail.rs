//! Thumbnail sizing
//!
//! Thumbnails fit inside a bounding box with the aspect ratio preserved.
//! Images are only ever shrunk: anything already inside the box keeps its
//! native size.

use image::DynamicImage;
use image::imageops::FilterType;

/// Maximum thumbnail size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(width: u32, height: u32) -> Self {
        BoundingBox { width, height }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::new(400, 200)
    }
}

/// `min(box_w / w, box_h / h)`, capped at 1.0
pub fn scale_factor(width: u32, height: u32, bounds: BoundingBox) -> f64 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    let ratio = f64::min(
        f64::from(bounds.width) / f64::from(width),
        f64::from(bounds.height) / f64::from(height),
    );
    ratio.min(1.0)
}

/// Thumbnail dimensions for an image of `width` x `height`
pub fn fitted_size(width: u32, height: u32, bounds: BoundingBox) -> (u32, u32) {
    let factor = scale_factor(width, height, bounds);
    if factor >= 1.0 {
        return (width, height);
    }
    // Truncate, but never collapse a side to nothing
    let scaled = |side: u32| ((f64::from(side) * factor) as u32).max(1);
    (scaled(width), scaled(height))
}

/// Downscale `image` into `bounds` with a Lanczos3 filter
pub fn make_thumbnail(image: &DynamicImage, bounds: BoundingBox) -> DynamicImage {
    let (width, height) = fitted_size(image.width(), image.height(), bounds);
    if (width, height) == (image.width(), image.height()) {
        return image.clone();
    }
    image.resize_exact(width, height, FilterType::Lanczos3)
}
