pub mod saved_image;
pub mod session;

pub use saved_image::SavedImage;
pub use session::Session;
