pub mod protocol;
pub mod thumbnail;

pub use protocol::ImageProtocol;
pub use thumbnail::{BoundingBox, fitted_size, make_thumbnail, scale_factor};
