//! Image decoding and resizing

mod processor;
mod resize;

pub use processor::{DecodedImage, ImageProcessor};
pub use resize::ImageResize;
