//! Lossless WebP encoding for stored objects

use bytes::Bytes;
use image::{DynamicImage, GenericImageView};

use crate::error::{ProcessingError, ProcessingResult};

pub const WEBP_CONTENT_TYPE: &str = "image/webp";

/// Encode an image as lossless WebP.
pub fn encode_lossless_webp(img: &DynamicImage) -> ProcessingResult<Bytes> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ProcessingError::Encode(format!(
            "cannot encode a {}x{} image",
            width, height
        )));
    }

    // Convert to RGBA for WebP encoding
    let rgba_img = img.to_rgba8();

    let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
    let webp_data = encoder.encode_lossless();

    Ok(Bytes::copy_from_slice(&webp_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    #[test]
    fn test_output_is_lossless_webp() {
        let mut img = RgbaImage::new(4, 3);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 60) as u8, (y * 80) as u8, 7, 255]);
        }
        let source = DynamicImage::ImageRgba8(img);

        let encoded = encode_lossless_webp(&source).unwrap();
        assert_eq!(&encoded[0..4], b"RIFF");
        assert_eq!(&encoded[8..12], b"WEBP");

        let decoded = image::load_from_memory_with_format(&encoded, ImageFormat::WebP).unwrap();
        assert_eq!(decoded.to_rgba8(), source.to_rgba8());
    }

    #[test]
    fn test_rejects_empty_image() {
        let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert!(matches!(
            encode_lossless_webp(&empty),
            Err(ProcessingError::Encode(_))
        ));
    }
}
