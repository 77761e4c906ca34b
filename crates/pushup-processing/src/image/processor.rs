//! Image processor - decoding and validation

use crate::error::{ProcessingError, ProcessingResult};
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;

/// A decoded upload together with its dimensions.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
    /// Detected container format (e.g. "Jpeg"), if the reader recognised it
    pub format: Option<String>,
}

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode raw upload bytes, guessing the format from the content.
    pub fn decode(data: &[u8]) -> ProcessingResult<DecodedImage> {
        if data.is_empty() {
            return Err(ProcessingError::EmptyInput);
        }

        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;
        let format = reader.format().map(|f| format!("{:?}", f));
        let image = reader
            .decode()
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;

        let (width, height) = image.dimensions();
        tracing::debug!(width, height, format = ?format, "Decoded upload");

        Ok(DecodedImage {
            image,
            width,
            height,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let decoded = ImageProcessor::decode(&png_bytes(64, 32)).unwrap();
        assert_eq!((decoded.width, decoded.height), (64, 32));
        assert_eq!(decoded.format.as_deref(), Some("Png"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = ImageProcessor::decode(b"definitely not an image");
        assert!(matches!(result, Err(ProcessingError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(matches!(
            ImageProcessor::decode(&[]),
            Err(ProcessingError::EmptyInput)
        ));
    }
}
