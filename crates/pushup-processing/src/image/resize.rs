use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

pub struct ImageResize;

impl ImageResize {
    /// Dimensions of a thumbnail that fits inside `max_width` x `max_height`.
    ///
    /// Never upscales. When the image does not fit, the limiting axis takes the
    /// box edge and the other axis is the floor or ceiling of its scaled length,
    /// whichever keeps the aspect ratio closer (floor on a tie), never below 1.
    pub fn thumbnail_dimensions(
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    ) -> (u32, u32) {
        if width <= max_width && height <= max_height {
            return (width, height);
        }

        let aspect = width as f64 / height as f64;
        let (mw, mh) = (max_width as f64, max_height as f64);

        if mw / mh >= aspect {
            let w = round_aspect(mh * aspect, |n| (aspect - n / mh).abs());
            (w, max_height)
        } else {
            let h = round_aspect(mw / aspect, |n| {
                if n == 0.0 {
                    0.0
                } else {
                    (aspect - mw / n).abs()
                }
            });
            (max_width, h)
        }
    }

    /// Pick a resampling filter from the downscale ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Return a copy of `img` that fits inside the bounding box.
    ///
    /// The source is only borrowed, so the same decoded image can feed every size.
    pub fn thumbnail(img: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) =
            Self::thumbnail_dimensions(orig_width, orig_height, max_width, max_height);

        if (width, height) == (orig_width, orig_height) {
            return img.clone();
        }

        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }
}

/// Floor or ceiling of `value`, whichever scores lower, clamped to at least 1.
fn round_aspect(value: f64, score: impl Fn(f64) -> f64) -> u32 {
    let (floor, ceil) = (value.floor(), value.ceil());
    let best = if score(ceil) < score(floor) { ceil } else { floor };
    (best as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_wide_image_into_square_box() {
        assert_eq!(ImageResize::thumbnail_dimensions(2000, 1000, 100, 100), (100, 50));
    }

    #[test]
    fn test_tall_image_into_square_box() {
        assert_eq!(ImageResize::thumbnail_dimensions(768, 1024, 300, 300), (225, 300));
    }

    #[test]
    fn test_landscape_photo_sizes() {
        assert_eq!(ImageResize::thumbnail_dimensions(1024, 768, 100, 100), (100, 75));
        assert_eq!(ImageResize::thumbnail_dimensions(1024, 768, 500, 500), (500, 375));
        assert_eq!(ImageResize::thumbnail_dimensions(1024, 768, 1000, 1000), (1000, 750));
    }

    #[test]
    fn test_never_upscales() {
        assert_eq!(ImageResize::thumbnail_dimensions(1024, 768, 1200, 1200), (1024, 768));
        assert_eq!(ImageResize::thumbnail_dimensions(50, 50, 100, 100), (50, 50));
    }

    #[test]
    fn test_extreme_aspect_ratio_keeps_one_pixel() {
        assert_eq!(ImageResize::thumbnail_dimensions(10_000, 10, 100, 100), (100, 1));
        assert_eq!(ImageResize::thumbnail_dimensions(1, 5_000, 100, 100), (1, 100));
    }

    #[test]
    fn test_thin_strip_rounds_toward_aspect() {
        // 1.4 px rounds up: 100x2 is closer to 1000:14 than 100x1.
        assert_eq!(ImageResize::thumbnail_dimensions(1000, 14, 100, 100), (100, 2));
        // Scored on the width, 1 px is the closer choice.
        assert_eq!(ImageResize::thumbnail_dimensions(14, 1000, 100, 100), (1, 100));
    }

    #[test]
    fn test_narrow_image_taller_than_box() {
        assert_eq!(ImageResize::thumbnail_dimensions(50, 1000, 100, 100), (5, 100));
    }

    #[test]
    fn test_thumbnail_leaves_source_untouched() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(2000, 1000));
        let thumb = ImageResize::thumbnail(&source, 100, 100);

        assert_eq!(thumb.dimensions(), (100, 50));
        assert_eq!(source.dimensions(), (2000, 1000));
    }

    #[test]
    fn test_select_filter() {
        assert_eq!(ImageResize::select_filter(1000, 1000, 100, 100), FilterType::Triangle);
        assert_eq!(ImageResize::select_filter(1000, 1000, 600, 600), FilterType::CatmullRom);
        assert_eq!(ImageResize::select_filter(1000, 1000, 800, 800), FilterType::Lanczos3);
    }
}
