//! Pixel Pushup Processing Library
//!
//! CPU-bound building blocks of the pushup pipeline: decoding uploads,
//! thumbnail resizing, lossless WebP encoding, plus the small pure helpers
//! (size table, filename splitting, human-readable sizes) the pipeline needs.
//!
//! Everything here is synchronous. Callers on an async runtime should run the
//! image work inside `tokio::task::spawn_blocking`.

pub mod compression;
pub mod error;
pub mod filename;
pub mod image;
pub mod size_format;
pub mod sizes;

pub use compression::{encode_lossless_webp, WEBP_CONTENT_TYPE};
pub use error::{ProcessingError, ProcessingResult};
pub use filename::FileName;
pub use crate::image::{DecodedImage, ImageProcessor, ImageResize};
pub use size_format::format_file_size;
pub use sizes::{SizeSpec, SIZES};
