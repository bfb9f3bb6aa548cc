//! Image optimization for uploaded product photos.
//!
//! Uploads are decoded, downscaled to a bounded width and re-encoded as JPEG
//! before they reach the artifact store. The transform is pure: it never
//! touches storage.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

/// Images wider than this are downscaled; narrower ones are never enlarged.
pub const MAX_WIDTH: u32 = 1200;
/// JPEG encode quality (0-100).
pub const JPEG_QUALITY: u8 = 80;
/// Extension appended to every stored artifact.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Errors raised while turning an upload into a storable artifact.
#[derive(Debug, Error)]
pub enum ImageProcessingError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Decode `raw`, cap its width at [`MAX_WIDTH`] preserving aspect ratio and
/// re-encode it as JPEG at [`JPEG_QUALITY`].
pub fn optimize(raw: &[u8]) -> Result<Vec<u8>, ImageProcessingError> {
    let decoded = image::load_from_memory(raw).map_err(ImageProcessingError::Decode)?;

    let resized = if decoded.width() > MAX_WIDTH {
        decoded.resize(MAX_WIDTH, u32::MAX, FilterType::Lanczos3)
    } else {
        decoded
    };

    // JPEG has no alpha channel; flatten whatever the decoder produced.
    let rgb = resized.to_rgb8();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(ImageProcessingError::Encode)?;

    Ok(out.into_inner())
}
