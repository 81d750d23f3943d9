//! Thumbnail width measurement.
//!
//! Thumbnails share one height; their width follows the aspect ratio of the
//! underlying media. Images are probed from their header, videos and documents
//! use fixed aspect ratios.

use std::path::Path;

use anyhow::{Context, Result};
use image::ImageReader;
use tracing::{trace, warn};

use crate::models::MediaType;

/// Aspect ratio assumed for video posters.
pub const VIDEO_ASPECT: f32 = 16.0 / 9.0;

/// Aspect ratio of a portrait A4 page, used for document thumbnails.
pub const DOCUMENT_ASPECT: f32 = 210.0 / 297.0;

/// Reads image dimensions without decoding pixel data.
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {:?}", path))?
        .with_guessed_format()
        .with_context(|| format!("Failed to guess image format: {:?}", path))?;
    reader
        .into_dimensions()
        .with_context(|| format!("Failed to read dimensions: {:?}", path))
}

/// Width of the thumbnail for `path` at `thumb_height` pixels.
///
/// Unreadable images fall back to a square thumbnail.
pub fn thumbnail_width(path: &Path, media_type: MediaType, thumb_height: f32) -> f32 {
    let aspect = match media_type {
        MediaType::Image => match read_dimensions(path) {
            Ok((width, height)) if height > 0 => width as f32 / height as f32,
            Ok(_) => 1.0,
            Err(e) => {
                warn!("Using square thumbnail for {:?}: {:#}", path, e);
                1.0
            }
        },
        MediaType::Video => VIDEO_ASPECT,
        MediaType::Book => DOCUMENT_ASPECT,
    };
    let width = (thumb_height * aspect).round();
    trace!(?path, %media_type, width, "Measured thumbnail");
    width
}
