// LabelDesk - platform/thumbnail.rs
//
// Decode downloaded image bytes into small RGBA thumbnails for the review
// columns. Runs on request worker threads, never on the UI thread.

use crate::util::error::ApiError;

/// Decoded, downscaled RGBA8 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Decode `bytes` and shrink the image to fit a `max_edge` square,
/// preserving aspect ratio. Smaller images are not enlarged.
pub fn decode_thumbnail(url: &str, bytes: &[u8], max_edge: u32) -> Result<Thumbnail, ApiError> {
    let image = image::load_from_memory(bytes).map_err(|e| ApiError::Image {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    let image = if image.width() > max_edge || image.height() > max_edge {
        image.thumbnail(max_edge, max_edge)
    } else {
        image
    };
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Thumbnail {
        width: width as usize,
        height: height as usize,
        rgba: rgba.into_raw(),
    })
}
