//! # QR Decoding
//!
//! Reads a code back out of a still picture.
//!
//! ```text
//!   bytes ──► image::load_from_memory ──► to_luma8 ──► rqrr grids ──► text
//!                     │                                   │
//!                     └── unreadable ──► None             └── none decode ──► None
//! ```
//!
//! "Nothing found" is `None`, never an error.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::QrResult;

/// Decodes the first readable QR symbol in `image`.
pub fn decode_image(image: &DynamicImage) -> Option<String> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();

    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            gray.get_pixel(x as u32, y as u32)[0]
        });

    let grids = prepared.detect_grids();
    if grids.is_empty() {
        debug!(width, height, "No QR grid found");
        return None;
    }

    for grid in &grids {
        match grid.decode() {
            Ok((_, text)) if !text.is_empty() => return Some(text),
            Ok(_) => debug!("QR grid decoded to empty payload"),
            Err(e) => debug!(error = %e, "QR grid failed to decode"),
        }
    }

    None
}

/// Decodes a PNG/JPEG file body. Bytes that are not an image give `None`.
pub fn decode_bytes(bytes: &[u8]) -> Option<String> {
    match image::load_from_memory(bytes) {
        Ok(image) => decode_image(&image),
        Err(e) => {
            debug!(error = %e, len = bytes.len(), "Upload is not a readable image");
            None
        }
    }
}

/// Encodes `image` as PNG bytes (used for live preview frames).
pub fn encode_png(image: &DynamicImage) -> QrResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
