//! # QR Encoding
//!
//! Renders a medicine code into a PNG under the output directory.
//!
//! ## Raster Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ◄─ 4 modules ─►◄──────── width modules ────────►◄─ 4 modules ─►       │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │ quiet zone (white)                                           │       │
//! │  │        ┌───────────────────────────────────┐                │       │
//! │  │        │ ██ ▄▄ ██  each module = 8×8 px    │                │       │
//! │  │        │ ▄▄ ██ ▄▄  dark = 0, light = 255   │                │       │
//! │  │        └───────────────────────────────────┘                │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Same code in, same pixels out.  qr/<code>.png is overwritten.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};
use tracing::debug;

use crate::error::{QrError, QrResult};
use klinik_core::validation::validate_code;

/// Default output directory for generated images.
pub const DEFAULT_QR_DIR: &str = "qr";

/// Light border around the symbol, in modules.
pub const QUIET_ZONE: u32 = 4;

/// Pixels per module edge.
pub const MODULE_PX: u32 = 8;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Writes and locates QR images for medicine codes.
#[derive(Debug, Clone)]
pub struct QrCodec {
    output_dir: PathBuf,
}

impl QrCodec {
    /// Codec writing into `output_dir`. The directory is created on first encode.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        QrCodec {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the image for `code` lives (whether or not it exists yet).
    pub fn image_path(&self, code: &str) -> PathBuf {
        self.output_dir.join(format!("{code}.png"))
    }

    /// Renders `code` and saves it as `<output_dir>/<code>.png`.
    ///
    /// Surrounding whitespace is dropped first; the trimmed code is both the
    /// QR payload and the file name.
    ///
    /// ## Returns
    /// * `Ok(path)` - the written file (any previous one is replaced)
    /// * `Err(QrError::InvalidCode)` - empty code or one containing a path separator
    pub fn encode(&self, code: &str) -> QrResult<PathBuf> {
        let code = code.trim();
        validate_code(code).map_err(|e| QrError::InvalidCode(e.to_string()))?;

        let image = self.render(code)?;

        fs::create_dir_all(&self.output_dir)?;
        let path = self.image_path(code);
        image.save_with_format(&path, ImageFormat::Png)?;

        debug!(code = %code, path = %path.display(), "Generated QR image");
        Ok(path)
    }

    /// Renders `code` to an 8-bit grayscale image without touching disk.
    pub fn render(&self, code: &str) -> QrResult<GrayImage> {
        let symbol = QrCode::new(code.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;

        let modules = symbol.width() as u32;
        let colors = symbol.to_colors();
        let side = (modules + 2 * QUIET_ZONE) * MODULE_PX;

        let mut image = GrayImage::from_pixel(side, side, LIGHT);
        for (index, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }

            let index = index as u32;
            let left = (index % modules + QUIET_ZONE) * MODULE_PX;
            let top = (index / modules + QUIET_ZONE) * MODULE_PX;
            for y in top..top + MODULE_PX {
                for x in left..left + MODULE_PX {
                    image.put_pixel(x, y, DARK);
                }
            }
        }

        Ok(image)
    }
}

impl Default for QrCodec {
    fn default() -> Self {
        QrCodec::new(DEFAULT_QR_DIR)
    }
}
