//! # QR Error Types
//!
//! A payload that cannot be found in a picture is NOT an error: decoding
//! returns `None` for that. These variants cover the failures that abort an
//! action.

use thiserror::Error;

/// QR codec and camera errors.
#[derive(Debug, Error)]
pub enum QrError {
    /// The payload could not be turned into a QR symbol (too long).
    #[error("QR encode failed: {0}")]
    Encode(String),

    /// PNG/JPEG encode or decode failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Output directory or file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The capture device could not be opened or stopped delivering frames.
    ///
    /// ## When This Occurs
    /// - No camera attached, or in use by another program
    /// - Built without the `camera` feature
    /// - Device unplugged mid-scan
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    /// The code cannot be used as a file name.
    #[error("Invalid code: {0}")]
    InvalidCode(String),
}

/// Result type for QR operations.
pub type QrResult<T> = Result<T, QrError>;
