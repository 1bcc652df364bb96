//! # Live Scanning
//!
//! Pulls frames from a source until one carries a QR code.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        scan_live()                                      │
//! │                                                                         │
//! │   ┌──► cancel flag set? ──yes──► Ok(LiveScan::Cancelled)               │
//! │   │          │ no                                                       │
//! │   │          ▼                                                          │
//! │   │    source.next_frame() ──err──► Err(CameraUnavailable)  (fatal)    │
//! │   │          │ frame                                                    │
//! │   │          ▼                                                          │
//! │   │    decode_image(frame) ──Some──► Ok(LiveScan::Decoded(code))       │
//! │   │          │ None                                                     │
//! │   │          ▼                                                          │
//! │   └──── on_frame(&frame)   (live preview)                              │
//! │                                                                         │
//! │  No timeout. The loop blocks its thread; run it on a blocking worker.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use image::DynamicImage;
use tracing::{debug, warn};

use crate::decode::decode_image;
use crate::error::{QrError, QrResult};

/// Anything that yields camera-like frames.
pub trait FrameSource {
    /// Blocks until the next frame is available.
    ///
    /// An error means the device is gone; the scan stops.
    fn next_frame(&mut self) -> QrResult<DynamicImage>;
}

/// How a live scan ended (other than by device failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveScan {
    /// A frame decoded to this code.
    Decoded(String),

    /// The cancel flag was raised before a code was found.
    Cancelled,
}

/// Reads frames from `source` until a code decodes, `cancel` is raised or the
/// source fails.
pub fn scan_live<S, F>(source: &mut S, cancel: &AtomicBool, mut on_frame: F) -> QrResult<LiveScan>
where
    S: FrameSource + ?Sized,
    F: FnMut(&DynamicImage),
{
    let mut frames: u64 = 0;

    loop {
        if cancel.load(Ordering::SeqCst) {
            debug!(frames, "Live scan cancelled");
            return Ok(LiveScan::Cancelled);
        }

        let frame = match source.next_frame() {
            Ok(frame) => frame,
            Err(QrError::CameraUnavailable(reason)) => {
                warn!(frames, reason = %reason, "Camera stopped delivering frames");
                return Err(QrError::CameraUnavailable(reason));
            }
            Err(other) => {
                warn!(frames, error = %other, "Frame read failed");
                return Err(QrError::CameraUnavailable(other.to_string()));
            }
        };
        frames += 1;

        if let Some(code) = decode_image(&frame) {
            debug!(frames, code = %code, "Live scan decoded");
            return Ok(LiveScan::Decoded(code));
        }

        on_frame(&frame);
    }
}
