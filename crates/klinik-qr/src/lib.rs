//! # klinik-qr: QR Codes for Klinik Sehat
//!
//! Medicine codes go out as PNG images and come back in through uploaded
//! pictures or a live camera.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QR Round Trip                                    │
//! │                                                                         │
//! │   Generate QR page                     Scan pages                      │
//! │        │                          ┌──────────┴──────────┐               │
//! │        ▼                          ▼                     ▼               │
//! │  ┌───────────┐            ┌──────────────┐     ┌────────────────┐      │
//! │  │ encode.rs │            │  decode.rs   │     │    live.rs     │      │
//! │  │ QrCodec   │            │ decode_bytes │     │  scan_live     │      │
//! │  │ qr/A1.png │──printed──►│ decode_image │◄────│  FrameSource   │      │
//! │  └───────────┘   label    └──────────────┘     └───────▲────────┘      │
//! │                                                        │               │
//! │                                                ┌───────┴────────┐      │
//! │                                                │   camera.rs    │      │
//! │                                                │ (feature gate) │      │
//! │                                                └────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use klinik_qr::{decode_bytes, QrCodec};
//!
//! # fn main() -> Result<(), klinik_qr::QrError> {
//! let codec = QrCodec::new("qr");
//! let path = codec.encode("A1")?;
//!
//! let bytes = std::fs::read(&path)?;
//! assert_eq!(decode_bytes(&bytes).as_deref(), Some("A1"));
//! # Ok(())
//! # }
//! ```

pub mod camera;
pub mod decode;
pub mod encode;
pub mod error;
pub mod live;

pub use camera::open_camera;
pub use decode::{decode_bytes, decode_image, encode_png};
pub use encode::{QrCodec, DEFAULT_QR_DIR};
pub use error::{QrError, QrResult};
pub use live::{scan_live, FrameSource, LiveScan};
