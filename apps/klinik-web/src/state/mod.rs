//! # State Module
//!
//! Shared state handed to every page handler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Router::with_state(AppState)                                          │
//! │          │                                                              │
//! │          ├──────────────────┬──────────────────┬──────────────────┐    │
//! │          ▼                  ▼                  ▼                  ▼     │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │  AppConfig   │  │   Storage    │  │   QrCodec    │  │  Camera    │  │
//! │  │  (Arc, r/o)  │  │  file paths  │  │  qr/ dir     │  │  Session   │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AppConfig: read-only after startup                                  │
//! │  • Storage / QrCodec: paths only, every call opens its own file        │
//! │  • CameraSession: Arc<Mutex<T>> shared with the camera worker          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here caches the inventory. Each request reads the file again.

mod camera;

pub use camera::{CameraSession, CameraStatus, SourceOpener};

use std::sync::Arc;

use klinik_qr::QrCodec;
use klinik_store::Storage;

use crate::config::AppConfig;

/// Everything a page handler can reach.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Storage,
    pub codec: QrCodec,
    pub camera: CameraSession,
}

impl AppState {
    /// State over the configured files and camera device.
    pub fn new(config: AppConfig) -> Self {
        let camera = CameraSession::for_device(config.camera.index);
        AppState::with_camera(config, camera)
    }

    /// State with a caller-supplied camera session.
    pub fn with_camera(config: AppConfig, camera: CameraSession) -> Self {
        AppState {
            storage: Storage::new(config.store_config()),
            codec: config.qr_codec(),
            camera,
            config: Arc::new(config),
        }
    }
}
