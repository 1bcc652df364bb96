//! # Camera Device
//!
//! Opens the system capture device as a [`FrameSource`].
//!
//! The device is held for exactly one scan: it is opened when the scan starts
//! and its stream is stopped when the returned source is dropped. Camera
//! handles are not `Send`, so open the device on the same thread that runs
//! [`scan_live`](crate::live::scan_live).
//!
//! Builds without the `camera` feature have no device and always report
//! [`QrError::CameraUnavailable`].

use crate::error::{QrError, QrResult};
use crate::live::FrameSource;

/// Opens capture device `index` (0 is the default camera).
#[cfg(feature = "camera")]
pub fn open_camera(index: u32) -> QrResult<Box<dyn FrameSource>> {
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
    use nokhwa::Camera;
    use tracing::info;

    let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
    let mut camera = Camera::new(CameraIndex::Index(index), format)
        .map_err(|e| QrError::CameraUnavailable(e.to_string()))?;
    camera
        .open_stream()
        .map_err(|e| QrError::CameraUnavailable(e.to_string()))?;

    info!(index, "Camera opened");
    Ok(Box::new(DeviceSource { camera }))
}

/// Opens capture device `index` (0 is the default camera).
#[cfg(not(feature = "camera"))]
pub fn open_camera(index: u32) -> QrResult<Box<dyn FrameSource>> {
    tracing::warn!(index, "Camera requested but built without the `camera` feature");
    Err(QrError::CameraUnavailable(
        "this build has no camera support".to_string(),
    ))
}

#[cfg(feature = "camera")]
struct DeviceSource {
    camera: nokhwa::Camera,
}

#[cfg(feature = "camera")]
impl FrameSource for DeviceSource {
    fn next_frame(&mut self) -> QrResult<image::DynamicImage> {
        use nokhwa::pixel_format::RgbFormat;

        let buffer = self
            .camera
            .frame()
            .map_err(|e| QrError::CameraUnavailable(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| QrError::CameraUnavailable(e.to_string()))?;

        // nokhwa links its own `image` version; hand the raw RGB bytes across.
        let (width, height) = (decoded.width(), decoded.height());
        let rgb = image::RgbImage::from_raw(width, height, decoded.into_raw()).ok_or_else(|| {
            QrError::CameraUnavailable(format!("short frame buffer for {width}x{height}"))
        })?;

        Ok(image::DynamicImage::ImageRgb8(rgb))
    }
}

#[cfg(feature = "camera")]
impl Drop for DeviceSource {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!(error = %e, "Failed to stop camera stream");
        } else {
            tracing::info!("Camera released");
        }
    }
}
