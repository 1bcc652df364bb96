//! # Camera Scan Session
//!
//! Runs the live scan loop on a blocking worker and exposes its progress to
//! the scan page.
//!
//! ## Session States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Camera Session Lifecycle                             │
//! │                                                                         │
//! │  Page Action             Session Call         Status Change             │
//! │  ───────────             ────────────         ─────────────             │
//! │                                                                         │
//! │  Aktifkan Kamera ───────► start() ──────────► Idle ──► Scanning        │
//! │                                                                         │
//! │  (worker thread)                                                        │
//! │    frame without QR ────► publish PNG ──────► Scanning (preview)       │
//! │    frame with QR ───────► finish ───────────► Decoded(code)            │
//! │    device error ────────► finish ───────────► Failed(message)          │
//! │                                                                         │
//! │  Matikan Kamera ────────► stop() ───────────► Stopping (flag raised)   │
//! │  (worker releases device) ─────────────────► Idle                      │
//! │                                                                         │
//! │  NOTE: Each start bumps a generation counter. A worker only reports    │
//! │        back while its generation is still current, so a stopped scan   │
//! │        cannot overwrite a newer one. start() is refused until the      │
//! │        previous worker has dropped its frame source.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use image::DynamicImage;
use tracing::{debug, info, warn};

use klinik_qr::{encode_png, open_camera, scan_live, FrameSource, LiveScan, QrResult};

/// Opens a fresh frame source for one scan. Runs on the worker thread.
pub type SourceOpener = Arc<dyn Fn() -> QrResult<Box<dyn FrameSource>> + Send + Sync>;

/// What the scan page shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CameraStatus {
    /// Camera off.
    #[default]
    Idle,

    /// Worker is reading frames.
    Scanning,

    /// Stop was requested; the worker has not released the device yet.
    Stopping,

    /// A QR code was read; the device has been released.
    Decoded(String),

    /// The device could not be opened or stopped delivering frames.
    Failed(String),
}

#[derive(Default)]
struct SessionInner {
    status: CameraStatus,
    frame_png: Option<Vec<u8>>,
    cancel: Arc<AtomicBool>,
    generation: u64,
    worker_running: bool,
}

/// Shared handle to the single camera scan.
///
/// ## Thread Safety
/// Wrapped in `Arc<Mutex<T>>`: page handlers and the worker thread both
/// touch it. The lock is never held across a frame read.
#[derive(Clone)]
pub struct CameraSession {
    inner: Arc<Mutex<SessionInner>>,
    opener: SourceOpener,
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("status", &self.status())
            .finish()
    }
}

impl CameraSession {
    /// Session over an arbitrary frame source.
    pub fn new(opener: SourceOpener) -> Self {
        CameraSession {
            inner: Arc::new(Mutex::new(SessionInner::default())),
            opener,
        }
    }

    /// Session over system capture device `index`.
    pub fn for_device(index: u32) -> Self {
        CameraSession::new(Arc::new(move || open_camera(index)))
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> CameraStatus {
        self.lock().status.clone()
    }

    /// PNG of the most recent preview frame, if the scan produced one.
    pub fn latest_frame(&self) -> Option<Vec<u8>> {
        self.lock().frame_png.clone()
    }

    /// Starts a scan on a blocking worker.
    ///
    /// Returns `false` (and does nothing) while a worker still holds the
    /// device, whether it is scanning or still shutting down.
    pub fn start(&self) -> bool {
        let (generation, cancel) = {
            let mut inner = self.lock();
            if inner.worker_running {
                debug!(status = ?inner.status, "Camera worker still running");
                return false;
            }
            inner.worker_running = true;
            inner.generation += 1;
            inner.status = CameraStatus::Scanning;
            inner.frame_png = None;
            inner.cancel = Arc::new(AtomicBool::new(false));
            (inner.generation, inner.cancel.clone())
        };

        info!(generation, "Starting camera scan");

        let session = self.clone();
        tokio::task::spawn_blocking(move || session.run_worker(generation, cancel));
        true
    }

    /// Raises the cancel flag.
    ///
    /// With a worker running the status is `Stopping` until the worker has
    /// dropped its frame source, then `Idle`. Otherwise it is `Idle` at once.
    pub fn stop(&self) {
        let mut inner = self.lock();
        inner.cancel.store(true, Ordering::SeqCst);
        inner.generation += 1;
        inner.frame_png = None;
        inner.status = if inner.worker_running {
            CameraStatus::Stopping
        } else {
            CameraStatus::Idle
        };
        info!(status = ?inner.status, "Camera scan stopped");
    }

    /// Blocking body of one scan: open, loop, release, report.
    fn run_worker(&self, generation: u64, cancel: Arc<AtomicBool>) {
        let mut exit = WorkerExit {
            session: self,
            generation,
            status: CameraStatus::Failed("camera worker stopped unexpectedly".to_string()),
        };

        let outcome = (self.opener)().and_then(|mut source| {
            let result = scan_live(source.as_mut(), &cancel, |frame| {
                self.publish_frame(generation, frame)
            });
            // Device released here, before the outcome is published.
            drop(source);
            result
        });

        exit.status = match outcome {
            Ok(LiveScan::Decoded(code)) => CameraStatus::Decoded(code),
            Ok(LiveScan::Cancelled) => CameraStatus::Idle,
            Err(e) => {
                warn!(error = %e, "Camera scan failed");
                CameraStatus::Failed(e.to_string())
            }
        };
    }

    fn publish_frame(&self, generation: u64, frame: &DynamicImage) {
        let png = match encode_png(frame) {
            Ok(png) => png,
            Err(e) => {
                debug!(error = %e, "Skipping preview frame");
                return;
            }
        };

        let mut inner = self.lock();
        if inner.generation == generation {
            inner.frame_png = Some(png);
        }
    }
}

/// Marks the worker finished when `run_worker` returns or unwinds.
struct WorkerExit<'a> {
    session: &'a CameraSession,
    generation: u64,
    status: CameraStatus,
}

impl Drop for WorkerExit<'_> {
    fn drop(&mut self) {
        let mut inner = self.session.lock();
        inner.worker_running = false;

        if inner.generation == self.generation {
            debug!(status = ?self.status, "Camera scan finished");
            inner.status = std::mem::take(&mut self.status);
        } else if inner.status == CameraStatus::Stopping {
            debug!("Camera released after stop");
            inner.status = CameraStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use klinik_qr::{QrCodec, QrError};
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct Scripted(VecDeque<DynamicImage>);

    impl FrameSource for Scripted {
        fn next_frame(&mut self) -> QrResult<DynamicImage> {
            self.0
                .pop_front()
                .ok_or_else(|| QrError::CameraUnavailable("end of script".to_string()))
        }
    }

    fn blank() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, Luma([255])))
    }

    fn session_with(frames: fn() -> Vec<DynamicImage>) -> CameraSession {
        CameraSession::new(Arc::new(move || {
            Ok(Box::new(Scripted(frames().into())) as Box<dyn FrameSource>)
        }))
    }

    async fn wait_until_settled(session: &CameraSession) -> CameraStatus {
        for _ in 0..200 {
            let status = session.status();
            if !matches!(status, CameraStatus::Scanning | CameraStatus::Stopping) {
                return status;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        session.status()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_scan_decodes_code() {
        let session = session_with(|| {
            let qr = QrCodec::default().render("A1").unwrap();
            vec![blank(), DynamicImage::ImageLuma8(qr)]
        });

        assert!(session.start());
        let status = wait_until_settled(&session).await;

        assert_eq!(status, CameraStatus::Decoded("A1".to_string()));
        assert!(session.latest_frame().is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_device_failure_is_reported() {
        let session = CameraSession::new(Arc::new(|| {
            Err(QrError::CameraUnavailable("no device".to_string()))
        }));

        session.start();
        let status = wait_until_settled(&session).await;

        assert_eq!(
            status,
            CameraStatus::Failed("Camera unavailable: no device".to_string())
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_stop_returns_to_idle() {
        let session = session_with(|| vec![blank(); 1_000]);

        assert!(session.start());
        session.stop();

        assert!(matches!(
            session.status(),
            CameraStatus::Stopping | CameraStatus::Idle
        ));
        assert_eq!(wait_until_settled(&session).await, CameraStatus::Idle);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(session.status(), CameraStatus::Idle);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_stop_without_scan_is_idle() {
        let session = session_with(Vec::new);
        session.stop();
        assert_eq!(session.status(), CameraStatus::Idle);
    }

    /// Slow blank frames; tracks how many sources are open at once.
    struct Counted {
        open: Arc<AtomicUsize>,
    }

    impl FrameSource for Counted {
        fn next_frame(&mut self) -> QrResult<DynamicImage> {
            std::thread::sleep(Duration::from_millis(80));
            Ok(blank())
        }
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            self.open.fetch_sub(1, Ordering::SeqCst);
        }
    }

    async fn wait_for_open(open: &AtomicUsize, expected: usize) {
        for _ in 0..200 {
            if open.load(Ordering::SeqCst) == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {expected} open sources");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_restart_waits_for_device_release() {
        let open = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let session = {
            let open = open.clone();
            let peak = peak.clone();
            CameraSession::new(Arc::new(move || {
                let now = open.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                Ok(Box::new(Counted { open: open.clone() }) as Box<dyn FrameSource>)
            }))
        };

        assert!(session.start());
        wait_for_open(&open, 1).await;

        session.stop();
        assert_eq!(session.status(), CameraStatus::Stopping);
        assert!(!session.start());

        assert_eq!(wait_until_settled(&session).await, CameraStatus::Idle);
        assert_eq!(open.load(Ordering::SeqCst), 0);

        assert!(session.start());
        wait_for_open(&open, 1).await;
        session.stop();
        assert_eq!(wait_until_settled(&session).await, CameraStatus::Idle);

        assert_eq!(open.load(Ordering::SeqCst), 0);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}
