//! # Camera Scan Page
//!
//! ```text
//! Idle ──"▶️ Aktifkan Kamera"──► Scanning (page reloads, preview frame)
//!                                   │
//!                     ┌─────────────┼──────────────┐
//!                     ▼             ▼              ▼
//!               Decoded(code)   Failed(msg)   "⏹️ Matikan Kamera" ──► Stopping
//!               lookup in CSV   error notice                             │
//!                                                   device released ──► Idle
//! ```
//!
//! Camera scans only look the code up. They do not write the scan log.

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::error::{PageError, PageResult};
use crate::pages::{load_inventory, record_details, render, Page};
use crate::render::{Notice, PageView};
use crate::state::{AppState, CameraStatus};

const START_FORM: &str = r#"<form method="post" action="/scan-kamera/start"><button type="submit">▶️ Aktifkan Kamera</button></form>"#;

const STOP_FORM: &str = r#"<form method="post" action="/scan-kamera/stop"><button type="submit">⏹️ Matikan Kamera</button></form>"#;

pub async fn show(State(state): State<AppState>) -> PageResult<Html<String>> {
    let view = PageView::new(Page::ScanCamera);

    let view = match state.camera.status() {
        CameraStatus::Idle => view.body(START_FORM),
        CameraStatus::Scanning => view
            .refresh(state.config.camera.refresh_ms)
            .notice(Notice::info("Arahkan QR Code ke kamera"))
            .body(format!(
                r#"<p><img src="/scan-kamera/frame.png" alt="Kamera" width="480"></p>{STOP_FORM}"#
            )),
        CameraStatus::Stopping => view
            .refresh(state.config.camera.refresh_ms)
            .notice(Notice::info("Kamera sedang dimatikan")),
        CameraStatus::Decoded(code) => {
            let inventory = load_inventory(&state)?;
            let lookup = match inventory.find(&code) {
                Some(record) => Notice::info(record_details(record)),
                None => Notice::warning("Data obat tidak ditemukan"),
            };
            view.notice(Notice::success(format!("✅ QR Terbaca: {code}")))
                .notice(lookup)
                .body(START_FORM)
        }
        CameraStatus::Failed(reason) => view
            .notice(Notice::error(format!("Kamera tidak tersedia: {reason}")))
            .body(START_FORM),
    };

    Ok(render(&state, view))
}

pub async fn start(State(state): State<AppState>) -> Redirect {
    state.camera.start();
    Redirect::to(Page::ScanCamera.path())
}

pub async fn stop(State(state): State<AppState>) -> Redirect {
    state.camera.stop();
    Redirect::to(Page::ScanCamera.path())
}

/// Latest preview frame as PNG.
pub async fn frame(State(state): State<AppState>) -> PageResult<Response> {
    let png = state
        .camera
        .latest_frame()
        .ok_or_else(|| PageError::not_found("Belum ada gambar dari kamera"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    )
        .into_response())
}
