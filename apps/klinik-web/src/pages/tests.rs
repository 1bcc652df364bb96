//! Router tests: every request goes through the full axum stack in-process.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use image::{DynamicImage, GrayImage, Luma};
use tempfile::TempDir;
use tower::ServiceExt;

use klinik_core::{Inventory, MedicineRecord, Rupiah};
use klinik_qr::{encode_png, QrCodec, QrError};

use super::*;
use crate::config::AppConfig;
use crate::state::{CameraSession, CameraStatus};

// =============================================================================
// Helpers
// =============================================================================

fn setup() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path());
    (dir, state)
}

fn state_in(dir: &Path) -> AppState {
    let camera = CameraSession::new(Arc::new(|| {
        Err(QrError::CameraUnavailable("no device".to_string()))
    }));
    AppState::with_camera(AppConfig::in_dir(dir), camera)
}

fn record(code: &str, name: &str, stock: i64, price: i64) -> MedicineRecord {
    MedicineRecord {
        code: code.to_string(),
        name: name.to_string(),
        stock,
        price: Rupiah::new(price),
        input_date: "2024-01-15".to_string(),
    }
}

fn seed(state: &AppState, records: Vec<MedicineRecord>) {
    state
        .storage
        .records()
        .save(&Inventory::from_records(records))
        .unwrap();
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, String) {
    let response = router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, String) {
    send(state, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(state: &AppState, uri: &str, form: &str) -> (StatusCode, String) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(state, request).await
}

async fn post_file(state: &AppState, file_name: &str, bytes: &[u8]) -> (StatusCode, String) {
    let boundary = "klinikboundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::post("/scan-gambar")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(state, request).await
}

fn qr_png(code: &str) -> Vec<u8> {
    let image = QrCodec::default().render(code).unwrap();
    encode_png(&DynamicImage::ImageLuma8(image)).unwrap()
}

// =============================================================================
// Page Enum
// =============================================================================

#[test]
fn test_page_slugs_round_trip() {
    for page in Page::ALL {
        assert_eq!(page.slug().parse::<Page>().unwrap(), page);
    }
    assert!("kasir".parse::<Page>().is_err());
    assert_eq!(Page::ScanImage.to_string(), "🖼️ Scan QR Gambar");
}

// =============================================================================
// Navigation
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (_dir, state) = setup();
    let (status, body) = get(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_index_redirects_to_menu_page() {
    let (_dir, state) = setup();

    let response = router(state.clone())
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");

    let response = router(state.clone())
        .oneshot(Request::get("/?menu=riwayat").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.headers()[header::LOCATION], "/riwayat");

    let (status, _) = get(&state, "/?menu=kasir").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (_dir, state) = setup();
    let (status, body) = get(&state, "/laporan").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Halaman tidak ditemukan"));
}

// =============================================================================
// Dashboard & Lists
// =============================================================================

#[tokio::test]
async fn test_dashboard_totals() {
    let (_dir, state) = setup();
    seed(
        &state,
        vec![record("A1", "Paracetamol", 10, 2000), record("B2", "Amoxicillin", 5, 3000)],
    );

    let (status, body) = get(&state, "/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Jumlah Obat"));
    assert!(body.contains(r#"<div class="value">2</div>"#));
    assert!(body.contains(r#"<div class="value">15</div>"#));
    assert!(body.contains("Rp 35.000"));
}

#[tokio::test]
async fn test_dashboard_on_fresh_directory() {
    let (_dir, state) = setup();
    let (status, body) = get(&state, "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Rp 0"));
}

#[tokio::test]
async fn test_corrupt_inventory_is_visible() {
    let (_dir, state) = setup();
    std::fs::write(
        &state.config.storage.data_file,
        "Kode,Nama Obat,Stok,Harga,Tanggal Input\nA1,Paracetamol,banyak,2000,2024-01-15\n",
    )
    .unwrap();

    let (status, body) = get(&state, "/data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("File data obat rusak"));
}

#[tokio::test]
async fn test_empty_pages_show_info() {
    let (_dir, state) = setup();

    for uri in ["/data", "/edit", "/hapus"] {
        let (status, body) = get(&state, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Belum ada data obat"), "{uri}");
    }

    let (_, body) = get(&state, "/riwayat").await;
    assert!(body.contains("Belum ada data"));
}

#[tokio::test]
async fn test_list_formats_price() {
    let (_dir, state) = setup();
    seed(&state, vec![record("A1", "Paracetamol", 10, 2000)]);

    let (_, body) = get(&state, "/data").await;

    assert!(body.contains("<th>Tanggal Input</th>"));
    assert!(body.contains("<td>Paracetamol</td>"));
    assert!(body.contains("<td>Rp 2.000</td>"));
}

// =============================================================================
// Add / Edit / Delete
// =============================================================================

#[tokio::test]
async fn test_add_requires_code_and_name() {
    let (_dir, state) = setup();

    let (status, body) = post_form(&state, "/tambah", "kode=A1&nama=&stok=10&harga=2000").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Kode dan Nama wajib diisi"));
    assert!(!state.config.storage.data_file.exists());
}

#[tokio::test]
async fn test_add_rejects_non_numeric_stock() {
    let (_dir, state) = setup();

    let (_, body) = post_form(&state, "/tambah", "kode=A1&nama=Paracetamol&stok=x&harga=2000").await;

    assert!(body.contains("Stok is not a number"));
    assert!(!state.config.storage.data_file.exists());
}

#[tokio::test]
async fn test_add_then_reload() {
    let (_dir, state) = setup();

    let (status, body) =
        post_form(&state, "/tambah", "kode=A1&nama=Paracetamol&stok=10&harga=2000").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Data obat berhasil ditambahkan"));

    let inventory = state.storage.records().load().unwrap();
    assert_eq!(inventory.len(), 1);
    let row = &inventory.records()[0];
    assert_eq!(row.code, "A1");
    assert_eq!(row.name, "Paracetamol");
    assert_eq!(row.stock, 10);
    assert_eq!(row.price, Rupiah::new(2000));
    assert!(!row.input_date.is_empty());
}

#[tokio::test]
async fn test_add_code_with_slashes() {
    let (_dir, state) = setup();

    let (status, body) = post_form(
        &state,
        "/tambah",
        "kode=OBT%2F2024%2F01&nama=Paracetamol&stok=10&harga=2000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Data obat berhasil ditambahkan"));

    let inventory = state.storage.records().load().unwrap();
    assert_eq!(inventory.codes(), vec!["OBT/2024/01"]);

    let (status, body) = get(&state, "/data").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("OBT/2024/01"));
}

#[tokio::test]
async fn test_dashboard_survives_huge_values() {
    let (_dir, state) = setup();

    for code in ["X1", "X2"] {
        let form = format!("kode={code}&nama=Infus&stok=1000000000000&harga=10000000000");
        let (_, body) = post_form(&state, "/tambah", &form).await;
        assert!(body.contains("Data obat berhasil ditambahkan"));
    }

    let (status, body) = get(&state, "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("2000000000000"));
    assert!(body.contains(&Rupiah::new(i64::MAX).to_string()));
}

#[tokio::test]
async fn test_edit_updates_stock_only() {
    let (_dir, state) = setup();
    seed(&state, vec![record("A1", "Paracetamol", 10, 2000)]);

    let (_, form) = get(&state, "/edit?kode=A1").await;
    assert!(form.contains(r#"value="Paracetamol""#));

    let (status, body) =
        post_form(&state, "/edit", "kode=A1&nama=Paracetamol&stok=5&harga=2000").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Data obat berhasil diperbarui"));

    let inventory = state.storage.records().load().unwrap();
    let row = inventory.find("A1").unwrap();
    assert_eq!(row.stock, 5);
    assert_eq!(row.name, "Paracetamol");
    assert_eq!(row.price, Rupiah::new(2000));
    assert_eq!(row.input_date, "2024-01-15");
}

#[tokio::test]
async fn test_edit_unknown_code_is_not_found() {
    let (_dir, state) = setup();
    seed(&state, vec![record("A1", "Paracetamol", 10, 2000)]);

    let (status, _) = post_form(&state, "/edit", "kode=Z9&nama=X&stok=1&harga=1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_every_matching_row() {
    let (_dir, state) = setup();
    seed(
        &state,
        vec![
            record("A1", "Paracetamol", 10, 2000),
            record("A1", "Paracetamol", 3, 2000),
        ],
    );

    let (_, page) = get(&state, "/hapus").await;
    assert!(page.contains("Data yang dihapus tidak dapat dikembalikan"));

    let (status, body) = post_form(&state, "/hapus", "kode=A1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Data obat berhasil dihapus"));
    assert!(body.contains("Belum ada data obat"));
    assert!(state.storage.records().load().unwrap().find("A1").is_none());
}

// =============================================================================
// QR
// =============================================================================

#[tokio::test]
async fn test_generate_qr_writes_and_serves_png() {
    let (_dir, state) = setup();

    let (status, body) = post_form(&state, "/generate-qr", "kode=A1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"src="/qr/A1""#));
    assert!(state.codec.image_path("A1").exists());

    let response = router(state.clone())
        .oneshot(Request::get("/qr/A1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn test_generate_qr_with_empty_code_writes_nothing() {
    let (_dir, state) = setup();

    let (status, _) = post_form(&state, "/generate-qr", "kode=+").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!state.codec.output_dir().exists());
}

#[tokio::test]
async fn test_generate_qr_refuses_code_with_slash() {
    let (_dir, state) = setup();

    let (status, body) = post_form(&state, "/generate-qr", "kode=OBT%2F2024%2F01").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Kode tidak valid"));
    assert!(!state.codec.output_dir().exists());
}

#[tokio::test]
async fn test_missing_qr_image_is_not_found() {
    let (_dir, state) = setup();
    let (status, _) = get(&state, "/qr/B2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Image Scan
// =============================================================================

#[tokio::test]
async fn test_image_scan_logs_and_looks_up() {
    let (_dir, state) = setup();
    seed(&state, vec![record("A1", "Paracetamol", 10, 2000)]);

    let (status, body) = post_file(&state, "a1.png", &qr_png("A1")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Kode terbaca: A1"));
    assert!(body.contains("Nama Obat: Paracetamol"));

    let log = state.storage.scan_log().list().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].code, "A1");
}

#[tokio::test]
async fn test_image_without_qr_is_reported() {
    let (_dir, state) = setup();
    let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(120, 120, Luma([255])));

    let (status, body) = post_file(&state, "kosong.png", &encode_png(&blank).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("QR tidak terbaca"));
    assert!(state.storage.scan_log().list().unwrap().is_empty());
}

#[tokio::test]
async fn test_scans_of_same_code_are_separate_rows() {
    let (_dir, state) = setup();
    let png = qr_png("A1");

    post_file(&state, "a1.png", &png).await;
    post_file(&state, "a1.png", &png).await;

    let (_, body) = get(&state, "/riwayat").await;
    assert_eq!(body.matches("<td>A1</td>").count(), 2);
}

// =============================================================================
// Camera
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_camera_failure_is_shown() {
    let (_dir, state) = setup();

    let (_, idle) = get(&state, "/scan-kamera").await;
    assert!(idle.contains("Aktifkan Kamera"));

    let (status, _) = post_form(&state, "/scan-kamera/start", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    for _ in 0..200 {
        if state.camera.status() != CameraStatus::Scanning {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let (status, body) = get(&state, "/scan-kamera").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Kamera tidak tersedia"));
    assert!(body.contains("no device"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_camera_stop_shows_stopping_until_released() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use klinik_qr::{FrameSource, QrResult};

    struct Slow(Arc<AtomicUsize>);

    impl FrameSource for Slow {
        fn next_frame(&mut self) -> QrResult<DynamicImage> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(DynamicImage::ImageLuma8(GrayImage::from_pixel(32, 32, Luma([255]))))
        }
    }

    impl Drop for Slow {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let open = Arc::new(AtomicUsize::new(0));
    let opened = open.clone();
    let camera = CameraSession::new(Arc::new(move || {
        opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(Slow(opened.clone())) as Box<dyn FrameSource>)
    }));
    let state = AppState::with_camera(AppConfig::in_dir(dir.path()), camera);

    post_form(&state, "/scan-kamera/start", "").await;
    for _ in 0..200 {
        if open.load(Ordering::SeqCst) == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    post_form(&state, "/scan-kamera/stop", "").await;
    let (_, body) = get(&state, "/scan-kamera").await;
    assert!(body.contains("Kamera sedang dimatikan"));

    // Start while stopping is ignored
    post_form(&state, "/scan-kamera/start", "").await;
    assert_eq!(state.camera.status(), CameraStatus::Stopping);

    for _ in 0..200 {
        if state.camera.status() == CameraStatus::Idle {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(open.load(Ordering::SeqCst), 0);

    let (_, body) = get(&state, "/scan-kamera").await;
    assert!(body.contains("Aktifkan Kamera"));
}

#[tokio::test]
async fn test_camera_frame_before_scan_is_not_found() {
    let (_dir, state) = setup();
    let (status, _) = get(&state, "/scan-kamera/frame.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
