//! # Image Scan Page
//!
//! Upload a PNG/JPG, decode the QR code in it, log the scan.
//!
//! ```text
//! POST /scan-gambar (multipart "file")
//!     │
//!     ▼
//! decode_bytes (blocking pool)
//!     ├── Some(code) ──► scan_log.append(code, now) ──► "Kode terbaca: A1"
//!     │                                                  + record lookup
//!     └── None ───────► "QR tidak terbaca"
//! ```

use axum::extract::{Multipart, State};
use axum::response::Html;
use tracing::{debug, info};

use klinik_qr::decode_bytes;

use crate::error::{PageError, PageResult};
use crate::pages::{load_inventory, record_details, render, Page};
use crate::render::{Notice, PageView};
use crate::state::AppState;

/// File extensions the upload form accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

const UPLOAD_FORM: &str = r#"<form class="stacked" method="post" action="/scan-gambar" enctype="multipart/form-data">
<label>Upload Gambar QR <input type="file" name="file" accept=".png,.jpg,.jpeg" required></label>
<button type="submit">🔍 Scan Gambar</button>
</form>"#;

pub async fn show(State(state): State<AppState>) -> Html<String> {
    render(&state, PageView::new(Page::ScanImage).body(UPLOAD_FORM))
}

pub async fn submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> PageResult<Html<String>> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        upload = Some((file_name, bytes));
    }

    let view = PageView::new(Page::ScanImage);

    let Some((file_name, bytes)) = upload.filter(|(_, bytes)| !bytes.is_empty()) else {
        let view = view.notice(Notice::warning("Pilih gambar terlebih dahulu"));
        return Ok(render(&state, view.body(UPLOAD_FORM)));
    };

    if let Some(name) = file_name.as_deref() {
        if !has_accepted_extension(name) {
            let view = view.notice(Notice::warning("Format gambar harus PNG atau JPG"));
            return Ok(render(&state, view.body(UPLOAD_FORM)));
        }
    }

    debug!(file = ?file_name, size = bytes.len(), "Decoding uploaded image");

    let decoded = tokio::task::spawn_blocking(move || decode_bytes(&bytes))
        .await
        .map_err(|e| PageError::internal(format!("Gagal memproses gambar: {e}")))?;

    let view = match decoded {
        Some(code) => {
            let entry = state.storage.scan_log().record_now(&code)?;
            info!(code = %entry.code, at = %entry.scanned_at, "Image scan logged");

            let inventory = load_inventory(&state)?;
            let lookup = match inventory.find(&code) {
                Some(record) => Notice::info(record_details(record)),
                None => Notice::warning("Data obat tidak ditemukan"),
            };
            view.notice(Notice::success(format!("Kode terbaca: {code}")))
                .notice(lookup)
        }
        None => view.notice(Notice::error("QR tidak terbaca")),
    };

    Ok(render(&state, view.body(UPLOAD_FORM)))
}

/// `true` for `.png`, `.jpg` and `.jpeg` (any case).
pub fn has_accepted_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_extensions() {
        assert!(has_accepted_extension("qr.png"));
        assert!(has_accepted_extension("FOTO.JPG"));
        assert!(has_accepted_extension("scan.final.jpeg"));
        assert!(!has_accepted_extension("qr.gif"));
        assert!(!has_accepted_extension("qr"));
    }
}
