//! # Generate QR Page
//!
//! Writes `{qr_dir}/{code}.png` and shows it. The PNG is served from
//! `/qr/{code}` straight off disk.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tracing::info;

use klinik_core::validation::validate_code;
use klinik_core::CoreError;
use klinik_qr::QrError;

use crate::error::{PageError, PageResult};
use crate::pages::{render, Page};
use crate::render::{encode_component, escape, Notice, PageView};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct QrForm {
    #[serde(default)]
    pub kode: String,
}

fn form(code: &str) -> String {
    format!(
        r#"<form class="stacked" method="post" action="/generate-qr">
<label>Masukkan Kode <input type="text" name="kode" value="{}"></label>
<button type="submit">Generate</button>
</form>"#,
        escape(code)
    )
}

pub async fn show(State(state): State<AppState>) -> Html<String> {
    render(&state, PageView::new(Page::GenerateQr).body(form("")))
}

pub async fn generate(
    State(state): State<AppState>,
    Form(input): Form<QrForm>,
) -> PageResult<Html<String>> {
    let code = input.kode.trim().to_string();
    let view = PageView::new(Page::GenerateQr);

    if code.is_empty() {
        return Ok(render(&state, view.body(form(""))));
    }

    let codec = state.codec.clone();
    let target = code.clone();
    let encoded = tokio::task::spawn_blocking(move || codec.encode(&target))
        .await
        .map_err(|e| PageError::internal(format!("Gagal membuat QR: {e}")))?;

    let view = match encoded {
        Ok(path) => {
            info!(code = %code, path = %path.display(), "QR code generated");
            let src = format!("/qr/{}", encode_component(&code));
            view.body(format!(
                r#"{}<figure><img src="{src}" alt="QR {label}" width="232"><figcaption>QR Code untuk {label}</figcaption></figure><p><a href="{src}" download="{label}.png">⬇️ Unduh QR</a></p>"#,
                form(&code),
                label = escape(&code),
            ))
        }
        Err(QrError::InvalidCode(reason)) => view
            .notice(Notice::warning(format!("⚠️ Kode tidak valid: {reason}")))
            .body(form(&code)),
        Err(other) => return Err(other.into()),
    };

    Ok(render(&state, view))
}

/// Serves a generated QR PNG.
pub async fn image(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> PageResult<Response> {
    validate_code(&code).map_err(CoreError::from)?;

    let path = state.codec.image_path(code.trim());
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PageError::not_found("QR Code belum dibuat"));
        }
        Err(e) => return Err(QrError::from(e).into()),
    };

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}
