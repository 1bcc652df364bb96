//! # Pages Module
//!
//! One route group per sidebar entry.
//!
//! ## Page Organization
//! ```text
//! pages/
//! ├── mod.rs        ◄─── You are here (Page enum, router)
//! ├── dashboard.rs  ◄─── Jumlah Obat, Total Stok, Total Nilai Obat
//! ├── camera.rs     ◄─── Live camera scan session
//! ├── upload.rs     ◄─── Scan from an uploaded image, writes the scan log
//! ├── qr.rs         ◄─── Generate QR and serve the PNG
//! ├── medicine.rs   ◄─── Tambah / Edit / Hapus / Tampilkan Data
//! └── history.rs    ◄─── Riwayat Scan
//! ```
//!
//! ## How a Page Request Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Page Request Flow                                    │
//! │                                                                         │
//! │  Browser: click "➕ Tambah Obat" in the sidebar                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  GET /tambah ──► medicine::add_form(State<AppState>)                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Browser: fill form, press "💾 Simpan"                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  POST /tambah ──► load CSV ──► Inventory::add ──► save CSV             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Html<String>: same page, success or warning notice on top             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pages change only when the user follows a sidebar link. No handler
//! redirects to a different page after a form submit.

pub mod camera;
pub mod dashboard;
pub mod history;
pub mod medicine;
pub mod qr;
pub mod upload;

use std::fmt;
use std::str::FromStr;

use axum::extract::{DefaultBodyLimit, Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tracing::debug;

use klinik_core::{Inventory, MedicineRecord};

use crate::error::{PageError, PageResult};
use crate::render::PageView;
use crate::state::AppState;

/// Largest accepted upload on the image scan page.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// =============================================================================
// Page Enum
// =============================================================================

/// Sidebar entries, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    ScanCamera,
    ScanImage,
    GenerateQr,
    AddMedicine,
    EditMedicine,
    DeleteMedicine,
    ListMedicines,
    ScanHistory,
}

impl Page {
    /// Every page, top to bottom as the sidebar shows them.
    pub const ALL: [Page; 9] = [
        Page::Dashboard,
        Page::ScanCamera,
        Page::ScanImage,
        Page::GenerateQr,
        Page::AddMedicine,
        Page::EditMedicine,
        Page::DeleteMedicine,
        Page::ListMedicines,
        Page::ScanHistory,
    ];

    /// Sidebar label (without icon).
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::ScanCamera => "Scan QR Kamera",
            Page::ScanImage => "Scan QR Gambar",
            Page::GenerateQr => "Generate QR",
            Page::AddMedicine => "Tambah Obat",
            Page::EditMedicine => "Edit Obat",
            Page::DeleteMedicine => "Hapus Obat",
            Page::ListMedicines => "Tampilkan Data",
            Page::ScanHistory => "Riwayat Scan",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Dashboard => "📊",
            Page::ScanCamera => "📷",
            Page::ScanImage => "🖼️",
            Page::GenerateQr => "🔳",
            Page::AddMedicine => "➕",
            Page::EditMedicine => "✏️",
            Page::DeleteMedicine => "🗑️",
            Page::ListMedicines => "📁",
            Page::ScanHistory => "🕒",
        }
    }

    /// Heading above the page body.
    pub fn heading(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::ScanCamera => "Scan QR Menggunakan Kamera",
            Page::ScanImage => "Scan QR dari Gambar",
            Page::GenerateQr => "Generate QR Code",
            Page::AddMedicine => "Tambah Data Obat",
            Page::EditMedicine => "Edit Data Obat",
            Page::DeleteMedicine => "Hapus Data Obat",
            Page::ListMedicines => "Data Obat",
            Page::ScanHistory => "Riwayat Scan",
        }
    }

    /// URL slug, also accepted by `/?menu=`.
    pub fn slug(&self) -> &'static str {
        &self.path()[1..]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => "/dashboard",
            Page::ScanCamera => "/scan-kamera",
            Page::ScanImage => "/scan-gambar",
            Page::GenerateQr => "/generate-qr",
            Page::AddMedicine => "/tambah",
            Page::EditMedicine => "/edit",
            Page::DeleteMedicine => "/hapus",
            Page::ListMedicines => "/data",
            Page::ScanHistory => "/riwayat",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.label())
    }
}

impl FromStr for Page {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('/');
        Page::ALL
            .into_iter()
            .find(|page| page.slug() == s)
            .ok_or_else(|| PageError::not_found(format!("Menu tidak dikenal: {s}")))
    }
}

// =============================================================================
// Router
// =============================================================================

/// Builds the page router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(Page::Dashboard.path(), get(dashboard::show))
        .route(Page::ScanCamera.path(), get(camera::show))
        .route("/scan-kamera/start", post(camera::start))
        .route("/scan-kamera/stop", post(camera::stop))
        .route("/scan-kamera/frame.png", get(camera::frame))
        .route(Page::ScanImage.path(), get(upload::show).post(upload::submit))
        .route(Page::GenerateQr.path(), get(qr::show).post(qr::generate))
        .route("/qr/{code}", get(qr::image))
        .route(Page::AddMedicine.path(), get(medicine::add_form).post(medicine::add))
        .route(Page::EditMedicine.path(), get(medicine::edit_form).post(medicine::edit))
        .route(Page::DeleteMedicine.path(), get(medicine::delete_form).post(medicine::delete))
        .route(Page::ListMedicines.path(), get(medicine::list))
        .route(Page::ScanHistory.path(), get(history::show))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct MenuQuery {
    menu: Option<String>,
}

/// `/` opens the dashboard, `/?menu=<slug>` opens that page.
async fn index(Query(query): Query<MenuQuery>) -> PageResult<Redirect> {
    let page = match query.menu.as_deref() {
        Some(menu) => menu.parse::<Page>()?,
        None => Page::Dashboard,
    };
    debug!(?page, "Menu selected");
    Ok(Redirect::to(page.path()))
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> PageError {
    PageError::not_found("Halaman tidak ditemukan")
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Loads a fresh copy of the inventory for this request.
pub(crate) fn load_inventory(state: &AppState) -> PageResult<Inventory> {
    Ok(state.storage.records().load()?)
}

/// Renders `view` with the configured clinic name.
pub(crate) fn render(state: &AppState, view: PageView) -> Html<String> {
    view.render(&state.config.display.clinic_name)
}

/// Distinct codes in table order.
pub(crate) fn distinct_codes(inventory: &Inventory) -> Vec<&str> {
    let mut codes: Vec<&str> = Vec::new();
    for code in inventory.codes() {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

/// Detail lines for a looked-up record.
pub(crate) fn record_details(record: &MedicineRecord) -> String {
    format!(
        "Nama Obat: {}\nStok: {}\nHarga: {}",
        record.name, record.stock, record.price
    )
}

#[cfg(test)]
mod tests;
