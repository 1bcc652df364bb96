//! # Medicine Pages
//!
//! Add, edit, delete and list rows of the inventory table.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Form Submit                                      │
//! │                                                                         │
//! │  POST /tambah | /edit | /hapus                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse text fields ──(not a number)──► warning, nothing written        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RecordStore::load  (fresh from disk)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Inventory::add / update / remove ──(invalid)──► warning               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RecordStore::save  (whole file rewritten)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  same page, ✅ success notice                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Number fields arrive as text so an empty or malformed entry becomes a
//! notice instead of a rejected request.

use axum::extract::{Query, State};
use axum::response::Html;
use axum::Form;
use chrono::Local;
use serde::Deserialize;
use tracing::info;

use klinik_core::validation::parse_amount;
use klinik_core::{
    CoreError, Inventory, MedicineRecord, MedicineUpdate, NewMedicine, Rupiah, ValidationError,
};
use klinik_store::RECORD_COLUMNS;

use crate::error::PageResult;
use crate::pages::{distinct_codes, load_inventory, render, Page};
use crate::render::{code_select, escape, table, Notice, PageView};
use crate::state::AppState;

const EMPTY_INVENTORY: &str = "Belum ada data obat";

// =============================================================================
// Form Payloads
// =============================================================================

/// Fields of the add and edit forms, as typed.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MedicineForm {
    #[serde(default)]
    pub kode: String,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub stok: String,
    #[serde(default)]
    pub harga: String,
}

impl MedicineForm {
    fn from_record(record: &MedicineRecord) -> Self {
        MedicineForm {
            kode: record.code.clone(),
            nama: record.name.clone(),
            stok: record.stock.to_string(),
            harga: record.price.amount().to_string(),
        }
    }

    /// Parses stock and price. Empty fields count as 0.
    fn amounts(&self) -> Result<(i64, Rupiah), ValidationError> {
        let stock = parse_amount("Stok", &self.stok)?;
        let price = parse_amount("Harga", &self.harga)?;
        Ok((stock, Rupiah::new(price)))
    }
}

/// `?kode=` on the edit and delete pages.
#[derive(Debug, Default, Deserialize)]
pub struct CodeQuery {
    pub kode: Option<String>,
}

/// Delete form: only the code.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub kode: String,
}

// =============================================================================
// Form Markup
// =============================================================================

fn number_input(label: &str, name: &str, value: &str, step: u32) -> String {
    format!(
        r#"<label>{label} <input type="number" name="{name}" value="{}" min="0" step="{step}"></label>"#,
        escape(value)
    )
}

fn add_markup(form: &MedicineForm) -> String {
    format!(
        r#"<form class="stacked" method="post" action="/tambah">
<label>Kode Obat <input type="text" name="kode" value="{}"></label>
<label>Nama Obat <input type="text" name="nama" value="{}"></label>
{}
{}
<button type="submit">💾 Simpan</button>
</form>"#,
        escape(&form.kode),
        escape(&form.nama),
        number_input("Stok", "stok", &form.stok, 1),
        number_input("Harga", "harga", &form.harga, 1000),
    )
}

/// Code picker that reloads the page with `?kode=`.
fn picker_markup(page: Page, codes: &[&str], selected: &str) -> String {
    format!(
        r#"<form method="get" action="{}"><label>Pilih Kode Obat {}</label> <noscript><button type="submit">Pilih</button></noscript></form>"#,
        page.path(),
        code_select("kode", codes, selected)
    )
}

fn edit_markup(form: &MedicineForm) -> String {
    format!(
        r#"<form class="stacked" method="post" action="/edit">
<input type="hidden" name="kode" value="{}">
<label>Nama Obat <input type="text" name="nama" value="{}"></label>
{}
{}
<button type="submit">💾 Simpan Perubahan</button>
</form>"#,
        escape(&form.kode),
        escape(&form.nama),
        number_input("Stok", "stok", &form.stok, 1),
        number_input("Harga", "harga", &form.harga, 1000),
    )
}

fn delete_markup(record: &MedicineRecord) -> String {
    format!(
        r#"<p>{} · {}</p><form method="post" action="/hapus">
<input type="hidden" name="kode" value="{}">
<button type="submit">❌ Hapus Data</button>
</form>"#,
        escape(&record.code),
        escape(&record.name),
        escape(&record.code),
    )
}

/// Picks `wanted` when it is in the table, else the first code.
fn select_code<'a>(codes: &[&'a str], wanted: Option<&str>) -> Option<&'a str> {
    wanted
        .and_then(|w| codes.iter().copied().find(|c| *c == w))
        .or_else(|| codes.first().copied())
}

/// Turns a rejected form into a warning; other errors keep propagating.
fn warning_for(err: CoreError) -> PageResult<Notice> {
    match err {
        CoreError::Validation(e) => Ok(Notice::warning(format!("⚠️ {e}"))),
        other => Err(other.into()),
    }
}

// =============================================================================
// Tambah Obat
// =============================================================================

pub async fn add_form(State(state): State<AppState>) -> Html<String> {
    let view = PageView::new(Page::AddMedicine).body(add_markup(&MedicineForm::default()));
    render(&state, view)
}

pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<MedicineForm>,
) -> PageResult<Html<String>> {
    let view = PageView::new(Page::AddMedicine);

    if form.kode.trim().is_empty() || form.nama.trim().is_empty() {
        let view = view
            .notice(Notice::warning("⚠️ Kode dan Nama wajib diisi"))
            .body(add_markup(&form));
        return Ok(render(&state, view));
    }

    let (stock, price) = match form.amounts() {
        Ok(amounts) => amounts,
        Err(e) => {
            let view = view
                .notice(Notice::warning(format!("⚠️ {e}")))
                .body(add_markup(&form));
            return Ok(render(&state, view));
        }
    };

    let mut inventory = load_inventory(&state)?;
    let new = NewMedicine {
        code: form.kode.clone(),
        name: form.nama.clone(),
        stock,
        price,
    };

    match inventory.add(new, Local::now().date_naive()) {
        Ok(record) => info!(code = %record.code, name = %record.name, "Medicine added"),
        Err(e) => {
            let view = view.notice(warning_for(e)?).body(add_markup(&form));
            return Ok(render(&state, view));
        }
    }

    state.storage.records().save(&inventory)?;

    let view = view
        .notice(Notice::success("✅ Data obat berhasil ditambahkan"))
        .body(add_markup(&MedicineForm::default()));
    Ok(render(&state, view))
}

// =============================================================================
// Edit Obat
// =============================================================================

fn edit_page(inventory: &Inventory, wanted: Option<&str>, notices: Vec<Notice>) -> PageView {
    let view = PageView::new(Page::EditMedicine).notices(notices);

    let codes = distinct_codes(inventory);
    let Some(selected) = select_code(&codes, wanted) else {
        return view.notice(Notice::info(EMPTY_INVENTORY));
    };

    let mut body = picker_markup(Page::EditMedicine, &codes, selected);
    if let Some(record) = inventory.find(selected) {
        body.push_str(&edit_markup(&MedicineForm::from_record(record)));
    }
    view.body(body)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Query(query): Query<CodeQuery>,
) -> PageResult<Html<String>> {
    let inventory = load_inventory(&state)?;
    let view = edit_page(&inventory, query.kode.as_deref(), Vec::new());
    Ok(render(&state, view))
}

pub async fn edit(
    State(state): State<AppState>,
    Form(form): Form<MedicineForm>,
) -> PageResult<Html<String>> {
    let mut inventory = load_inventory(&state)?;

    let notice = match form.amounts() {
        Err(e) => Notice::warning(format!("⚠️ {e}")),
        Ok((stock, price)) => {
            let update = MedicineUpdate {
                name: form.nama.clone(),
                stock,
                price,
            };
            match inventory.update(&form.kode, update) {
                Ok(rows) => {
                    state.storage.records().save(&inventory)?;
                    info!(code = %form.kode, rows, "Medicine updated");
                    Notice::success("✅ Data obat berhasil diperbarui")
                }
                Err(e) => warning_for(e)?,
            }
        }
    };

    let view = edit_page(&inventory, Some(&form.kode), vec![notice]);
    Ok(render(&state, view))
}

// =============================================================================
// Hapus Obat
// =============================================================================

fn delete_page(inventory: &Inventory, wanted: Option<&str>, notices: Vec<Notice>) -> PageView {
    let view = PageView::new(Page::DeleteMedicine).notices(notices);

    let codes = distinct_codes(inventory);
    let Some(selected) = select_code(&codes, wanted) else {
        return view.notice(Notice::info(EMPTY_INVENTORY));
    };

    let mut body = picker_markup(Page::DeleteMedicine, &codes, selected);
    if let Some(record) = inventory.find(selected) {
        body.push_str(&delete_markup(record));
    }
    view.notice(Notice::warning("⚠️ Data yang dihapus tidak dapat dikembalikan"))
        .body(body)
}

pub async fn delete_form(
    State(state): State<AppState>,
    Query(query): Query<CodeQuery>,
) -> PageResult<Html<String>> {
    let inventory = load_inventory(&state)?;
    let view = delete_page(&inventory, query.kode.as_deref(), Vec::new());
    Ok(render(&state, view))
}

pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> PageResult<Html<String>> {
    let mut inventory = load_inventory(&state)?;

    let rows = inventory.remove(&form.kode)?;
    state.storage.records().save(&inventory)?;
    info!(code = %form.kode, rows, "Medicine deleted");

    let notices = vec![Notice::success("✅ Data obat berhasil dihapus")];
    Ok(render(&state, delete_page(&inventory, None, notices)))
}

// =============================================================================
// Tampilkan Data
// =============================================================================

pub async fn list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let inventory = load_inventory(&state)?;
    let view = PageView::new(Page::ListMedicines);

    if inventory.is_empty() {
        return Ok(render(&state, view.notice(Notice::info(EMPTY_INVENTORY))));
    }

    let rows: Vec<Vec<String>> = inventory
        .records()
        .iter()
        .map(|r| {
            vec![
                r.code.clone(),
                r.name.clone(),
                r.stock.to_string(),
                r.price.to_string(),
                r.input_date.clone(),
            ]
        })
        .collect();

    Ok(render(&state, view.body(table(&RECORD_COLUMNS, &rows))))
}
