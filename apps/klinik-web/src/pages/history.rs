//! # Scan History Page
//!
//! The scan log as a table, in file order.

use axum::extract::State;
use axum::response::Html;

use klinik_store::SCAN_LOG_COLUMNS;

use crate::error::PageResult;
use crate::pages::{render, Page};
use crate::render::{table, Notice, PageView};
use crate::state::AppState;

pub async fn show(State(state): State<AppState>) -> PageResult<Html<String>> {
    let entries = state.storage.scan_log().list()?;
    let view = PageView::new(Page::ScanHistory);

    if entries.is_empty() {
        return Ok(render(&state, view.notice(Notice::info("Belum ada data"))));
    }

    let rows: Vec<Vec<String>> = entries
        .into_iter()
        .map(|entry| vec![entry.code, entry.scanned_at])
        .collect();

    Ok(render(&state, view.body(table(&SCAN_LOG_COLUMNS, &rows))))
}
