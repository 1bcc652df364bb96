//! # Dashboard Page
//!
//! Three figures over the whole inventory table:
//!
//! ```text
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────────┐
//! │ Jumlah Obat     │ │ Total Stok      │ │ Total Nilai Obat    │
//! │ rows            │ │ Σ stock         │ │ Σ stock × price     │
//! └─────────────────┘ └─────────────────┘ └─────────────────────┘
//! ```
//!
//! Duplicate codes count as separate rows.

use axum::extract::State;
use axum::response::Html;
use tracing::debug;

use crate::error::PageResult;
use crate::pages::{load_inventory, render, Page};
use crate::render::{metric, PageView};
use crate::state::AppState;

pub async fn show(State(state): State<AppState>) -> PageResult<Html<String>> {
    let summary = load_inventory(&state)?.summary();
    debug!(?summary, "Dashboard totals");

    let body = format!(
        r#"<div class="metrics">{}{}{}</div>"#,
        metric("Jumlah Obat", &summary.medicine_count.to_string()),
        metric("Total Stok", &summary.total_stock.to_string()),
        metric("Total Nilai Obat", &summary.total_value.to_string()),
    );

    Ok(render(&state, PageView::new(Page::Dashboard).body(body)))
}
