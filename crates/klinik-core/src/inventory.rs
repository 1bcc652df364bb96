//! # Inventory Table
//!
//! The in-memory medicine table and the operations the pages perform on it.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Operations                                 │
//! │                                                                         │
//! │  Page Action              Operation               Table Change          │
//! │  ───────────              ─────────               ────────────          │
//! │                                                                         │
//! │  Simpan (add) ──────────► add() ────────────────► rows.push(record)    │
//! │                                                                         │
//! │  Simpan Perubahan ──────► update(code) ─────────► every match replaced │
//! │                                                                         │
//! │  Hapus Data ────────────► remove(code) ─────────► every match dropped  │
//! │                                                                         │
//! │  Dashboard ─────────────► summary() ────────────► (read only)          │
//! │                                                                         │
//! │  NOTE: The table is loaded fresh per request and written back whole    │
//! │        by the store after each mutation.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{InventorySummary, MedicineRecord, MedicineUpdate, NewMedicine};
use crate::validation::{
    validate_medicine_name, validate_price, validate_record_code, validate_stock,
};
use crate::INPUT_DATE_FORMAT;

/// Ordered collection of medicine rows.
///
/// ## Invariants
/// - Insertion order is preserved (and therefore file order)
/// - Codes are NOT unique: lookups take the first match, edits and deletes
///   apply to every match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    records: Vec<MedicineRecord>,
}

impl Inventory {
    /// Creates an empty table.
    pub fn new() -> Self {
        Inventory::default()
    }

    /// Wraps rows read from storage.
    pub fn from_records(records: Vec<MedicineRecord>) -> Self {
        Inventory { records }
    }

    /// All rows in table order.
    pub fn records(&self) -> &[MedicineRecord] {
        &self.records
    }

    /// Consumes the table, returning its rows.
    pub fn into_records(self) -> Vec<MedicineRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Codes in table order, duplicates included. Feeds the select boxes.
    pub fn codes(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.code.as_str()).collect()
    }

    /// First row carrying `code`.
    pub fn find(&self, code: &str) -> Option<&MedicineRecord> {
        self.records.iter().find(|r| r.code == code)
    }

    /// Appends a new row stamped with `today`.
    ///
    /// ## Behavior
    /// - Code and name are required (trimmed); nothing is added otherwise
    /// - Any other code text is kept as typed, separators included
    /// - Stock and price must be non-negative
    /// - An existing code is NOT rejected: a second row is appended
    pub fn add(&mut self, new: NewMedicine, today: NaiveDate) -> CoreResult<&MedicineRecord> {
        validate_record_code(&new.code)?;
        validate_medicine_name(&new.name)?;
        validate_stock(new.stock)?;
        validate_price(new.price)?;

        let record = MedicineRecord {
            code: new.code.trim().to_string(),
            name: new.name.trim().to_string(),
            stock: new.stock,
            price: new.price,
            input_date: today.format(INPUT_DATE_FORMAT).to_string(),
        };

        self.records.push(record);

        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// Replaces name, stock and price on every row matching `code`.
    ///
    /// ## Returns
    /// * `Ok(n)` - number of rows changed (input date and code untouched)
    /// * `Err(CoreError::MedicineNotFound)` - no row has this code
    pub fn update(&mut self, code: &str, update: MedicineUpdate) -> CoreResult<usize> {
        validate_medicine_name(&update.name)?;
        validate_stock(update.stock)?;
        validate_price(update.price)?;

        let name = update.name.trim().to_string();
        let mut changed = 0;
        for record in self.records.iter_mut().filter(|r| r.code == code) {
            record.name = name.clone();
            record.stock = update.stock;
            record.price = update.price;
            changed += 1;
        }

        if changed == 0 {
            return Err(CoreError::MedicineNotFound(code.to_string()));
        }

        Ok(changed)
    }

    /// Removes every row matching `code`. There is no undo.
    pub fn remove(&mut self, code: &str) -> CoreResult<usize> {
        let before = self.records.len();
        self.records.retain(|r| r.code != code);
        let removed = before - self.records.len();

        if removed == 0 {
            return Err(CoreError::MedicineNotFound(code.to_string()));
        }

        Ok(removed)
    }

    /// Dashboard totals over the whole table.
    pub fn summary(&self) -> InventorySummary {
        InventorySummary {
            medicine_count: self.records.len(),
            total_stock: self
                .records
                .iter()
                .fold(0i64, |total, r| total.saturating_add(r.stock)),
            total_value: self.records.iter().map(MedicineRecord::stock_value).sum(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
