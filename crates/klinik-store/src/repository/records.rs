//! # Record Store
//!
//! Loads and saves the medicine inventory file.
//!
//! ## Schema Repair on Load
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How load() Reads the File                            │
//! │                                                                         │
//! │  data_obat.csv absent ────────────────► empty Inventory (no file made) │
//! │                                                                         │
//! │  Header: Kode,Nama Obat,Stok,Harga                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Map each canonical column to its position in the header               │
//! │  ┌──────────────┬──────────┐                                           │
//! │  │ Kode         │ 0        │                                           │
//! │  │ Nama Obat    │ 1        │                                           │
//! │  │ Stok         │ 2        │                                           │
//! │  │ Harga        │ 3        │                                           │
//! │  │ Tanggal Input│ missing  │ ← every row gets "0"                      │
//! │  └──────────────┴──────────┘                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Anything missing? ──yes──► save() immediately, canonical order        │
//! │                                                                         │
//! │  Columns outside the schema are skipped (and vanish on next save).     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use klinik_core::validation::parse_amount;
use klinik_core::{Inventory, MedicineRecord, Rupiah, BACKFILL_VALUE};

/// Inventory file header, in on-disk order.
pub const RECORD_COLUMNS: [&str; 5] = ["Kode", "Nama Obat", "Stok", "Harga", "Tanggal Input"];

const CODE: usize = 0;
const NAME: usize = 1;
const STOCK: usize = 2;
const PRICE: usize = 3;
const INPUT_DATE: usize = 4;

/// One inventory row as written to disk.
#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    #[serde(rename = "Kode")]
    code: &'a str,
    #[serde(rename = "Nama Obat")]
    name: &'a str,
    #[serde(rename = "Stok")]
    stock: i64,
    #[serde(rename = "Harga")]
    price: i64,
    #[serde(rename = "Tanggal Input")]
    input_date: &'a str,
}

impl<'a> From<&'a MedicineRecord> for RecordRow<'a> {
    fn from(record: &'a MedicineRecord) -> Self {
        RecordRow {
            code: &record.code,
            name: &record.name,
            stock: record.stock,
            price: record.price.amount(),
            input_date: &record.input_date,
        }
    }
}

/// Repository for the inventory file.
///
/// ## Usage
/// ```rust,ignore
/// let store = RecordStore::new("data_obat.csv");
///
/// let mut inventory = store.load()?;
/// inventory.remove("A1")?;
/// store.save(&inventory)?;
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Creates a store for the file at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordStore { path: path.into() }
    }

    /// Location of the inventory file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole inventory.
    ///
    /// ## Returns
    /// * `Ok(Inventory)` - rows in file order; empty when the file is absent
    /// * `Err(StoreError::Csv)` - file unreadable or not valid CSV
    /// * `Err(StoreError::Malformed)` - a Stok/Harga cell is not a number
    ///
    /// When any canonical column was missing, the backfilled table is written
    /// back before returning.
    pub fn load(&self) -> StoreResult<Inventory> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Inventory file absent, starting empty");
            return Ok(Inventory::new());
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let positions: Vec<Option<usize>> = RECORD_COLUMNS
            .iter()
            .map(|column| headers.iter().position(|h| h.trim() == *column))
            .collect();

        for header in headers.iter() {
            let header = header.trim();
            if !header.is_empty() && !RECORD_COLUMNS.contains(&header) {
                warn!(column = %header, path = %self.path.display(), "Ignoring unknown column");
            }
        }

        let missing: Vec<&str> = RECORD_COLUMNS
            .iter()
            .zip(&positions)
            .filter(|(_, position)| position.is_none())
            .map(|(column, _)| *column)
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            records.push(MedicineRecord {
                code: cell(&row, positions[CODE]).to_string(),
                name: cell(&row, positions[NAME]).to_string(),
                stock: parse_cell(line, STOCK, cell(&row, positions[STOCK]))?,
                price: Rupiah::new(parse_cell(line, PRICE, cell(&row, positions[PRICE]))?),
                input_date: cell(&row, positions[INPUT_DATE]).to_string(),
            });
        }

        let inventory = Inventory::from_records(records);

        if !missing.is_empty() {
            info!(
                path = %self.path.display(),
                missing = ?missing,
                "Backfilled missing columns, rewriting inventory file"
            );
            self.save(&inventory)?;
        }

        debug!(path = %self.path.display(), rows = inventory.len(), "Loaded inventory");
        Ok(inventory)
    }

    /// Overwrites the file with `inventory`, header first.
    ///
    /// A crash mid-write can leave a truncated file.
    pub fn save(&self, inventory: &Inventory) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        writer.write_record(RECORD_COLUMNS)?;
        for record in inventory.records() {
            writer.serialize(RecordRow::from(record))?;
        }
        writer.flush()?;

        debug!(path = %self.path.display(), rows = inventory.len(), "Saved inventory");
        Ok(())
    }
}

/// Cell text for a canonical column; backfilled when the column is absent.
fn cell(row: &StringRecord, position: Option<usize>) -> &str {
    match position {
        Some(index) => row.get(index).unwrap_or(""),
        None => BACKFILL_VALUE,
    }
}

fn parse_cell(line: u64, column: usize, raw: &str) -> StoreResult<i64> {
    parse_amount(RECORD_COLUMNS[column], raw)
        .map_err(|_| StoreError::malformed(line, RECORD_COLUMNS[column], raw))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use klinik_core::{MedicineUpdate, NewMedicine};
    use tempfile::TempDir;

    fn setup() -> (TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("data_obat.csv"));
        (dir, store)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn add_paracetamol(store: &RecordStore) {
        let mut inventory = store.load().unwrap();
        inventory
            .add(
                NewMedicine {
                    code: "A1".to_string(),
                    name: "Paracetamol".to_string(),
                    stock: 10,
                    price: Rupiah::new(2000),
                },
                today(),
            )
            .unwrap();
        store.save(&inventory).unwrap();
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, store) = setup();

        let inventory = store.load().unwrap();

        assert!(inventory.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_writes_canonical_header() {
        let (_dir, store) = setup();

        store.save(&Inventory::new()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "Kode,Nama Obat,Stok,Harga,Tanggal Input\n");
    }

    #[test]
    fn test_add_then_reload() {
        let (_dir, store) = setup();
        add_paracetamol(&store);

        let inventory = store.load().unwrap();
        assert_eq!(inventory.len(), 1);

        let record = &inventory.records()[0];
        assert_eq!(record.code, "A1");
        assert_eq!(record.name, "Paracetamol");
        assert_eq!(record.stock, 10);
        assert_eq!(record.price, Rupiah::new(2000));
        assert_eq!(record.input_date, "2026-10-17");
    }

    #[test]
    fn test_edit_then_reload() {
        let (_dir, store) = setup();
        add_paracetamol(&store);

        let mut inventory = store.load().unwrap();
        inventory
            .update(
                "A1",
                MedicineUpdate {
                    name: "Paracetamol".to_string(),
                    stock: 5,
                    price: Rupiah::new(2000),
                },
            )
            .unwrap();
        store.save(&inventory).unwrap();

        let reloaded = store.load().unwrap();
        let record = reloaded.find("A1").unwrap();
        assert_eq!(record.stock, 5);
        assert_eq!(record.name, "Paracetamol");
        assert_eq!(record.price, Rupiah::new(2000));
        assert_eq!(record.input_date, "2026-10-17");
    }

    #[test]
    fn test_delete_then_reload() {
        let (_dir, store) = setup();
        add_paracetamol(&store);
        add_paracetamol(&store);

        let mut inventory = store.load().unwrap();
        inventory.remove("A1").unwrap();
        store.save(&inventory).unwrap();

        let reloaded = store.load().unwrap();
        assert!(reloaded.find("A1").is_none());
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_missing_column_is_backfilled_and_persisted() {
        let (_dir, store) = setup();
        fs::write(store.path(), "Kode,Nama Obat,Stok,Harga\nA1,Paracetamol,10,2000\n").unwrap();

        let inventory = store.load().unwrap();
        assert_eq!(inventory.records()[0].input_date, "0");

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "Kode,Nama Obat,Stok,Harga,Tanggal Input\nA1,Paracetamol,10,2000,0\n"
        );
    }

    #[test]
    fn test_missing_numeric_column_reads_zero() {
        let (_dir, store) = setup();
        fs::write(store.path(), "Kode,Nama Obat,Harga,Tanggal Input\nA1,Paracetamol,2000,2026-10-17\n")
            .unwrap();

        let inventory = store.load().unwrap();
        assert_eq!(inventory.records()[0].stock, 0);
        assert_eq!(inventory.records()[0].price, Rupiah::new(2000));
    }

    #[test]
    fn test_complete_file_is_not_rewritten() {
        let (_dir, store) = setup();
        let original = "Kode,Nama Obat,Stok,Harga,Tanggal Input\nA1,Paracetamol,10,2000.0,2026-10-17\n";
        fs::write(store.path(), original).unwrap();

        let inventory = store.load().unwrap();
        assert_eq!(inventory.records()[0].price, Rupiah::new(2000));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), original);
    }

    #[test]
    fn test_empty_numeric_cell_reads_zero() {
        let (_dir, store) = setup();
        fs::write(
            store.path(),
            "Kode,Nama Obat,Stok,Harga,Tanggal Input\nA1,Paracetamol,,2000,2026-10-17\n",
        )
        .unwrap();

        let inventory = store.load().unwrap();
        assert_eq!(inventory.records()[0].stock, 0);
    }

    #[test]
    fn test_non_numeric_stock_is_malformed() {
        let (_dir, store) = setup();
        fs::write(
            store.path(),
            "Kode,Nama Obat,Stok,Harga,Tanggal Input\nA1,Paracetamol,sepuluh,2000,2026-10-17\n",
        )
        .unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            StoreError::Malformed { ref column, ref value, .. } if column == "Stok" && value == "sepuluh"
        ));
    }

    #[test]
    fn test_unknown_column_is_ignored() {
        let (_dir, store) = setup();
        fs::write(
            store.path(),
            "Kode,Nama Obat,Stok,Harga,Tanggal Input,Catatan\nA1,Paracetamol,10,2000,2026-10-17,x\n",
        )
        .unwrap();

        let inventory = store.load().unwrap();
        store.save(&inventory).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(!content.contains("Catatan"));
        assert_eq!(inventory.records()[0].stock, 10);
    }

    #[test]
    fn test_save_quotes_commas_in_names() {
        let (_dir, store) = setup();
        let inventory = Inventory::from_records(vec![MedicineRecord {
            code: "B2".to_string(),
            name: "Obat Batuk, Sirup".to_string(),
            stock: 3,
            price: Rupiah::new(15_000),
            input_date: "2026-10-17".to_string(),
        }]);

        store.save(&inventory).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.records()[0].name, "Obat Batuk, Sirup");
    }
}
