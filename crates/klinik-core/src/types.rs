//! # Domain Types
//!
//! Core domain types used throughout Klinik Sehat.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────┐      │
//! │  │ MedicineRecord  │   │  ScanLogEntry   │   │ InventorySummary │      │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────  │      │
//! │  │  code (key)     │   │  code           │   │  medicine_count  │      │
//! │  │  name           │   │  scanned_at     │   │  total_stock     │      │
//! │  │  stock          │   └─────────────────┘   │  total_value     │      │
//! │  │  price (Rupiah) │                         └──────────────────┘      │
//! │  │  input_date     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `code` is the lookup key for edit, delete and scan matching. The table does
//! not enforce uniqueness: adding an existing code yields a second row.

use serde::{Deserialize, Serialize};

use crate::money::Rupiah;

// =============================================================================
// Medicine Record
// =============================================================================

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRecord {
    /// Medicine code, also the QR payload.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Units on hand.
    pub stock: i64,

    /// Unit price.
    pub price: Rupiah,

    /// Date the row was added (`%Y-%m-%d`). Kept as text because rows
    /// backfilled from an older file carry `0` here.
    pub input_date: String,
}

impl MedicineRecord {
    /// Stock value of this row (stock × price).
    #[inline]
    pub fn stock_value(&self) -> Rupiah {
        self.price.times_stock(self.stock)
    }
}

// =============================================================================
// Form Payloads
// =============================================================================

/// Fields entered on the add page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewMedicine {
    pub code: String,
    pub name: String,
    pub stock: i64,
    pub price: Rupiah,
}

/// Fields replaced by the edit page. The code itself is never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineUpdate {
    pub name: String,
    pub stock: i64,
    pub price: Rupiah,
}

// =============================================================================
// Scan Log Entry
// =============================================================================

/// One successful image-based scan. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanLogEntry {
    /// Decoded medicine code.
    pub code: String,

    /// Local time of the scan (`%Y-%m-%d %H:%M:%S`).
    pub scanned_at: String,
}

// =============================================================================
// Dashboard Totals
// =============================================================================

/// Figures shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    /// Number of rows (duplicates counted separately).
    pub medicine_count: usize,

    /// Sum of stock over all rows.
    pub total_stock: i64,

    /// Sum of stock × price over all rows.
    pub total_value: Rupiah,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_value() {
        let record = MedicineRecord {
            code: "A1".to_string(),
            name: "Paracetamol".to_string(),
            stock: 10,
            price: Rupiah::new(2000),
            input_date: "2026-10-17".to_string(),
        };
        assert_eq!(record.stock_value(), Rupiah::new(20_000));
    }

    #[test]
    fn test_summary_default_is_zero() {
        let summary = InventorySummary::default();
        assert_eq!(summary.medicine_count, 0);
        assert_eq!(summary.total_stock, 0);
        assert!(summary.total_value.is_zero());
    }
}
