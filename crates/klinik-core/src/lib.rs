//! # klinik-core: Pure Business Logic for Klinik Sehat
//!
//! This crate holds the medicine inventory rules as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Klinik Sehat Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser (HTML pages)                         │   │
//! │  │    Dashboard ──► Tambah ──► Edit ──► Hapus ──► Scan ──► QR     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    klinik-web page handlers                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ klinik-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ inventory │  │ validation│  │   │
//! │  │   │ Medicine  │  │  Rupiah   │  │ Inventory │  │   rules   │  │   │
//! │  │   │ ScanLog   │  │  display  │  │  summary  │  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         klinik-store (CSV files)   klinik-qr (QR + camera)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MedicineRecord, ScanLogEntry, InventorySummary)
//! - [`money`] - Rupiah type with integer arithmetic
//! - [`inventory`] - The medicine table and its mutations
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation and number parsing
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use klinik_core::{Inventory, NewMedicine, Rupiah};
//!
//! let mut inventory = Inventory::new();
//! let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
//!
//! inventory
//!     .add(
//!         NewMedicine {
//!             code: "A1".to_string(),
//!             name: "Paracetamol".to_string(),
//!             stock: 10,
//!             price: Rupiah::new(2000),
//!         },
//!         today,
//!     )
//!     .unwrap();
//!
//! assert_eq!(inventory.summary().total_value.to_string(), "Rp 20.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use money::Rupiah;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Format of the `Tanggal Input` column.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of the `Waktu Scan` column.
pub const SCAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder written into cells backfilled for a missing column.
pub const BACKFILL_VALUE: &str = "0";
