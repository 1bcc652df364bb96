//! # klinik-store: Flat-File Persistence for Klinik Sehat
//!
//! This crate reads and writes the two CSV files the clinic keeps on disk:
//! the medicine inventory and the scan log.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Klinik Sehat Data Flow                             │
//! │                                                                         │
//! │  Page handler (tambah, edit, hapus, scan-gambar)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  klinik-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │  RecordStore   │    │ ScanLogStore │  │   │
//! │  │   │ (storage.rs)  │───►│  load / save   │    │ append/list  │  │   │
//! │  │   │ file paths    │───►│  backfill      │    │ header once  │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   data_obat.csv                         scan_log.csv            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - File locations and the `Storage` handle
//! - [`repository`] - Inventory and scan log repositories
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use klinik_store::{Storage, StoreConfig};
//!
//! # fn main() -> Result<(), klinik_store::StoreError> {
//! let storage = Storage::new(StoreConfig::new());
//!
//! let inventory = storage.records().load()?;
//! println!("{} medicines", inventory.len());
//!
//! storage.scan_log().record_now("A1")?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use storage::{Storage, StoreConfig, DEFAULT_DATA_FILE, DEFAULT_LOG_FILE};

pub use repository::records::{RecordStore, RECORD_COLUMNS};
pub use repository::scan_log::{ScanLogStore, SCAN_LOG_COLUMNS};
