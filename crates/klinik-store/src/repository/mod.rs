//! # Repository Module
//!
//! One repository per file on disk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and Their Files                         │
//! │                                                                         │
//! │  Page handler                                                          │
//! │       │                                                                 │
//! │       │  storage.records().load()                                      │
//! │       │  storage.scan_log().record_now("A1")                           │
//! │       ▼                                                                 │
//! │  RecordStore ─────────────► data_obat.csv                              │
//! │  ├── load()                  Kode,Nama Obat,Stok,Harga,Tanggal Input   │
//! │  └── save(&inventory)                                                  │
//! │                                                                         │
//! │  ScanLogStore ────────────► scan_log.csv                               │
//! │  ├── append(code, time)      Kode Obat,Waktu Scan                      │
//! │  ├── record_now(code)                                                  │
//! │  └── list()                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`RecordStore`] - Medicine inventory table
//! - [`ScanLogStore`] - Append-only scan history

pub mod records;
pub mod scan_log;

pub use records::{RecordStore, RECORD_COLUMNS};
pub use scan_log::{ScanLogStore, SCAN_LOG_COLUMNS};
