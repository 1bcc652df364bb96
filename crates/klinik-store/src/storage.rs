//! # Storage Handle
//!
//! File locations and the handle page handlers use to reach both stores.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storage Lifecycle                                  │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new() ← Default file names in the working directory      │
//! │       │                .data_file(..) / .log_file(..) from config      │
//! │       ▼                                                                 │
//! │  Storage::new(config) ← No file is opened or created yet               │
//! │       │                                                                 │
//! │       │ Every request                                                   │
//! │       ▼                                                                 │
//! │  storage.records().load()   ──► fresh Inventory from disk              │
//! │  storage.scan_log().append  ──► one more row                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no cache and no lock. Two writers racing on the inventory file
//! means the last full rewrite wins.

use std::path::PathBuf;

use tracing::info;

use crate::repository::{RecordStore, ScanLogStore};

/// Default inventory file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data_obat.csv";

/// Default scan log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "scan_log.csv";

// =============================================================================
// Configuration
// =============================================================================

/// File locations.
///
/// ## Example
/// ```rust
/// use klinik_store::StoreConfig;
///
/// let config = StoreConfig::new()
///     .data_file("/srv/klinik/data_obat.csv")
///     .log_file("/srv/klinik/scan_log.csv");
///
/// assert!(config.data_file.ends_with("data_obat.csv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Inventory table.
    /// Default: `data_obat.csv`
    pub data_file: PathBuf,

    /// Scan log.
    /// Default: `scan_log.csv`
    pub log_file: PathBuf,
}

impl StoreConfig {
    /// Creates a configuration with the default file names.
    pub fn new() -> Self {
        StoreConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    /// Both files inside `dir`, keeping the default names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        StoreConfig {
            data_file: dir.join(DEFAULT_DATA_FILE),
            log_file: dir.join(DEFAULT_LOG_FILE),
        }
    }

    /// Sets the inventory file.
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Sets the scan log file.
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new()
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Handle giving access to both repositories.
///
/// ## Usage in Page Handlers
/// ```rust,ignore
/// async fn dashboard(State(state): State<AppState>) -> PageResult<Html<String>> {
///     let inventory = state.storage.records().load()?;
///     let summary = inventory.summary();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    config: StoreConfig,
}

impl Storage {
    /// Creates the handle. Files are only touched by repository calls.
    pub fn new(config: StoreConfig) -> Self {
        info!(
            data_file = %config.data_file.display(),
            log_file = %config.log_file.display(),
            "Storage configured"
        );
        Storage { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the inventory repository.
    pub fn records(&self) -> RecordStore {
        RecordStore::new(self.config.data_file.clone())
    }

    /// Returns the scan log repository.
    pub fn scan_log(&self) -> ScanLogStore {
        ScanLogStore::new(self.config.log_file.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
