//! # Scan Log Store
//!
//! Append-only history of successful image scans.
//!
//! Every append adds exactly one row. Scanning the same code twice yields two
//! rows; nothing is merged, deduplicated or trimmed.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreResult;
use klinik_core::{ScanLogEntry, SCAN_TIME_FORMAT};

/// Scan log header, in on-disk order.
pub const SCAN_LOG_COLUMNS: [&str; 2] = ["Kode Obat", "Waktu Scan"];

#[derive(Debug, Serialize, Deserialize)]
struct LogRow {
    #[serde(rename = "Kode Obat")]
    code: String,
    #[serde(rename = "Waktu Scan")]
    scanned_at: String,
}

/// Repository for the scan log file.
#[derive(Debug, Clone)]
pub struct ScanLogStore {
    path: PathBuf,
}

impl ScanLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScanLogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry.
    ///
    /// The header is written first when the file is absent or empty.
    pub fn append(&self, code: &str, scanned_at: &str) -> StoreResult<ScanLogEntry> {
        let needs_header = fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        if needs_header {
            writer.write_record(SCAN_LOG_COLUMNS)?;
        }
        writer.serialize(LogRow {
            code: code.to_string(),
            scanned_at: scanned_at.to_string(),
        })?;
        writer.flush()?;

        debug!(path = %self.path.display(), code = %code, "Appended scan log entry");

        Ok(ScanLogEntry {
            code: code.to_string(),
            scanned_at: scanned_at.to_string(),
        })
    }

    /// Appends an entry stamped with the current local time.
    pub fn record_now(&self, code: &str) -> StoreResult<ScanLogEntry> {
        let now = Local::now().format(SCAN_TIME_FORMAT).to_string();
        self.append(code, &now)
    }

    /// All entries in file order. An absent file is an empty log.
    pub fn list(&self) -> StoreResult<Vec<ScanLogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new().from_path(&self.path)?;
        let mut entries = Vec::new();
        for row in reader.deserialize::<LogRow>() {
            let row = row?;
            entries.push(ScanLogEntry {
                code: row.code,
                scanned_at: row.scanned_at,
            });
        }

        debug!(path = %self.path.display(), rows = entries.len(), "Loaded scan log");
        Ok(entries)
    }
}
