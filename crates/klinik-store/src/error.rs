//! # Store Error Types
//!
//! Error types for file persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / csv::Error / bad numeric cell                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds line and column context               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PageError (in web app) ← Rendered as an inline error box              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing file is never an error: both stores read it as empty.

use thiserror::Error;

/// File persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure outside the CSV layer.
    ///
    /// ## When This Occurs
    /// - Parent directory cannot be created
    /// - Scan log cannot be opened for append
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader or writer failed.
    ///
    /// ## When This Occurs
    /// - Unreadable file (permissions, invalid UTF-8)
    /// - Broken quoting
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A cell could not be read as the column's type.
    #[error("Malformed value in column '{column}' on line {line}: '{value}'")]
    Malformed {
        line: u64,
        column: String,
        value: String,
    },
}

impl StoreError {
    /// Creates a Malformed error for a cell.
    pub fn malformed(line: u64, column: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Malformed {
            line,
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
