//! # Error Types
//!
//! Domain-specific error types for klinik-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  klinik-core errors (this file)                                        │
//! │  ├── CoreError        - Inventory rule violations                      │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  klinik-store errors (separate crate)                                  │
//! │  └── StoreError       - CSV read/write failures                        │
//! │                                                                         │
//! │  klinik-qr errors (separate crate)                                     │
//! │  └── QrError          - Encode, image, camera failures                 │
//! │                                                                         │
//! │  Web errors (in app)                                                   │
//! │  └── PageError        - What the browser sees (inline message)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, field, value)
//! 3. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Inventory rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No row carries the requested medicine code.
    ///
    /// ## When This Occurs
    /// - Edit or delete submitted for a code removed in the meantime
    /// - A scanned QR payload that is not in the table
    #[error("Medicine not found: {0}")]
    MedicineNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// Used for early validation before the table is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a path separator inside a medicine code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Text that should have been a number.
    #[error("{field} is not a number: '{value}'")]
    InvalidNumber { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MedicineNotFound("A1".to_string());
        assert_eq!(err.to_string(), "Medicine not found: A1");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::InvalidNumber {
            field: "stock".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "stock is not a number: 'ten'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
