//! # Validation Module
//!
//! Input validation utilities for Klinik Sehat.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTML form                                                    │
//! │  ├── required / min="0" attributes                                     │
//! │  └── Immediate browser feedback                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Page handler (Rust)                                          │
//! │  ├── Text → number parsing (parse_amount)                              │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory operations                                         │
//! │  └── Re-validate before mutating the table                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use klinik_core::validation::{validate_code, parse_amount};
//!
//! validate_code("A1").unwrap();
//! assert_eq!(parse_amount("stock", "10").unwrap(), 10);
//! ```

use crate::error::ValidationError;
use crate::money::Rupiah;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest code accepted as a QR file name.
pub const MAX_CODE_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a medicine code as stored in the inventory.
///
/// Any non-blank text is a valid code; `OBT/2024/01` is stored as typed.
/// Use [`validate_code`] where the code becomes a file name.
///
/// ## Example
/// ```rust
/// use klinik_core::validation::validate_record_code;
///
/// assert!(validate_record_code("OBT/2024/01").is_ok());
/// assert!(validate_record_code("  ").is_err());
/// ```
pub fn validate_record_code(code: &str) -> ValidationResult<()> {
    required("code", code)
}

/// Validates a medicine code used as the QR image file name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 64 characters
/// - No `/`, `\` and not `.`/`..`: the code names the generated QR file
///
/// ## Example
/// ```rust
/// use klinik_core::validation::validate_code;
///
/// assert!(validate_code("PCT-500").is_ok());
/// assert!(validate_code("").is_err());
/// assert!(validate_code("../etc").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<()> {
    required("code", code)?;
    let code = code.trim();

    if code.chars().count() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if code.contains(['/', '\\']) || code == "." || code == ".." || code.contains('\0') {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must not contain path separators".to_string(),
        });
    }

    Ok(())
}

/// Validates a medicine name. Must not be blank.
pub fn validate_medicine_name(name: &str) -> ValidationResult<()> {
    required("name", name)
}

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock level. Zero is allowed (out of stock).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free samples).
///
/// ## Example
/// ```rust
/// use klinik_core::money::Rupiah;
/// use klinik_core::validation::validate_price;
///
/// assert!(validate_price(Rupiah::new(2000)).is_ok());
/// assert!(validate_price(Rupiah::new(-1)).is_err());
/// ```
pub fn validate_price(price: Rupiah) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Parses a whole-number amount typed into a form or read from a file.
///
/// ## Accepted Input
/// - `""` → 0 (an untouched number field, an empty cell)
/// - `"2000"` → 2000
/// - `"2000.0"` → 2000 (spreadsheet-style float formatting)
/// - `"2000.6"` → 2001 (rounded to the nearest whole unit)
///
/// Anything else is `ValidationError::InvalidNumber`.
pub fn parse_amount(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(0);
    }

    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.abs() < i64::MAX as f64 => {
            Ok(value.round() as i64)
        }
        _ => Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_code() {
        // Valid codes
        assert!(validate_code("A1").is_ok());
        assert!(validate_code("PCT-500mg").is_ok());
        assert!(validate_code("obat batuk 01").is_ok());

        // Invalid codes
        assert!(validate_code("").is_err());
        assert!(validate_code("   ").is_err());
        assert!(validate_code("a/b").is_err());
        assert!(validate_code("a\\b").is_err());
        assert!(validate_code("..").is_err());
        assert!(validate_code(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_record_code_allows_separators() {
        assert!(validate_record_code("OBT/2024/01").is_ok());
        assert!(validate_record_code("a\\b").is_ok());
        assert!(validate_record_code(&"A".repeat(65)).is_ok());

        let err = validate_record_code(" ").unwrap_err();
        assert!(matches!(err, ValidationError::Required { field } if field == "code"));
    }

    #[test]
    fn test_validate_medicine_name() {
        assert!(validate_medicine_name("Paracetamol").is_ok());
        assert!(validate_medicine_name("").is_err());
        assert!(validate_medicine_name("   ").is_err());
        assert!(validate_medicine_name(&"A".repeat(500)).is_ok());
    }

    #[test]
    fn test_validate_stock_and_price() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(10).is_ok());
        assert!(validate_stock(-1).is_err());

        assert!(validate_price(Rupiah::zero()).is_ok());
        assert!(validate_price(Rupiah::new(-100)).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("stock", "").unwrap(), 0);
        assert_eq!(parse_amount("stock", " 10 ").unwrap(), 10);
        assert_eq!(parse_amount("price", "2000.0").unwrap(), 2000);
        assert_eq!(parse_amount("price", "2000.6").unwrap(), 2001);
        assert_eq!(parse_amount("stock", "-3").unwrap(), -3);

        let err = parse_amount("stock", "sepuluh").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { .. }));
        assert!(parse_amount("price", "NaN").is_err());
        assert!(parse_amount("price", "inf").is_err());
    }
}
