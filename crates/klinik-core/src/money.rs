//! # Money Module
//!
//! Provides the `Rupiah` type for medicine prices and stock value.
//!
//! ## Why Whole Rupiah?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rupiah prices carry no minor unit in practice: "Rp 2.000"             │
//! │                                                                         │
//! │  price (Rp) × stock (units) ──► stock value (Rp)                       │
//! │                                                                         │
//! │  Everything stays in i64 whole rupiah, so the dashboard total is       │
//! │  exact no matter how many rows are summed.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use klinik_core::money::Rupiah;
//!
//! let price = Rupiah::new(2000);
//! let value = price.times_stock(10);
//! assert_eq!(value.amount(), 20_000);
//! assert_eq!(value.to_string(), "Rp 20.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// =============================================================================
// Rupiah Type
// =============================================================================

/// A monetary value in whole rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never has to special-case subtraction,
///   validation keeps stored prices non-negative
/// - **`#[serde(transparent)]`**: serializes as a bare number, which is what
///   the `Harga` column holds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupiah(i64);

impl Rupiah {
    /// Creates a value from whole rupiah.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Rupiah(amount)
    }

    /// Returns the amount in whole rupiah.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero rupiah.
    #[inline]
    pub const fn zero() -> Self {
        Rupiah(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Value of `stock` units at this unit price.
    ///
    /// The product is taken in i128 and saturates at the i64 range, so huge
    /// stock counts cannot overflow the dashboard total.
    ///
    /// ## Example
    /// ```rust
    /// use klinik_core::money::Rupiah;
    ///
    /// assert_eq!(Rupiah::new(3000).times_stock(5).amount(), 15_000);
    /// assert_eq!(Rupiah::new(i64::MAX).times_stock(2).amount(), i64::MAX);
    /// ```
    #[inline]
    pub fn times_stock(&self, stock: i64) -> Self {
        let value = self.0 as i128 * stock as i128;
        Rupiah(value.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Indonesian display: `Rp 1.234.567` (dot as thousands separator).
impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

/// Formats an unsigned integer with `.` between every group of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl Add for Rupiah {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Rupiah(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Rupiah {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Rupiah {
    fn sum<I: Iterator<Item = Rupiah>>(iter: I) -> Self {
        iter.fold(Rupiah::zero(), |acc, x| acc + x)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
