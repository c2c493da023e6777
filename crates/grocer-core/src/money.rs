//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹19.50 is stored as 1950 paise                                       │
//! │    Catalog prices are whole rupees today, but charges and               │
//! │    discounts never have to round through a float                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocer_core::money::Money;
//!
//! let price = Money::from_rupees(100);     // ₹100
//! let doubled = price * 2u32;              // ₹200
//! let total = doubled + Money::from_paise(50);
//! assert_eq!(total.paise(), 20050);
//! assert_eq!(total.to_string(), "₹200.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Paise per rupee.
const MINOR_PER_MAJOR: i64 = 100;

/// Decimal places of the minor unit (`10^MINOR_DIGITS == MINOR_PER_MAJOR`).
pub const MINOR_DIGITS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: savings and "amount left to free delivery" are
///   differences and may be computed before clamping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──┬──► BillLine.unit_price ──► BillLine.subtotal         │
/// │                  │                                                      │
/// │                  └──► Displayed as "₹100" on the product card           │
/// │                                                                         │
/// │  Bill.items_total ──► waiver threshold ──► charges ──► grand_total      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    ///
    /// let price = Money::from_paise(1950); // ₹19.50
    /// assert_eq!(price.paise(), 1950);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// Catalog prices and configured charges are whole rupees, so this is
    /// the constructor most call sites use. Out-of-range values saturate;
    /// use [`Money::checked_from_rupees`] for amounts read from outside.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Creates a Money value from whole rupees, or `None` if the amount
    /// does not fit in paise.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    ///
    /// assert_eq!(Money::checked_from_rupees(20), Some(Money::from_paise(2000)));
    /// assert_eq!(Money::checked_from_rupees(i64::MAX / 10), None);
    /// ```
    #[inline]
    pub const fn checked_from_rupees(rupees: i64) -> Option<Self> {
        match rupees.checked_mul(MINOR_PER_MAJOR) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(1950).rupees(), 19);
    /// assert_eq!(Money::from_paise(-550).rupees(), -5);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a cart quantity.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    ///
    /// let unit_price = Money::from_rupees(60);
    /// assert_eq!(unit_price.multiply_quantity(3).rupees(), 180);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Subtracts `other`, clamping at zero.
    ///
    /// Used for "add ₹N more for free delivery": once the threshold is met
    /// the remaining amount is zero, never negative.
    #[inline]
    pub fn saturating_sub(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows rupees with the ₹ sign, dropping `.00` for whole amounts.
///
/// The storefront shows `₹100` on product cards and `₹19.50` only when there
/// are paise, matching how the bill is printed.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        if self.paise_part() == 0 {
            write!(f, "{}₹{}", sign, self.rupees().abs())
        } else {
            write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(260);
        assert_eq!(money.paise(), 26000);
        assert_eq!(money.rupees(), 260);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_checked_from_rupees() {
        assert_eq!(Money::checked_from_rupees(272), Some(Money::from_paise(27200)));
        assert_eq!(Money::checked_from_rupees(-5), Some(Money::from_paise(-500)));
        assert_eq!(Money::checked_from_rupees(100_000_000_000_000_000), None);
        assert_eq!(Money::checked_from_rupees(i64::MIN), None);
    }

    #[test]
    fn test_from_rupees_saturates() {
        assert_eq!(Money::from_rupees(100_000_000_000_000_000), Money::from_paise(i64::MAX));
        assert_eq!(Money::from_rupees(i64::MIN), Money::from_paise(i64::MIN));
        assert_eq!(10_i64.pow(MINOR_DIGITS), MINOR_PER_MAJOR);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupees(100).to_string(), "₹100");
        assert_eq!(Money::from_paise(1950).to_string(), "₹19.50");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(100);
        let b = Money::from_rupees(60);

        assert_eq!((a + b).rupees(), 160);
        assert_eq!((a - b).rupees(), 40);
        assert_eq!((a * 2u32).rupees(), 200);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_rupees(200), Money::from_rupees(60)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_rupees(260));

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_saturating_sub() {
        let threshold = Money::from_rupees(99);
        assert_eq!(threshold.saturating_sub(Money::from_rupees(25)).rupees(), 74);
        assert!(threshold.saturating_sub(Money::from_rupees(260)).is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paise(1).is_positive());
        assert!(Money::from_paise(-1).is_negative());
    }
}
