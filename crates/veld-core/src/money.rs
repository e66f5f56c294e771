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
//! │  In a cash ledger this is fatal: a session can carry thousands of      │
//! │  small collections, and the close-time conservation check              │
//! │    expected = opening_float + Σ(collections)                           │
//! │  must hold EXACTLY, or agents get flagged for variances that are       │
//! │  rounding drift rather than missing cash.                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Sums over i64 cents are exact for any realistic ledger size.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use veld_core::money::Money;
//!
//! // Create from cents (preferred)
//! let float = Money::from_cents(50_000); // R500.00 opening float
//!
//! // Arithmetic operations
//! let expected = float + Money::from_cents(50_000);
//! let variance = Money::from_cents(98_000) - expected;
//! assert_eq!(variance.cents(), -2_000); // R20.00 short
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for variances (shortages)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Currency-agnostic**: one implicit currency per tenant; formatting
///   with symbols and locales is entirely a frontend concern
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Session.opening_float ──┐                                              │
/// │                          ├──► expected_cash ──┐                         │
/// │  Σ Collection.amount ────┘                    ├──► variance             │
/// │                          actual_cash ─────────┘        │                │
/// │                                                        ▼                │
/// │  Deposit.amount ──► bank-side reconciliation    approval policy         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use veld_core::money::Money;
    ///
    /// let amount = Money::from_cents(1099);
    /// assert_eq!(amount.cents(), 1099);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and API all use cents.
    /// Only the UI converts to major units for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use veld_core::money::Money;
    ///
    /// let amount = Money::from_major_minor(10, 99);
    /// assert_eq!(amount.cents(), 1099);
    ///
    /// let shortage = Money::from_major_minor(-5, 50); // -5.50
    /// assert_eq!(shortage.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Returns the absolute value.
    ///
    /// ## Example
    /// ```rust
    /// use veld_core::money::Money;
    ///
    /// let shortage = Money::from_cents(-550);
    /// assert_eq!(shortage.abs().cents(), 550);
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Expresses this value as a percentage of `total`.
    ///
    /// ## The Zero-Total Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  percentage_of(variance, expected_cash)                             │
    /// │                                                                     │
    /// │  expected == 0 is a VALID (if unusual) close outcome: a session    │
    /// │  with no opening float and no collections. The percentage is       │
    /// │  defined as 0 in that case rather than an error, so reporting      │
    /// │  never divides by zero — even though the variance AMOUNT may be    │
    /// │  nonzero (an unexplained actual count). Callers must not "fix"     │
    /// │  this asymmetry; the approval workflow relies on it.               │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use veld_core::money::Money;
    ///
    /// let variance = Money::from_cents(-2_000);
    /// let expected = Money::from_cents(100_000);
    /// assert_eq!(variance.percentage_of(expected), -2.0);
    ///
    /// assert_eq!(variance.percentage_of(Money::zero()), 0.0);
    /// ```
    pub fn percentage_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        (self.0 as f64 / total.0 as f64) * 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and diagnostics. Use frontend formatting for actual
/// UI display to handle currency symbols and localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Exact summation over ledgers: `collections.iter().map(|c| c.amount()).sum()`.
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.cents(), 500);
    }

    #[test]
    fn test_percentage_of() {
        let variance = Money::from_cents(-2_000);
        let expected = Money::from_cents(100_000);
        assert_eq!(variance.percentage_of(expected), -2.0);

        let overage = Money::from_cents(5_000);
        assert_eq!(overage.percentage_of(expected), 5.0);
    }

    #[test]
    fn test_percentage_of_zero_total_is_zero() {
        // A nonzero amount against a zero total reports 0%, not an error.
        // The variance amount itself stays nonzero; only the ratio is
        // defined away.
        let unexplained = Money::from_cents(1234);
        assert_eq!(unexplained.percentage_of(Money::zero()), 0.0);
        assert_eq!(Money::zero().percentage_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }

    /// Critical test: summation over a large ledger is exact.
    ///
    /// 10,000 collections of 3 cents must total exactly 300.00 — the
    /// conservation property the close-time arithmetic depends on.
    #[test]
    fn test_sum_is_exact_over_large_ledger() {
        let total: Money = std::iter::repeat(Money::from_cents(3)).take(10_000).sum();
        assert_eq!(total.cents(), 30_000);

        // Mixed small amounts, summed twice in different orders.
        let amounts: Vec<Money> = (1..=10_000).map(Money::from_cents).collect();
        let forward: Money = amounts.iter().copied().sum();
        let backward: Money = amounts.iter().rev().copied().sum();
        assert_eq!(forward, backward);
        assert_eq!(forward.cents(), 50_005_000);
    }
}
