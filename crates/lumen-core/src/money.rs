//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                     │
//! │                                                                 │
//! │  In floating point:                                             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                   │
//! │                                                                 │
//! │  OUR SOLUTION: Integer Minor Units                              │
//! │    All prices, discounts and taxes are carried as i64 cents.    │
//! │    Rounding happens exactly once per derived amount, with       │
//! │    half-up rounding over i128 intermediates.                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lumen_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // 10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // 21.98
//! let total = price + Money::from_cents(500);   // 15.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents, halalas, ...).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for adjustments
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No currency symbol**: the display symbol comes from `StoreSettings`;
///   `Money` itself is unit-agnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use lumen_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99, absolute value).
    #[inline]
    pub const fn subunits(&self) -> i64 {
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

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use lumen_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // 2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // 8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Computes a percentage of this amount, given in basis points.
    ///
    /// 1 basis point = 0.01%, so 1500 bps = 15%. Rounds half-up using an
    /// i128 intermediate to prevent overflow on large amounts.
    ///
    /// Used for exclusive tax and percentage discounts.
    ///
    /// ## Example
    /// ```rust
    /// use lumen_core::money::Money;
    ///
    /// let taxable = Money::from_cents(15000);     // 150.00
    /// let tax = taxable.percentage(1500);         // 15%
    /// assert_eq!(tax.cents(), 2250);              // 22.50
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let amount = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(amount as i64)
    }

    /// Extracts the tax portion from a tax-inclusive amount.
    ///
    /// ## The Inclusive Model
    /// ```text
    /// gross = net × (1 + rate)
    /// net   = gross × 10000 / (10000 + bps)   (half-up)
    /// tax   = gross − net
    /// ```
    /// The tax is backed out of the listed price, never added on top.
    ///
    /// ## Example
    /// ```rust
    /// use lumen_core::money::Money;
    ///
    /// let gross = Money::from_cents(11500);       // 115.00 incl. 15%
    /// let tax = gross.included_tax(1500);
    /// assert_eq!(tax.cents(), 1500);              // 15.00
    /// ```
    pub fn included_tax(&self, bps: u32) -> Money {
        let divisor = 10000i128 + bps as i128;
        let net = (self.0 as i128 * 10000 + divisor / 2) / divisor;
        Money::from_cents(self.0 - net as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal rendering without a currency symbol.
///
/// The store's configured currency symbol is appended by the presentation
/// layer, not here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.subunits())
    }
}

/// Default money is zero.
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

impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
