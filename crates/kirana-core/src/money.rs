//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹33.33 is stored as 3333 paise. Sums are exact.                      │
//! │                                                                         │
//! │  Fractional quantities (0.5 kg) and percentage discounts go through     │
//! │  rust_decimal, and the result is rounded ONCE per line back to paise.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kirana_core::money::Money;
//!
//! let price = Money::from_paise(6000); // ₹60.00
//! let total = price + Money::from_paise(4550);
//! assert_eq!(total.to_string(), "₹105.50");
//!
//! let typed: Money = "33.33".parse().unwrap();
//! assert_eq!(typed.paise(), 3333);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: net profit can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a plain integer** of paise
///
/// ```text
/// Item.price ──► CartItem line subtotal ──► Sale.total ──► daily/monthly revenue
///                                                   │
/// Expense.amount ──────────────► monthly expenses ──┴──► net profit
///
/// UdhaarEntry.amount ──► outstanding credit
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount.
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable amount.
    pub const MIN: Money = Money(i64::MIN);

    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// For negative amounts only the rupee part should be negative:
    /// `from_rupees_paise(-5, 50)` is -₹5.50.
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the amount in rupees as an exact decimal (3333 paise → 33.33).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Converts a rupee decimal into paise, rounding half-up at 2 places.
    ///
    /// Returns `None` when the value does not fit in an `i64` of paise.
    pub fn from_decimal(rupees: Decimal) -> Option<Self> {
        rupees
            .checked_mul(HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Money)
    }

    /// Computes a cart line subtotal: `round2(price × quantity × (1 − discount/100))`.
    ///
    /// ## Rounding
    /// Half-up to the paisa, applied exactly once for the whole line. The
    /// intermediate product stays exact in `Decimal`, so ₹10 at 33% off is
    /// ₹6.70, not ₹6.699999.
    ///
    /// ## Discount Range
    /// The discount is clamped to 0–100 before use, so a line can never go
    /// negative or exceed its undiscounted value.
    ///
    /// ```rust
    /// use kirana_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let line = Money::from_paise(10000).line_total(Decimal::from(2), Decimal::from(10));
    /// assert_eq!(line.paise(), 18000); // ₹180.00
    /// ```
    ///
    /// Saturates at [`Money::MAX`] if the result cannot be represented.
    pub fn line_total(&self, quantity: Decimal, discount_pct: Decimal) -> Money {
        let discount = discount_pct.clamp(Decimal::ZERO, HUNDRED);
        Decimal::from(self.0)
            .checked_mul(quantity)
            .and_then(|gross| gross.checked_mul(HUNDRED - discount))
            .and_then(|scaled| scaled.checked_div(HUNDRED))
            .and_then(|exact| {
                exact
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
            })
            .map(Money)
            .unwrap_or(if quantity.is_sign_negative() {
                Money::MIN
            } else {
                Money::MAX
            })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the receipt prints it: `₹12.34`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

/// Parses user-entered rupee text such as `"60"`, `"33.33"` or `" 12.5 "`.
///
/// More than two decimal places are rounded half-up.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::required("amount"));
        }

        let rupees = Decimal::from_str(trimmed)
            .map_err(|_| ValidationError::invalid_format("amount", "must be a number"))?;

        Money::from_decimal(rupees)
            .ok_or_else(|| ValidationError::invalid_format("amount", "is too large"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates at `Money::MIN`/`Money::MAX`.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees_paise() {
        assert_eq!(Money::from_rupees_paise(10, 99).paise(), 1099);
        assert_eq!(Money::from_rupees_paise(-5, 50).paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(1099).to_string(), "₹10.99");
        assert_eq!(Money::from_paise(500).to_string(), "₹5.00");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((b - a).paise(), -500);
        assert_eq!((-a).paise(), -1000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.paise(), 2000);
    }

    #[test]
    fn test_parse() {
        assert_eq!("33.33".parse::<Money>().unwrap().paise(), 3333);
        assert_eq!(" 60 ".parse::<Money>().unwrap().paise(), 6000);
        assert_eq!("12.5".parse::<Money>().unwrap().paise(), 1250);
        assert_eq!("12.345".parse::<Money>().unwrap().paise(), 1235);
        assert_eq!("12.344".parse::<Money>().unwrap().paise(), 1234);

        assert!(matches!(
            "".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            "abc".parse::<Money>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_line_total_basic() {
        // ₹100 × 2 at 10% off = ₹180.00
        let line = Money::from_paise(10000).line_total(dec("2"), dec("10"));
        assert_eq!(line.paise(), 18000);

        // ₹33.33 × 1, no discount
        let line = Money::from_paise(3333).line_total(Decimal::ONE, Decimal::ZERO);
        assert_eq!(line.paise(), 3333);
    }

    #[test]
    fn test_line_total_rounds_once() {
        // ₹10 at 33% off = ₹6.70 exactly
        let line = Money::from_paise(1000).line_total(Decimal::ONE, dec("33"));
        assert_eq!(line.paise(), 670);

        // ₹0.05 × 0.5 = 2.5 paise → rounds half-up to 3
        let line = Money::from_paise(5).line_total(dec("0.5"), Decimal::ZERO);
        assert_eq!(line.paise(), 3);

        // ₹45 × 1.5 kg at 12.5% off = 59.0625 → ₹59.06
        let line = Money::from_paise(4500).line_total(dec("1.5"), dec("12.5"));
        assert_eq!(line.paise(), 5906);
    }

    #[test]
    fn test_line_total_clamps_discount() {
        let price = Money::from_paise(1000);
        assert_eq!(price.line_total(Decimal::ONE, dec("150")).paise(), 0);
        assert_eq!(price.line_total(Decimal::ONE, dec("-20")).paise(), 1000);
    }

    #[test]
    fn test_line_total_saturates() {
        let line = Money::MAX.line_total(dec("999"), Decimal::ZERO);
        assert_eq!(line, Money::MAX);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let half = Money::from_paise(i64::MAX / 2 + 1);
        assert_eq!(half + half, Money::MAX);
        assert_eq!(Money::MIN - Money::from_paise(1), Money::MIN);
        assert_eq!(-Money::MIN, Money::MAX);

        let mut running = Money::MAX;
        running += Money::from_paise(500);
        assert_eq!(running, Money::MAX);

        let total: Money = [half, half, half].iter().sum();
        assert_eq!(total, Money::MAX);
    }

    #[test]
    fn test_decimal_conversion() {
        assert_eq!(Money::from_paise(3333).to_decimal(), dec("33.33"));
        assert_eq!(Money::from_decimal(dec("6.695")).unwrap().paise(), 670);
    }
}
