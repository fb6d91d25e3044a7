//! # Money Module
//!
//! Provides the `Money` type for NPR amounts and `VatRate` for VAT.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  50 bottles × NPR 35 at 13 % VAT:                                       │
//! │    1750 × 13 / 100 = 227.5     (fine)                                  │
//! │    0.1 + 0.2       = 0.30000000000000004  ❌                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paisa (1 NPR = 100 paisa)                       │
//! │    175000 paisa × 1300 bps / 10000 = 22750 paisa = NPR 227.50          │
//! │                                                                         │
//! │  Floats appear only at the POS wire boundary, and are rounded to the   │
//! │  nearest paisa the moment they cross it.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orion_core::money::Money;
//!
//! let price = Money::from_paisa(3_500); // NPR 35.00
//! let line = price * 50u32;              // NPR 1750.00
//! assert_eq!(line.paisa(), 175_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// 1 basis point = 0.01 %, so Nepal's standard 13 % VAT is 1300 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate(u32);

impl VatRate {
    /// Nepal's standard VAT rate (13 %).
    pub const STANDARD: VatRate = VatRate(1300);

    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Creates a VAT rate from a percentage (13.0 → 1300 bps).
    ///
    /// Negative and non-finite inputs clamp to zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return VatRate(0);
        }
        VatRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display and the POS wire).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate (exempt goods such as pulses).
    #[inline]
    pub const fn zero() -> Self {
        VatRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::zero()
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paisa (1/100 NPR).
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► OrderItem.price ──► OrderItem.total ──┬─► Order.total│
/// │                                              │            │             │
/// │                                              ▼            │             │
/// │                                   calculate_vat(rate) ────┘             │
/// │                                                                         │
/// │  POSSale.total (rupees, f64) ──► from_rupees_f64 ──► revenue summary   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa.
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ```rust
    /// use orion_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(25).paisa(), 2_500);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Converts a decimal rupee amount from the POS wire into paisa,
    /// rounding to the nearest paisa. Non-finite input becomes zero.
    ///
    /// ```rust
    /// use orion_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees_f64(227.5).paisa(), 22_750);
    /// assert_eq!(Money::from_rupees_f64(0.1 + 0.2).paisa(), 30);
    /// ```
    pub fn from_rupees_f64(rupees: f64) -> Self {
        if !rupees.is_finite() {
            return Money::zero();
        }
        Money((rupees * 100.0).round() as i64)
    }

    /// Returns the amount as decimal rupees for the POS wire.
    #[inline]
    pub fn to_rupees_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates VAT on this amount: `amount × rate / 100`.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(paisa × bps + 5000) / 10000`.
    /// The i128 intermediate keeps large order totals from overflowing.
    ///
    /// ```rust
    /// use orion_core::money::{Money, VatRate};
    ///
    /// let line = Money::from_rupees(1750);
    /// let vat = line.calculate_vat(VatRate::STANDARD);
    /// assert_eq!(vat.paisa(), 22_750); // NPR 227.50
    /// ```
    pub fn calculate_vat(&self, rate: VatRate) -> Money {
        let vat = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paisa(vat as i64)
    }

    /// Multiplies a unit price by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering; the dashboard formats for display itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}NPR {}.{:02}",
            sign,
            self.rupees().abs(),
            self.paisa_part()
        )
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

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paisa() {
        let money = Money::from_paisa(123_450);
        assert_eq!(money.paisa(), 123_450);
        assert_eq!(money.rupees(), 1234);
        assert_eq!(money.paisa_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paisa(123_450).to_string(), "NPR 1234.50");
        assert_eq!(Money::from_paisa(500).to_string(), "NPR 5.00");
        assert_eq!(Money::from_paisa(-550).to_string(), "-NPR 5.50");
        assert_eq!(Money::zero().to_string(), "NPR 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!((a + b).paisa(), 1500);
        assert_eq!((a - b).paisa(), 500);
        assert_eq!((a * 3u32).paisa(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total, Money::from_rupees(20));
    }

    #[test]
    fn test_vat_on_mock_order_lines() {
        // Wai Wai: 100 × NPR 25 at 13 % → NPR 325
        let noodles = Money::from_rupees(25) * 100u32;
        assert_eq!(noodles.calculate_vat(VatRate::STANDARD), Money::from_rupees(325));

        // Coca Cola: 50 × NPR 35 at 13 % → NPR 227.50
        let cola = Money::from_rupees(35) * 50u32;
        assert_eq!(cola.calculate_vat(VatRate::STANDARD).paisa(), 22_750);
    }

    #[test]
    fn test_vat_rounding_half_up() {
        // NPR 0.05 at 10 % = 0.5 paisa → rounds up to 1 paisa
        let amount = Money::from_paisa(5);
        assert_eq!(amount.calculate_vat(VatRate::from_bps(1000)).paisa(), 1);
    }

    #[test]
    fn test_zero_rate_is_exempt() {
        let dal = Money::from_rupees(120) * 60u32;
        assert!(dal.calculate_vat(VatRate::zero()).is_zero());
    }

    #[test]
    fn test_vat_rate_from_percentage() {
        assert_eq!(VatRate::from_percentage(13.0).bps(), 1300);
        assert_eq!(VatRate::from_percentage(5.0).bps(), 500);
        assert_eq!(VatRate::from_percentage(-3.0).bps(), 0);
        assert_eq!(VatRate::from_percentage(f64::NAN).bps(), 0);
        assert!((VatRate::STANDARD.percentage() - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rupees_f64_boundary() {
        assert_eq!(Money::from_rupees_f64(4802.5).paisa(), 480_250);
        assert_eq!(Money::from_rupees_f64(f64::INFINITY), Money::zero());
        assert!((Money::from_paisa(22_750).to_rupees_f64() - 227.5).abs() < 1e-9);
    }
}
