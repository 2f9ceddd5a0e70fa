//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The old checkout screen computed:                                      │
//! │    total = subtotal * 1.1 + 5                                           │
//! │  in JavaScript floats, then called toFixed(2) on each displayed line.   │
//! │  Tax and total could disagree by a cent depending on the subtotal.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Line totals and subtotals are exact (cents × quantity).              │
//! │    Rounding happens ONCE, when a rate is applied, via `round_div`.      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use platter_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Or parse what the menu API sends
//! let parsed: Money = "10.99".parse().unwrap();
//! assert_eq!(price, parsed);
//!
//! let total = price * 2 + Money::from_cents(500);
//! assert_eq!(total.cents(), 2698);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Rounding
// =============================================================================

/// Divides `num` by `den` and rounds to the nearest integer.
///
/// Ties round away from zero, which is round-half-up for every non-negative
/// amount (all prices, costs and taxes). Works in `i128` so intermediate
/// products of cents × basis points × thousandths cannot overflow.
///
/// ## Panics
/// Panics if `den` is not positive. All callers pass constants.
///
/// ## Example
/// ```rust
/// use platter_core::money::round_div;
///
/// assert_eq!(round_div(25, 10), 3);   //  2.5 →  3
/// assert_eq!(round_div(24, 10), 2);   //  2.4 →  2
/// assert_eq!(round_div(-25, 10), -3); // -2.5 → -3
/// ```
pub fn round_div(num: i128, den: i128) -> i128 {
    assert!(den > 0, "round_div denominator must be positive");
    let magnitude = (2 * num.abs() + den) / (2 * den);
    if num < 0 {
        -magnitude
    } else {
        magnitude
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: profit margins can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No float constructor**: prices arrive as decimal text and are parsed
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Menu price ──► LineItem.unit_price ──► line_total ──► Cart subtotal    │
/// │                                                                         │
/// │  Cart subtotal ──► tax ──► + delivery fee ──► OrderTotals.grand_total   │
/// │                                                                         │
/// │  StockMatch.cost_per_unit ──► ingredient cost ──► profit margin         │
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
    /// use platter_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount such as `"10.99"`, `"5"`, `"0.5"` or `"-3.25"`.
    ///
    /// ## Rules
    /// - Optional leading `-` or `+`
    /// - At least one digit before the decimal point
    /// - At most two fractional digits (no silent rounding)
    ///
    /// ## Example
    /// ```rust
    /// use platter_core::money::Money;
    ///
    /// assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
    /// assert!(Money::parse("10.999").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        parse_fixed(text, 2, "amount").map(Money)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Calculates tax on this amount, rounded half-up to whole cents.
    ///
    /// ## Example
    /// ```rust
    /// use platter_core::money::Money;
    /// use platter_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(2500);  // $25.00
    /// let rate = TaxRate::from_bps(1000);      // 10%
    /// assert_eq!(subtotal.calculate_tax(rate).cents(), 250);
    ///
    /// // $0.25 × 10% = $0.025 → rounds up to $0.03
    /// assert_eq!(Money::from_cents(25).calculate_tax(rate).cents(), 3);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = round_div(self.0 as i128 * rate.bps() as i128, 10_000);
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use platter_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(unit_price.checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Checked addition.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

/// Parses a signed decimal string into an integer scaled by `10^scale`.
///
/// Shared by `Money` (scale 2) and `Quantity` (scale 3).
pub(crate) fn parse_fixed(text: &str, scale: u32, field: &str) -> Result<i64, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (digits, ""),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected a decimal number"));
    }
    if digits.contains('.') && frac.is_empty() {
        return Err(invalid("missing digits after decimal point"));
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected a decimal number"));
    }
    if frac.len() > scale as usize {
        return Err(invalid(&format!("at most {} decimal places allowed", scale)));
    }

    let overflow = || ValidationError::Overflow {
        field: field.to_string(),
    };
    let factor = 10_i64.pow(scale);
    let whole_value: i64 = whole.parse().map_err(|_| overflow())?;
    let frac_value: i64 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = scale as usize);
        padded.parse().map_err(|_| overflow())?
    };

    let magnitude = whole_value
        .checked_mul(factor)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(overflow)?;

    Ok(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// Use `StorefrontConfig::format_currency` for the configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
