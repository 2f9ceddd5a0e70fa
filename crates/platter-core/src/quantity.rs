//! # Quantity Module
//!
//! Fixed-point ingredient quantities.
//!
//! Recipes and inventory speak in fractional units (0.25 kg of paneer,
//! 1.5 l of milk). `Quantity` stores thousandths of a unit in an `i64`, so
//! `2 kg` is `2000` and comparisons like "stock ≥ needed × 10" are exact.
//!
//! ```rust
//! use platter_core::quantity::Quantity;
//!
//! let needed: Quantity = "0.25".parse().unwrap();
//! let stock = Quantity::from_units(5);
//! assert_eq!(stock.times_covered(needed), 20);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::parse_fixed;

/// Number of stored steps per whole unit.
pub const MILLIS_PER_UNIT: i64 = 1_000;

/// An ingredient amount in thousandths of its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths of a unit.
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Creates a quantity from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * MILLIS_PER_UNIT)
    }

    /// Parses decimal text with at most three fractional digits.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        parse_fixed(text, 3, "quantity").map(Quantity)
    }

    /// Returns the raw value in thousandths.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Scales by a whole multiplier. `None` on overflow.
    #[inline]
    pub fn checked_scale(&self, factor: u32) -> Option<Self> {
        self.0.checked_mul(factor as i64).map(Quantity)
    }

    /// How many whole times `per_serving` fits into `self`.
    ///
    /// Floors the ratio; never negative. Returns 0 when `per_serving` is not
    /// positive.
    pub fn times_covered(&self, per_serving: Quantity) -> i64 {
        if per_serving.0 <= 0 || self.0 <= 0 {
            return 0;
        }
        self.0 / per_serving.0
    }
}

/// Trims trailing zeros: `2`, `2.5`, `0.125`, `-1.05`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / MILLIS_PER_UNIT).abs();
        let frac = (self.0 % MILLIS_PER_UNIT).abs();
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let digits = format!("{:03}", frac);
            write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::parse(s)
    }
}
