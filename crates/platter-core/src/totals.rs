//! # Order Total Calculator
//!
//! Turns a cart snapshot into the numbers shown on the checkout screen and
//! sent with the order.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartSnapshot.subtotal (exact cents)                                    │
//! │       │                                                                 │
//! │       ├──► tax_amount  = round2(subtotal × tax_rate)                    │
//! │       │                                                                 │
//! │       └──► grand_total = subtotal + tax_amount + delivery_fee           │
//! │                                                                         │
//! │  Example: subtotal $25.00, 10%, fee $5.00                               │
//! │           tax $2.50, grand total $32.50                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The delivery fee is flat and applies even to an empty cart.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::cart::CartSnapshot;
use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{validate_delivery_fee, validate_tax_rate_bps};

/// Default tax rate applied at checkout (10%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1_000;

/// Default flat delivery fee ($5.00).
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 500;

// =============================================================================
// Pricing Config
// =============================================================================

/// Rates applied on top of the cart subtotal.
///
/// Only obtainable through [`PricingConfig::new`], `Default` or
/// deserialization, all of which validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    tax_rate: TaxRate,
    delivery_fee: Money,
}

impl PricingConfig {
    /// Creates a validated pricing config.
    ///
    /// ## Errors
    /// `InvalidInput` if the rate exceeds 100% or the fee is negative.
    pub fn new(tax_rate: TaxRate, delivery_fee: Money) -> CoreResult<Self> {
        validate_tax_rate_bps(tax_rate.bps())?;
        validate_delivery_fee(delivery_fee)?;
        Ok(PricingConfig {
            tax_rate,
            delivery_fee,
        })
    }

    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    #[inline]
    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }
}

/// Wire shape of a pricing config, trusted only after `PricingConfig::new`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricingConfigFields {
    tax_rate: TaxRate,
    delivery_fee: Money,
}

impl<'de> Deserialize<'de> for PricingConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = PricingConfigFields::deserialize(deserializer)?;
        PricingConfig::new(fields.tax_rate, fields.delivery_fee).map_err(serde::de::Error::custom)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            delivery_fee: Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS),
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Checkout totals derived from one cart snapshot.
///
/// ## Invariants
/// - `tax_amount == round2(subtotal × tax_rate)`
/// - `grand_total == subtotal + tax_amount + delivery_fee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax_amount: Money,
    pub grand_total: Money,
}

/// Computes checkout totals.
///
/// Pure: the same snapshot and config always give the same totals, and the
/// order of items in the snapshot does not matter.
///
/// ## Errors
/// `InvalidInput` (overflow) if the grand total does not fit in `i64`.
///
/// ## Example
/// ```rust
/// use platter_core::cart::{Cart, NewLineItem};
/// use platter_core::money::Money;
/// use platter_core::totals::{compute_totals, PricingConfig};
///
/// let mut cart = Cart::new();
/// cart.add_item(NewLineItem::new("pizza", "Pizza", Money::from_cents(1000)).with_quantity(2)).unwrap();
/// cart.add_item(NewLineItem::new("soda", "Soda", Money::from_cents(500))).unwrap();
///
/// let totals = compute_totals(&cart.snapshot(), &PricingConfig::default()).unwrap();
/// assert_eq!(totals.subtotal.cents(), 2500);
/// assert_eq!(totals.tax_amount.cents(), 250);
/// assert_eq!(totals.grand_total.cents(), 3250);
/// ```
pub fn compute_totals(snapshot: &CartSnapshot, config: &PricingConfig) -> CoreResult<OrderTotals> {
    let subtotal = snapshot.subtotal;
    let tax_amount = subtotal.calculate_tax(config.tax_rate);
    let grand_total = subtotal
        .checked_add(tax_amount)
        .and_then(|total| total.checked_add(config.delivery_fee))
        .ok_or_else(|| ValidationError::Overflow {
            field: "grand_total".to_string(),
        })?;

    Ok(OrderTotals {
        subtotal,
        delivery_fee: config.delivery_fee,
        tax_amount,
        grand_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;

    fn line(id: &str, cents: i64, qty: i64) -> LineItem {
        LineItem {
            product_id: id.to_string(),
            name: id.to_string(),
            unit_price: Money::from_cents(cents),
            quantity: qty,
        }
    }

    #[test]
    fn test_totals_basic() {
        let snap = CartSnapshot::from_items(vec![line("a", 1000, 2), line("b", 500, 1)]).unwrap();
        let totals = compute_totals(&snap, &PricingConfig::default()).unwrap();

        assert_eq!(totals.subtotal.cents(), 2500);
        assert_eq!(totals.tax_amount.cents(), 250);
        assert_eq!(totals.delivery_fee.cents(), 500);
        assert_eq!(totals.grand_total.cents(), 3250);
    }

    #[test]
    fn test_totals_empty_cart_still_charges_delivery() {
        let snap = CartSnapshot::from_items(Vec::new()).unwrap();
        let totals = compute_totals(&snap, &PricingConfig::default()).unwrap();

        assert!(totals.subtotal.is_zero());
        assert!(totals.tax_amount.is_zero());
        assert_eq!(totals.grand_total.cents(), 500);
    }

    #[test]
    fn test_tax_is_rounded_once_on_subtotal() {
        // Per-line tax would be 0.5 + 0.5 = rounded 1 + 1 = 2 cents;
        // rounding the subtotal once gives 1 cent.
        let snap = CartSnapshot::from_items(vec![line("a", 5, 1), line("b", 5, 1)]).unwrap();
        let config = PricingConfig::new(TaxRate::from_bps(1000), Money::zero()).unwrap();
        let totals = compute_totals(&snap, &config).unwrap();

        assert_eq!(totals.tax_amount.cents(), 1);
        assert_eq!(totals.grand_total.cents(), 11);
    }

    #[test]
    fn test_zero_rate_and_free_delivery() {
        let snap = CartSnapshot::from_items(vec![line("a", 1234, 1)]).unwrap();
        let config = PricingConfig::new(TaxRate::zero(), Money::zero()).unwrap();
        let totals = compute_totals(&snap, &config).unwrap();
        assert_eq!(totals.grand_total.cents(), 1234);
    }

    #[test]
    fn test_pricing_config_validation() {
        assert!(PricingConfig::new(TaxRate::from_bps(10_000), Money::zero()).is_ok());
        assert!(PricingConfig::new(TaxRate::from_bps(10_001), Money::zero()).is_err());
        assert!(PricingConfig::new(TaxRate::from_bps(1000), Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_pricing_config_deserialization_validates() {
        let config: PricingConfig =
            serde_json::from_str(r#"{"taxRate":825,"deliveryFee":300}"#).unwrap();
        assert_eq!(config.tax_rate().bps(), 825);
        assert_eq!(config.delivery_fee().cents(), 300);

        let err = serde_json::from_str::<PricingConfig>(r#"{"taxRate":10001,"deliveryFee":500}"#)
            .unwrap_err();
        assert!(err.to_string().contains("tax_rate"));
        assert!(serde_json::from_str::<PricingConfig>(r#"{"taxRate":1000,"deliveryFee":-1}"#).is_err());

        let json = serde_json::to_string(&PricingConfig::default()).unwrap();
        assert_eq!(serde_json::from_str::<PricingConfig>(&json).unwrap(), PricingConfig::default());
    }

    #[test]
    fn test_grand_total_overflow_is_rejected() {
        let snap = CartSnapshot::from_items(vec![line("a", i64::MAX - 100, 1)]).unwrap();
        let err = compute_totals(&snap, &PricingConfig::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_totals_are_idempotent() {
        let snap = CartSnapshot::from_items(vec![line("a", 333, 3)]).unwrap();
        let config = PricingConfig::default();
        assert_eq!(
            compute_totals(&snap, &config).unwrap(),
            compute_totals(&snap, &config).unwrap()
        );
    }
}
