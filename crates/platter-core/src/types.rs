//! # Domain Types
//!
//! Small value types shared by the cart, totals and mapping modules.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   OrderType     │   │  OrderStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  DineIn         │   │  Pending ...    │       │
//! │  │  1000 = 10%     │   │  Takeaway       │   │  Cancelled      │       │
//! │  └─────────────────┘   │  Delivery       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  StockStatus    │   │ MatchConfidence │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  Ample          │   │  Exact  (1.0)   │                              │
//! │  │  Low            │   │  High   (≥0.85) │                              │
//! │  │  Insufficient   │   │  Medium (≥0.60) │                              │
//! │  └─────────────────┘   │  Low    (≥0.40) │                              │
//! │                        │  Weak           │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::parse_fixed;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Parses a percentage written as decimal text (`"10"`, `"8.25"`).
    ///
    /// ## Example
    /// ```rust
    /// use platter_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::parse_percentage("8.25").unwrap().bps(), 825);
    /// assert!(TaxRate::parse_percentage("-1").is_err());
    /// ```
    pub fn parse_percentage(text: &str) -> Result<Self, ValidationError> {
        let bps = parse_fixed(text, 2, "tax_rate")?;
        if !(0..=10_000).contains(&bps) {
            return Err(ValidationError::OutOfRange {
                field: "tax_rate".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(TaxRate(bps as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Order Type / Status
// =============================================================================

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    DineIn,
    Takeaway,
    /// Web checkout default.
    #[default]
    Delivery,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::DineIn => write!(f, "dine_in"),
            OrderType::Takeaway => write!(f, "takeaway"),
            OrderType::Delivery => write!(f, "delivery"),
        }
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dine_in" | "dine-in" | "dinein" => Ok(OrderType::DineIn),
            "takeaway" | "takeout" | "pickup" => Ok(OrderType::Takeaway),
            "delivery" => Ok(OrderType::Delivery),
            other => Err(ValidationError::InvalidFormat {
                field: "order_type".to_string(),
                reason: format!(
                    "unknown order type '{}', expected dine_in, takeaway or delivery",
                    other
                ),
            }),
        }
    }
}

/// Lifecycle of an order on the restaurant side.
///
/// The web checkout only ever creates `Pending` orders; the other states
/// belong to the kitchen and are listed so order-tracking payloads parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Completed,
    Cancelled,
}

// =============================================================================
// Stock Status
// =============================================================================

/// How well current stock covers one serving of a dish ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Enough for many servings (stock ≥ needed × ample multiplier).
    Ample,
    /// At least one serving, but running low.
    Low,
    /// Not even one serving.
    Insufficient,
}

// =============================================================================
// Match Confidence
// =============================================================================

/// Confidence tier of an external stock match, from its similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MatchConfidence {
    Exact,
    High,
    Medium,
    Low,
    /// Below the matcher's usual acceptance floor.
    Weak,
}

impl MatchConfidence {
    pub const HIGH_THRESHOLD: f64 = 0.85;
    pub const MEDIUM_THRESHOLD: f64 = 0.60;
    pub const LOW_THRESHOLD: f64 = 0.40;

    /// Classifies a similarity score in `[0, 1]`.
    pub fn from_score(score: f64) -> Self {
        if score >= 1.0 {
            MatchConfidence::Exact
        } else if score >= Self::HIGH_THRESHOLD {
            MatchConfidence::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            MatchConfidence::Medium
        } else if score >= Self::LOW_THRESHOLD {
            MatchConfidence::Low
        } else {
            MatchConfidence::Weak
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
