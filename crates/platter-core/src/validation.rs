//! # Validation Module
//!
//! Input validation for the pricing rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web UI                                                        │
//! │  ├── Quantity steppers, price inputs                                   │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: storefront commands                                           │
//! │  ├── JSON shape (deserialization, decimal parsing)                     │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: restaurant backend (external)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator returns a `ValidationError` naming the offending field.
//! Nothing here clamps or rounds a bad value into a good one.

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that an identifier or name is present.
///
/// ## Example
/// ```rust
/// use platter_core::validation::validate_required;
///
/// assert!(validate_required("product_id", "pizza-1").is_ok());
/// assert!(validate_required("product_id", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a line item unit price. Must be strictly positive.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }
    Ok(())
}

/// Validates a quantity being added to the cart.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// `update_quantity` does NOT use this: values below 1 there mean "remove".
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Pricing Validators
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }
    Ok(())
}

/// Validates the flat delivery fee. Zero is allowed (free delivery).
pub fn validate_delivery_fee(fee: Money) -> ValidationResult<()> {
    if fee.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "delivery_fee".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Ingredient Validators
// =============================================================================

/// Validates the candidate menu price of a dish. Must be strictly positive,
/// since margin percent divides by it.
pub fn validate_menu_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "menu_price".to_string(),
        });
    }
    Ok(())
}

/// Validates a per-serving ingredient quantity.
pub fn validate_quantity_needed(qty: Quantity) -> ValidationResult<()> {
    if !qty.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity_needed".to_string(),
        });
    }
    Ok(())
}

/// Validates an inventory unit cost. Zero is allowed (donated / untracked).
pub fn validate_unit_cost(cost: Money) -> ValidationResult<()> {
    if cost.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "cost_per_unit".to_string(),
        });
    }
    Ok(())
}

/// Validates a matcher similarity score, which must lie in `[0, 1]`.
pub fn validate_similarity_score(score: f64) -> ValidationResult<()> {
    if !(0.0..=1.0).contains(&score) {
        return Err(ValidationError::OutOfRange {
            field: "similarity_score".to_string(),
            min: 0,
            max: 1,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
