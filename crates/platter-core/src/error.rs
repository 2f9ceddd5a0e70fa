//! # Error Types
//!
//! Domain-specific error types for platter-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  platter-core errors (this file)                                       │
//! │  ├── CoreError        - Domain errors returned by cart/totals/mapping  │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  storefront errors (separate crate)                                    │
//! │  ├── ConfigError      - Config file / env failures                     │
//! │  └── ApiError         - What the web UI sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError::InvalidInput → ApiError → UI       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unmatched ingredients are NOT errors. They show up in
//! `MappingPreview::unmatched_count`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller supplied a value the pricing rules cannot accept.
    ///
    /// ## When This Occurs
    /// - Unit price or quantity ≤ 0 on `add_item`
    /// - Menu price ≤ 0 on `preview`
    /// - Ingredient quantity ≤ 0, negative unit cost
    /// - Tax rate above 100%, negative delivery fee
    ///
    /// Always reported synchronously; values are never clamped.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,
}

impl CoreError {
    /// Returns true for the `InvalidInput` family.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CoreError::InvalidInput(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a price string with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Arithmetic would leave the representable range.
    #[error("{field} is too large")]
    Overflow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
