//! # platter-core: Pure Pricing Logic for Platter
//!
//! This crate is the **heart** of Platter. It contains the cart, checkout
//! and dish-costing rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Platter Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web UI (restaurant SPA)                      │   │
//! │  │     Menu ──► Cart ──► Checkout        Dish Library preview      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               storefront (state, config, commands)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ platter-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │ quantity │ │  cart   │ │ totals  │ │ mapping │  │   │
//! │  │   │  Money  │ │ Quantity │ │  Cart   │ │ Order   │ │ Preview │  │   │
//! │  │   └─────────┘ └──────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic and rounding
//! - [`quantity`] - Fixed-point ingredient quantities
//! - [`types`] - TaxRate, order and stock enums
//! - [`cart`] - Cart aggregator and snapshots
//! - [`totals`] - Tax, delivery fee and grand total
//! - [`mapping`] - Ingredient mapping preview (cost, servings, margin)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, every time
//! 2. **No I/O**: network, storage and matching are the caller's job
//! 3. **Integer Money**: cents (i64) and thousandths (Quantity), never floats
//! 4. **Explicit Errors**: bad input is `CoreError::InvalidInput`, never clamped
//!
//! ## Example Usage
//!
//! ```rust
//! use platter_core::{compute_totals, Cart, Money, NewLineItem, PricingConfig};
//!
//! let mut cart = Cart::new();
//! cart.add_item(NewLineItem::new("margherita", "Margherita", Money::from_cents(1000)).with_quantity(2))?;
//! cart.add_item(NewLineItem::new("lemonade", "Lemonade", Money::from_cents(500)))?;
//!
//! let totals = compute_totals(&cart.snapshot(), &PricingConfig::default())?;
//! assert_eq!(totals.grand_total.to_string(), "$32.50");
//! # Ok::<(), platter_core::CoreError>(())
//! ```

pub mod cart;
pub mod error;
pub mod mapping;
pub mod money;
pub mod quantity;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSnapshot, LineItem, NewLineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use mapping::{
    preview, preview_matched, preview_with_thresholds, IngredientPreview, IngredientRequirement,
    LookupFn, MappingPreview, StockLookup, StockMatch, StockThresholds,
};
pub use money::Money;
pub use quantity::Quantity;
pub use totals::{compute_totals, OrderTotals, PricingConfig};
pub use types::*;
