//! # Cart Commands
//!
//! Cart manipulation for the menu and cart pages.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │ Payload  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │               │              │
//! │                   add_to_cart        checkout     complete_checkout     │
//! │                   update_item      (checkout.rs)    (clears cart)       │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command answers with the whole cart and freshly computed totals,
//! so the UI never recomputes anything itself. A change the totals cannot
//! represent is rejected before it reaches the shared cart.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use platter_core::{compute_totals, Cart, CartSnapshot, LineItem, NewLineItem, OrderTotals, PricingConfig};

use crate::error::ApiError;
use crate::state::{CartState, StorefrontConfig};

/// Cart response including items, snapshot and checkout totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub snapshot: CartSnapshot,
    pub totals: OrderTotals,
}

impl CartResponse {
    pub fn build(cart: &Cart, pricing: &PricingConfig) -> Result<Self, ApiError> {
        let snapshot = cart.snapshot();
        let totals = compute_totals(&snapshot, pricing)?;
        Ok(CartResponse {
            items: snapshot.items.clone(),
            snapshot,
            totals,
        })
    }
}

/// Applies `change` to a copy of the cart and keeps it only if the result
/// can be priced.
fn apply_change<F>(
    cart: &CartState,
    pricing: &PricingConfig,
    change: F,
) -> Result<CartResponse, ApiError>
where
    F: FnOnce(&mut Cart) -> Result<(), ApiError>,
{
    cart.with_cart_mut(|c| {
        let mut next = c.clone();
        change(&mut next)?;
        let response = CartResponse::build(&next, pricing)?;
        *c = next;
        Ok::<_, ApiError>(response)
    })?
}

/// Gets the current cart contents.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  YOUR CART                                         3 items     │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Margherita              x2              $20.00                │
/// │  Lemonade                x1               $5.00                │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Subtotal                                $25.00                │
/// │  Tax (10%)                                $2.50                │
/// │  Delivery                                 $5.00                │
/// │  ──────────────────────────────────────────────────            │
/// │  TOTAL                                   $32.50                │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState, config: &StorefrontConfig) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    let pricing = config.pricing_config()?;
    cart.with_cart(|c| CartResponse::build(c, &pricing))?
}

/// Adds a menu item to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases, first price and name are kept
/// - Not in cart: appended with the given price
/// - Missing quantity means 1
pub fn add_to_cart(
    cart: &CartState,
    config: &StorefrontConfig,
    item: NewLineItem,
) -> Result<CartResponse, ApiError> {
    debug!(
        product_id = %item.product_id,
        quantity = ?item.quantity,
        "add_to_cart command"
    );
    let pricing = config.pricing_config()?;

    apply_change(cart, &pricing, |c| Ok(c.add_item(item)?))
}

/// Sets the quantity of an item in the cart.
///
/// Quantity below 1 removes the item; an unknown product is a no-op.
/// A quantity whose totals would overflow is a `VALIDATION_ERROR` and the
/// cart keeps its previous contents.
pub fn update_cart_item(
    cart: &CartState,
    config: &StorefrontConfig,
    product_id: String,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");
    let pricing = config.pricing_config()?;

    apply_change(cart, &pricing, |c| Ok(c.update_quantity(&product_id, quantity)?))
}

/// Removes an item from the cart. Removing an absent item is a no-op.
pub fn remove_from_cart(
    cart: &CartState,
    config: &StorefrontConfig,
    product_id: String,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    let pricing = config.pricing_config()?;

    cart.with_cart_mut(|c| {
        if !c.remove_item(&product_id) {
            debug!(product_id = %product_id, "Product was not in cart");
        }
        CartResponse::build(c, &pricing)
    })?
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartState, config: &StorefrontConfig) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    let pricing = config.pricing_config()?;

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::build(c, &pricing)
    })?
}
