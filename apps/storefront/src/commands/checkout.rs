//! # Checkout Commands
//!
//! Turns the cart into the `POST /orders` body the web host submits.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  1. checkout(request)                                                   │
//! │     ├── Empty cart? ──────────────────────► CART_ERROR                  │
//! │     ├── snapshot + compute_totals                                       │
//! │     └── OrderRequest { restaurant_id, items, total, status: pending }   │
//! │                                                                         │
//! │  2. Host POSTs the payload                                              │
//! │                                                                         │
//! │  3. complete_checkout() on success ───────► cart cleared                │
//! │     (on failure the cart is untouched and the user can retry)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use platter_core::{compute_totals, CoreError, LineItem, Money, OrderStatus, OrderTotals, OrderType};

use crate::error::ApiError;
use crate::state::{CartState, StorefrontConfig};

/// What the checkout page sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Falls back to the configured default order type.
    #[serde(default)]
    pub order_type: Option<OrderType>,

    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// One line of the order body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItemRequest {
    pub menu_item_id: String,
    pub quantity: i64,
    pub price_cents: Money,
}

impl From<&LineItem> for OrderItemRequest {
    fn from(item: &LineItem) -> Self {
        OrderItemRequest {
            menu_item_id: item.product_id.clone(),
            quantity: item.quantity,
            price_cents: item.unit_price,
        }
    }
}

/// The order-creation body, in the REST API's snake_case shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderRequest {
    pub restaurant_id: i64,
    pub items: Vec<OrderItemRequest>,
    pub total_amount_cents: Money,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub special_instructions: Option<String>,

    /// Idempotency key so a retried submission can be recognised.
    #[ts(as = "String")]
    pub client_reference: Uuid,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Checkout page data: the order body plus the breakdown shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order: OrderRequest,
    pub totals: OrderTotals,
}

/// Builds the order payload from the current cart.
///
/// The cart is left as is; call [`complete_checkout`] once the host has
/// confirmed the order was accepted.
///
/// ## Errors
/// - `CART_ERROR` if the cart is empty
/// - `CONFIG_ERROR` if the pricing configuration is invalid
pub fn checkout(
    cart: &CartState,
    config: &StorefrontConfig,
    request: CheckoutRequest,
) -> Result<CheckoutResponse, ApiError> {
    debug!(order_type = ?request.order_type, "checkout command");
    let pricing = config.pricing_config()?;

    let snapshot = cart.with_cart(|c| c.snapshot())?;
    if snapshot.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let totals = compute_totals(&snapshot, &pricing)?;
    let order = OrderRequest {
        restaurant_id: config.restaurant_id(),
        items: snapshot.items.iter().map(OrderItemRequest::from).collect(),
        total_amount_cents: totals.grand_total,
        order_type: request
            .order_type
            .unwrap_or(config.checkout.default_order_type),
        status: OrderStatus::Pending,
        special_instructions: request
            .special_instructions
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        client_reference: Uuid::new_v4(),
        created_at: Utc::now(),
    };

    info!(
        client_reference = %order.client_reference,
        items = order.items.len(),
        total = %totals.grand_total,
        "Order payload built"
    );

    Ok(CheckoutResponse { order, totals })
}

/// Clears the cart after the host reports a successful submission.
pub fn complete_checkout(cart: &CartState) -> Result<(), ApiError> {
    debug!("complete_checkout command");
    cart.with_cart_mut(|c| c.clear())?;
    info!("Checkout completed, cart cleared");
    Ok(())
}
