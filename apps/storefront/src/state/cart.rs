//! # Cart State
//!
//! Owns the customer's cart for the lifetime of the storefront.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action                Command                 Cart Change           │
//! │  ─────────                ───────                 ───────────           │
//! │                                                                         │
//! │  Add to Cart ────────────► add_to_cart() ───────► add or merge line     │
//! │                                                                         │
//! │  +/- Quantity ───────────► update_cart_item() ──► set qty (<1 removes)  │
//! │                                                                         │
//! │  Remove ─────────────────► remove_from_cart() ──► drop line             │
//! │                                                                         │
//! │  Order placed ───────────► complete_checkout() ─► clear                 │
//! │                                                                         │
//! │  View Cart ──────────────► get_cart() ──────────► (read only)           │
//! │                                                                         │
//! │  NOTE: All operations take the Mutex; reads release it quickly.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use platter_core::Cart;
use tracing::error;

use crate::error::ApiError;

/// Shared handle to the single cart.
///
/// `Arc<Mutex<Cart>>`: clones hand out the same cart, and only one command
/// mutates it at a time. A poisoned lock becomes an `INTERNAL` error rather
/// than a panic.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a cart restored from storage by the host.
    pub fn from_cart(cart: Cart) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock()?;
        Ok(f(&cart))
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(item))??;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock()?;
        Ok(f(&mut cart))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Cart>, ApiError> {
        self.cart.lock().map_err(|e| {
            error!("Cart mutex poisoned: {}", e);
            ApiError::internal("Cart is unavailable")
        })
    }
}
