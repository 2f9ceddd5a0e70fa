//! # State Module
//!
//! Storefront state, injected into every command that needs it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┐        ┌──────────────────────┐          │
//! │          │    CartState     │        │  StorefrontConfig    │          │
//! │          │                  │        │                      │          │
//! │          │  Arc<Mutex<      │        │  restaurant_id       │          │
//! │          │    Cart          │        │  tax / delivery fee  │          │
//! │          │  >>              │        │  stock thresholds    │          │
//! │          └──────────────────┘        └──────────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • StorefrontConfig: Read-only after load                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartState;
pub use config::{
    CheckoutSettings, PricingSettings, StockSettings, StoreSettings, StorefrontConfig,
    ENV_DELIVERY_FEE, ENV_ORDER_TYPE, ENV_RESTAURANT_ID, ENV_TAX_RATE,
};
