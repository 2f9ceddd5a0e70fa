//! # Platter Storefront Library
//!
//! The layer between the restaurant web UI and `platter-core`: it owns the
//! cart, loads pricing configuration, logs, and shapes every answer (and
//! every failure) for the UI.
//!
//! ## Module Organization
//! ```text
//! platter_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront facade, logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state (Arc<Mutex<Cart>>)
//! │   └── config.rs   ◄─── StorefrontConfig (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Order payload commands
//! │   └── dish_library.rs ◄─── Ingredient mapping preview
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Startup                                │
//! │                                                                         │
//! │  1. init_tracing() ────────────────────────────────────────────────────►│
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: info, platter crates at debug                            │
//! │                                                                         │
//! │  2. StorefrontConfig::load_or_default(None) ──────────────────────────► │
//! │     • platter.toml from the platform config dir                         │
//! │     • PLATTER_* environment overrides                                   │
//! │                                                                         │
//! │  3. Storefront::new(config) ──────────────────────────────────────────► │
//! │     • CartState: empty cart behind a Mutex                              │
//! │     • Config: read-only from here on                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use platter_core::{Money, NewLineItem};
//! use platter_storefront::{CheckoutRequest, Storefront, StorefrontConfig};
//!
//! let store = Storefront::new(StorefrontConfig::default());
//! store.add_to_cart(NewLineItem::new("margherita", "Margherita", Money::from_cents(1000)).with_quantity(2))?;
//! store.add_to_cart(NewLineItem::new("lemonade", "Lemonade", Money::from_cents(500)))?;
//!
//! let order = store.checkout(CheckoutRequest::default())?;
//! assert_eq!(order.order.total_amount_cents.cents(), 3250);
//!
//! store.complete_checkout()?;
//! assert!(store.get_cart()?.items.is_empty());
//! # Ok::<(), platter_storefront::ApiError>(())
//! ```

pub mod commands;
pub mod error;
pub mod state;

use platter_core::NewLineItem;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use commands::{
    CartResponse, CheckoutRequest, CheckoutResponse, DishPreviewRequest, DishPreviewResponse,
    OrderItemRequest, OrderRequest,
};
pub use error::{ApiError, ConfigError, ErrorCode};
pub use state::{CartState, StorefrontConfig};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,platter=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=platter_storefront=trace` - Trace the storefront only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Calling it again (or after the host installed its own subscriber) is a
/// no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// =============================================================================
// Storefront Facade
// =============================================================================

/// Cart plus configuration, for hosts that want one handle.
///
/// Cloning shares the cart.
#[derive(Debug, Clone)]
pub struct Storefront {
    cart: CartState,
    config: StorefrontConfig,
}

impl Storefront {
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_cart(CartState::new(), config)
    }

    /// Uses a cart the host already holds (e.g. restored from storage).
    pub fn with_cart(cart: CartState, config: StorefrontConfig) -> Self {
        info!(
            restaurant_id = config.restaurant_id(),
            tax_rate_bps = config.pricing.tax_rate_bps,
            delivery_fee_cents = config.pricing.delivery_fee_cents,
            "Storefront initialized"
        );
        Storefront { cart, config }
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn get_cart(&self) -> Result<CartResponse, ApiError> {
        commands::get_cart(&self.cart, &self.config)
    }

    pub fn add_to_cart(&self, item: NewLineItem) -> Result<CartResponse, ApiError> {
        commands::add_to_cart(&self.cart, &self.config, item)
    }

    pub fn update_cart_item(
        &self,
        product_id: impl Into<String>,
        quantity: i64,
    ) -> Result<CartResponse, ApiError> {
        commands::update_cart_item(&self.cart, &self.config, product_id.into(), quantity)
    }

    pub fn remove_from_cart(&self, product_id: impl Into<String>) -> Result<CartResponse, ApiError> {
        commands::remove_from_cart(&self.cart, &self.config, product_id.into())
    }

    pub fn clear_cart(&self) -> Result<CartResponse, ApiError> {
        commands::clear_cart(&self.cart, &self.config)
    }

    pub fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutResponse, ApiError> {
        commands::checkout(&self.cart, &self.config, request)
    }

    pub fn complete_checkout(&self) -> Result<(), ApiError> {
        commands::complete_checkout(&self.cart)
    }

    pub fn preview_dish_mapping(
        &self,
        request: DishPreviewRequest,
    ) -> Result<DishPreviewResponse, ApiError> {
        commands::preview_dish_mapping(&self.config, request)
    }
}
