//! # Commands Module
//!
//! Everything the web UI can ask the storefront to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (exports)
//! ├── cart.rs          ◄─── Cart manipulation
//! ├── checkout.rs      ◄─── Order payload, cart hand-off
//! └── dish_library.rs  ◄─── Ingredient mapping preview
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Cart and pricing
//! fn get_cart(cart: &CartState, config: &StorefrontConfig)
//!
//! // Cart only
//! fn complete_checkout(cart: &CartState)
//!
//! // Config only
//! fn preview_dish_mapping(config: &StorefrontConfig, request: DishPreviewRequest)
//! ```

pub mod cart;
pub mod checkout;
pub mod dish_library;

pub use cart::{add_to_cart, clear_cart, get_cart, remove_from_cart, update_cart_item, CartResponse};
pub use checkout::{
    checkout, complete_checkout, CheckoutRequest, CheckoutResponse, OrderItemRequest, OrderRequest,
};
pub use dish_library::{
    preview_dish_mapping, DishIngredientDto, DishPreviewRequest, DishPreviewResponse,
    MatchedStockDto,
};
