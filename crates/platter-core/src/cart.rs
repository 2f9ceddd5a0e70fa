//! # Cart Aggregator
//!
//! Owns the line items of one customer's cart and derives snapshots from them.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action               Cart Method            Effect                  │
//! │  ─────────               ───────────            ──────                  │
//! │                                                                         │
//! │  Add from menu ────────► add_item() ──────────► push or qty += n       │
//! │                                                                         │
//! │  +/- stepper ──────────► update_quantity() ───► qty = n (n < 1 removes)│
//! │                                                                         │
//! │  Trash icon ───────────► remove_item() ───────► item gone              │
//! │                                                                         │
//! │  Order placed ─────────► clear() ─────────────► empty                  │
//! │                                                                         │
//! │  Render ───────────────► snapshot() ──────────► CartSnapshot (copy)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `product_id` (adding the same product again
//!   increases quantity and keeps the original position and price)
//! - Every stored item has `unit_price > 0` and `quantity >= 1`
//! - Every line total, the subtotal and the item count fit in `i64`; a
//!   change that would break this is rejected and leaves the cart as it was
//! - Items stay in insertion order; removing then re-adding moves a product
//!   to the end
//! - Snapshots are copies; mutating the cart never changes one already handed out

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_quantity, validate_required, validate_unit_price, ValidationResult,
};

// =============================================================================
// Line Item
// =============================================================================

/// One product/quantity pair in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Menu item identifier.
    pub product_id: String,

    /// Display name at time of adding.
    pub name: String,

    /// Price per unit at time of adding.
    pub unit_price: Money,

    /// Always >= 1 while the item is in a cart.
    pub quantity: i64,
}

impl LineItem {
    /// Unit price × quantity, exact. `None` if it does not fit in `i64`.
    #[inline]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_multiply_quantity(self.quantity)
    }
}

/// Input for `Cart::add_item`.
///
/// `quantity` defaults to 1 when absent, which is what tapping a menu card
/// sends.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl NewLineItem {
    /// Convenience constructor for a single unit.
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        NewLineItem {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity: None,
        }
    }

    /// Sets an explicit quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only view of the cart at one point in time.
///
/// ## Invariants
/// - `subtotal == Σ unit_price × quantity`
/// - `item_count == Σ quantity`
/// - `distinct_items == items.len()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub item_count: i64,
    pub distinct_items: usize,
}

impl CartSnapshot {
    /// Builds a snapshot from any list of items.
    ///
    /// ## Errors
    /// `InvalidInput` (overflow) if a line total, the subtotal or the item
    /// count does not fit in `i64`.
    pub fn from_items(items: Vec<LineItem>) -> CoreResult<Self> {
        let (subtotal, item_count) = sum_items(&items)?;
        let distinct_items = items.len();
        Ok(CartSnapshot {
            items,
            subtotal,
            item_count,
            distinct_items,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Subtotal and item count of `items`, with every step checked.
fn sum_items(items: &[LineItem]) -> ValidationResult<(Money, i64)> {
    items
        .iter()
        .try_fold((Money::zero(), 0_i64), |(subtotal, count), item| {
            let line = item.line_total().ok_or_else(|| overflow("line_total"))?;
            let subtotal = subtotal
                .checked_add(line)
                .ok_or_else(|| overflow("subtotal"))?;
            let count = count
                .checked_add(item.quantity)
                .ok_or_else(|| overflow("quantity"))?;
            Ok((subtotal, count))
        })
}

fn overflow(field: &str) -> ValidationError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// The item list is private: every change goes through the methods below.
/// Serializes for persistence; reading back goes through `from_json`, which
/// re-validates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,

    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,

    /// Kept in step with `items` by every mutation.
    #[serde(skip)]
    subtotal: Money,
    #[serde(skip)]
    item_count: i64,
}

/// Wire shape of a persisted cart, trusted only after `Cart::restore`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCart {
    items: Vec<LineItem>,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
            subtotal: Money::zero(),
            item_count: 0,
        }
    }

    /// Rebuilds a cart from a persisted item list.
    ///
    /// Every item is re-validated. Repeated product ids are merged into the
    /// first occurrence, exactly as if the items had been added one by one.
    pub fn restore(items: Vec<LineItem>) -> CoreResult<Self> {
        let mut cart = Cart::new();
        for item in items {
            cart.add_item(NewLineItem {
                product_id: item.product_id,
                name: item.name,
                unit_price: item.unit_price,
                quantity: Some(item.quantity),
            })?;
        }
        Ok(cart)
    }

    /// Parses a cart saved with `to_json`, re-validating its items.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let stored: StoredCart =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
                field: "cart".to_string(),
                reason: e.to_string(),
            })?;
        let mut cart = Cart::restore(stored.items)?;
        cart.created_at = stored.created_at;
        Ok(cart)
    }

    /// Serializes the cart for browser local storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by the incoming
    ///   quantity; name and price stay as first added
    /// - Product not in cart: appended at the end
    ///
    /// ## Errors
    /// `InvalidInput` for an empty product id, a unit price ≤ 0, a quantity
    /// ≤ 0, or a quantity whose line total or cart subtotal would overflow.
    /// The cart is unchanged on error.
    pub fn add_item(&mut self, item: NewLineItem) -> CoreResult<()> {
        validate_required("product_id", &item.product_id)?;
        validate_unit_price(item.unit_price)?;
        let quantity = item.quantity.unwrap_or(1);
        validate_quantity(quantity)?;

        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| overflow("quantity"))?;
            }
            None => items.push(LineItem {
                product_id: item.product_id,
                name: item.name,
                unit_price: item.unit_price,
                quantity,
            }),
        }

        self.replace_items(items)?;
        Ok(())
    }

    /// Sets the quantity of an item.
    ///
    /// ## Behavior
    /// - `new_quantity < 1`: removes the item (same as `remove_item`)
    /// - Product not in cart: no-op
    ///
    /// ## Errors
    /// `InvalidInput` if the new line total or cart subtotal would overflow.
    /// The cart is unchanged on error.
    pub fn update_quantity(&mut self, product_id: &str, new_quantity: i64) -> CoreResult<()> {
        if new_quantity < 1 {
            self.remove_item(product_id);
            return Ok(());
        }

        let mut items = self.items.clone();
        let Some(item) = items.iter_mut().find(|i| i.product_id == product_id) else {
            return Ok(());
        };
        item.quantity = new_quantity;

        self.replace_items(items)?;
        Ok(())
    }

    /// Removes an item by product id. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let Some(index) = self.items.iter().position(|i| i.product_id == product_id) else {
            return false;
        };
        let removed = self.items.remove(index);
        // The removed line was part of a subtotal that fits.
        self.subtotal -= removed.unit_price * removed.quantity;
        self.item_count -= removed.quantity;
        true
    }

    /// Swaps in a new item list once its totals are known to fit.
    fn replace_items(&mut self, items: Vec<LineItem>) -> ValidationResult<()> {
        let (subtotal, item_count) = sum_items(&items)?;
        self.items = items;
        self.subtotal = subtotal;
        self.item_count = item_count;
        Ok(())
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.subtotal = Money::zero();
        self.item_count = 0;
        self.created_at = Utc::now();
    }

    /// Returns a snapshot of the current contents.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            subtotal: self.subtotal,
            item_count: self.item_count,
            distinct_items: self.items.len(),
        }
    }

    /// Read-only view of the items in insertion order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns true if the product is in the cart.
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    /// Number of distinct line items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn item(id: &str, cents: i64) -> NewLineItem {
        NewLineItem::new(id, format!("Dish {}", id), Money::from_cents(cents))
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.items().iter().map(|i| i.product_id.as_str()).collect()
    }

    #[test]
    fn test_cart_add_item_defaults_to_one() {
        let mut cart = Cart::new();
        cart.add_item(item("1", 999)).unwrap();

        let snap = cart.snapshot();
        assert_eq!(snap.distinct_items, 1);
        assert_eq!(snap.item_count, 1);
        assert_eq!(snap.subtotal.cents(), 999);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("1", 999).with_quantity(2)).unwrap();
        cart.add_item(item("2", 100)).unwrap();
        cart.add_item(item("1", 999).with_quantity(3)).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(ids(&cart), vec!["1", "2"]);
        assert_eq!(cart.snapshot().item_count, 6);
    }

    #[test]
    fn test_cart_keeps_first_price_on_repeat_add() {
        let mut cart = Cart::new();
        cart.add_item(item("1", 1000)).unwrap();
        cart.add_item(item("1", 1200)).unwrap();

        assert_eq!(cart.items()[0].unit_price.cents(), 1000);
        assert_eq!(cart.snapshot().subtotal.cents(), 2000);
    }

    #[test]
    fn test_cart_rejects_invalid_input() {
        let mut cart = Cart::new();

        let err = cart.add_item(item("1", 0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(cart.add_item(item("1", -5)).is_err());
        assert!(cart.add_item(item("1", 100).with_quantity(0)).is_err());
        assert!(cart.add_item(item("1", 100).with_quantity(-2)).is_err());
        assert!(cart.add_item(item("", 100)).is_err());

        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_quantity_overflow_is_rejected() {
        let mut cart = Cart::new();
        cart.add_item(item("1", 1).with_quantity(i64::MAX)).unwrap();
        assert!(cart.add_item(item("1", 1)).is_err());
        assert_eq!(cart.items()[0].quantity, i64::MAX);
    }

    #[test]
    fn test_line_total_overflow_is_rejected_on_add() {
        let mut cart = Cart::new();
        let err = cart
            .add_item(item("1", 1000).with_quantity(i64::MAX / 10))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput(ValidationError::Overflow { ref field }) if field == "line_total"
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_overflow_is_rejected_on_add() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 1).with_quantity(i64::MAX - 1)).unwrap();

        let err = cart.add_item(item("b", 2)).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(ids(&cart), vec!["a"]);
        assert_eq!(cart.snapshot().subtotal.cents(), i64::MAX - 1);
    }

    #[test]
    fn test_update_quantity_overflow_keeps_cart() {
        let mut cart = Cart::new();
        cart.add_item(item("pizza", 1000).with_quantity(2)).unwrap();
        let before = cart.snapshot();

        let err = cart.update_quantity("pizza", i64::MAX / 10).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(cart.snapshot(), before);

        cart.update_quantity("pizza", 3).unwrap();
        assert_eq!(cart.snapshot().subtotal.cents(), 3000);
    }

    #[test]
    fn test_snapshot_from_items_checks_overflow() {
        let items = vec![LineItem {
            product_id: "1".into(),
            name: "Caviar".into(),
            unit_price: Money::from_cents(i64::MAX),
            quantity: 2,
        }];
        assert!(CartSnapshot::from_items(items).is_err());

        let snap = CartSnapshot::from_items(Vec::new()).unwrap();
        assert!(snap.is_empty());
        assert!(snap.subtotal.is_zero());
    }

    #[test]
    fn test_remove_keeps_totals_in_step() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 250).with_quantity(2)).unwrap();
        cart.add_item(item("b", 100).with_quantity(3)).unwrap();

        assert!(cart.remove_item("a"));
        let snap = cart.snapshot();
        assert_eq!(snap.subtotal.cents(), 300);
        assert_eq!(snap.item_count, 3);
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let mut cart = Cart::new();
        cart.add_item(item("1", 500).with_quantity(4)).unwrap();
        cart.update_quantity("1", 2).unwrap();
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let mut cart = Cart::new();
        cart.add_item(item("1", 500)).unwrap();
        cart.add_item(item("2", 500)).unwrap();

        cart.update_quantity("1", 0).unwrap();
        cart.update_quantity("2", -1).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_and_remove_absent_are_noops() {
        let mut cart = Cart::new();
        cart.add_item(item("1", 500)).unwrap();
        let before = cart.snapshot();

        cart.update_quantity("missing", 3).unwrap();
        assert!(!cart.remove_item("missing"));
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_remove_then_readd_moves_to_end() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 100)).unwrap();
        cart.add_item(item("b", 100)).unwrap();
        cart.add_item(item("c", 100)).unwrap();

        assert!(cart.remove_item("a"));
        cart.add_item(item("a", 100)).unwrap();
        assert_eq!(ids(&cart), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut cart = Cart::new();
        cart.add_item(item("1", 250)).unwrap();
        let snap = cart.snapshot();

        cart.update_quantity("1", 9).unwrap();
        assert_eq!(snap.items[0].quantity, 1);
        assert_eq!(snap.subtotal.cents(), 250);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(item("1", 999).with_quantity(2)).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.snapshot().subtotal.is_zero());
    }

    #[test]
    fn test_restore_merges_duplicates_and_validates() {
        let items = vec![
            LineItem {
                product_id: "1".into(),
                name: "Naan".into(),
                unit_price: Money::from_cents(300),
                quantity: 2,
            },
            LineItem {
                product_id: "1".into(),
                name: "Naan".into(),
                unit_price: Money::from_cents(300),
                quantity: 1,
            },
        ];
        let cart = Cart::restore(items).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);

        let bad = vec![LineItem {
            product_id: "2".into(),
            name: "Free sample".into(),
            unit_price: Money::zero(),
            quantity: 1,
        }];
        assert!(Cart::restore(bad).is_err());
    }

    #[test]
    fn test_json_persistence_preserves_order() {
        let mut cart = Cart::new();
        cart.add_item(item("b", 450).with_quantity(2)).unwrap();
        cart.add_item(item("a", 120)).unwrap();

        let json = cart.to_json().unwrap();
        assert!(json.contains("\"productId\":\"b\""));

        let restored = Cart::from_json(&json).unwrap();
        assert_eq!(restored.snapshot(), cart.snapshot());
        assert_eq!(restored.created_at(), cart.created_at());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Cart::from_json("{not json").unwrap_err();
        assert!(err.is_invalid_input());
    }
}
