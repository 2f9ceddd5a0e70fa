//! Property tests for the cart aggregator and the totals calculator.

use platter_core::{compute_totals, Cart, CartSnapshot, LineItem, Money, NewLineItem, PricingConfig, TaxRate};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { id: u8, price: i64, qty: Option<i64> },
    Update { id: u8, qty: i64 },
    Remove { id: u8 },
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..6, 1i64..50_000, proptest::option::of(1i64..25))
            .prop_map(|(id, price, qty)| Op::Add { id, price, qty }),
        3 => (0u8..6, -3i64..25).prop_map(|(id, qty)| Op::Update { id, qty }),
        2 => (0u8..6).prop_map(|id| Op::Remove { id }),
        1 => Just(Op::Clear),
    ]
}

fn product_id(id: u8) -> String {
    format!("dish-{}", id)
}

/// Straight-line model of the cart: (id, price, qty) in insertion order.
fn apply_model(model: &mut Vec<(String, i64, i64)>, op: &Op) {
    match op {
        Op::Add { id, price, qty } => {
            let pid = product_id(*id);
            let qty = qty.unwrap_or(1);
            match model.iter_mut().find(|(p, _, _)| *p == pid) {
                Some(entry) => entry.2 += qty,
                None => model.push((pid, *price, qty)),
            }
        }
        Op::Update { id, qty } => {
            let pid = product_id(*id);
            if *qty < 1 {
                model.retain(|(p, _, _)| *p != pid);
            } else if let Some(entry) = model.iter_mut().find(|(p, _, _)| *p == pid) {
                entry.2 = *qty;
            }
        }
        Op::Remove { id } => {
            let pid = product_id(*id);
            model.retain(|(p, _, _)| *p != pid);
        }
        Op::Clear => model.clear(),
    }
}

fn apply_cart(cart: &mut Cart, op: &Op) {
    match op {
        Op::Add { id, price, qty } => {
            let mut item = NewLineItem::new(product_id(*id), "Dish", Money::from_cents(*price));
            item.quantity = *qty;
            cart.add_item(item).expect("valid add");
        }
        Op::Update { id, qty } => cart
            .update_quantity(&product_id(*id), *qty)
            .expect("valid update"),
        Op::Remove { id } => {
            cart.remove_item(&product_id(*id));
        }
        Op::Clear => cart.clear(),
    }
}

fn line_items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
    proptest::collection::vec((1i64..100_000, 1i64..50), 0..12).prop_map(|lines| {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, (price, qty))| LineItem {
                product_id: format!("p{}", i),
                name: format!("Item {}", i),
                unit_price: Money::from_cents(price),
                quantity: qty,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: subtotal and item count always match the current items.
    #[test]
    fn snapshot_matches_items_after_any_sequence(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let mut cart = Cart::new();
        let mut model = Vec::new();

        for op in &ops {
            apply_cart(&mut cart, op);
            apply_model(&mut model, op);

            let snap = cart.snapshot();
            let expected_subtotal: i64 = snap.items.iter().map(|i| i.unit_price.cents() * i.quantity).sum();
            let expected_count: i64 = snap.items.iter().map(|i| i.quantity).sum();
            prop_assert_eq!(snap.subtotal.cents(), expected_subtotal);
            prop_assert_eq!(snap.item_count, expected_count);
            prop_assert_eq!(snap.distinct_items, snap.items.len());
            prop_assert!(snap.items.iter().all(|i| i.quantity >= 1));
        }

        let actual: Vec<(String, i64, i64)> = cart
            .items()
            .iter()
            .map(|i| (i.product_id.clone(), i.unit_price.cents(), i.quantity))
            .collect();
        prop_assert_eq!(actual, model);
    }

    /// Property: updating to zero or below is the same as removing.
    #[test]
    fn update_below_one_equals_remove(
        ops in proptest::collection::vec(op_strategy(), 0..30),
        target in 0u8..6,
        qty in -5i64..1,
    ) {
        let mut updated = Cart::new();
        for op in &ops {
            apply_cart(&mut updated, op);
        }
        let mut removed = updated.clone();

        updated.update_quantity(&product_id(target), qty).unwrap();
        removed.remove_item(&product_id(target));

        prop_assert_eq!(updated.snapshot(), removed.snapshot());
    }

    /// Property: totals do not depend on item order.
    #[test]
    fn totals_are_order_independent(
        (items, shuffled) in line_items_strategy()
            .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle())),
        bps in 0u32..=10_000,
        fee in 0i64..2_000,
    ) {
        let config = PricingConfig::new(TaxRate::from_bps(bps), Money::from_cents(fee)).unwrap();
        let a = compute_totals(&CartSnapshot::from_items(items).unwrap(), &config).unwrap();
        let b = compute_totals(&CartSnapshot::from_items(shuffled).unwrap(), &config).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Property: grand total always decomposes into its parts.
    #[test]
    fn grand_total_decomposes(items in line_items_strategy(), bps in 0u32..=10_000, fee in 0i64..2_000) {
        let config = PricingConfig::new(TaxRate::from_bps(bps), Money::from_cents(fee)).unwrap();
        let snap = CartSnapshot::from_items(items).unwrap();
        let totals = compute_totals(&snap, &config).unwrap();

        prop_assert_eq!(totals.subtotal, snap.subtotal);
        prop_assert_eq!(totals.grand_total, totals.subtotal + totals.tax_amount + totals.delivery_fee);
        prop_assert!(totals.tax_amount <= totals.subtotal);
        prop_assert!(!totals.tax_amount.is_negative());
    }

    /// Property: a rejected quantity leaves the cart exactly as it was.
    #[test]
    fn overflowing_update_leaves_cart_unchanged(
        ops in proptest::collection::vec(op_strategy(), 0..30),
        target in 0u8..6,
        qty in (i64::MAX / 2)..=i64::MAX,
    ) {
        let mut cart = Cart::new();
        for op in &ops {
            apply_cart(&mut cart, op);
        }
        let before = cart.snapshot();

        match cart.update_quantity(&product_id(target), qty) {
            Ok(()) => {
                let snap = cart.snapshot();
                let expected: Option<i64> = snap.items.iter().try_fold(0i64, |acc, i| {
                    i.unit_price.cents().checked_mul(i.quantity).and_then(|line| acc.checked_add(line))
                });
                prop_assert_eq!(Some(snap.subtotal.cents()), expected);
            }
            Err(err) => {
                prop_assert!(err.is_invalid_input());
                prop_assert_eq!(cart.snapshot(), before);
            }
        }
    }

    /// Property: snapshot and totals are idempotent on unchanged state.
    #[test]
    fn snapshot_and_totals_are_idempotent(ops in proptest::collection::vec(op_strategy(), 0..30)) {
        let mut cart = Cart::new();
        for op in &ops {
            apply_cart(&mut cart, op);
        }
        let config = PricingConfig::default();

        let first = cart.snapshot();
        let second = cart.snapshot();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(compute_totals(&first, &config).unwrap(), compute_totals(&second, &config).unwrap());
    }
}
