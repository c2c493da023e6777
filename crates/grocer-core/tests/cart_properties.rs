//! Property tests: random action sequences against the cart store.

use std::collections::HashSet;

use grocer_core::{Bill, Cart, CartAction, CartOutcome, ChargeSchedule, InMemoryCatalog, Money};
use proptest::prelude::*;

/// A small id pool so actions collide often. "99" is not in the catalog.
fn product_id() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["1", "2", "5", "7", "15", "99"]).prop_map(str::to_string)
}

fn action() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        4 => product_id().prop_map(CartAction::Add),
        2 => product_id().prop_map(CartAction::Increment),
        3 => product_id().prop_map(CartAction::Decrement),
        1 => product_id().prop_map(CartAction::Remove),
        1 => Just(CartAction::Clear),
        1 => Just(CartAction::HideIndicator),
    ]
}

fn assert_invariants(cart: &Cart) {
    let mut seen = HashSet::new();
    for line in cart.lines() {
        assert!(line.quantity >= 1, "line {} has quantity 0", line.product_id);
        assert!(seen.insert(&line.product_id), "duplicate line {}", line.product_id);
    }

    if cart.is_indicator_visible() {
        assert!(!cart.is_empty(), "indicator visible on an empty cart");
    }

    let sum: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
    assert_eq!(cart.total_item_count(), sum);
}

proptest! {
    #[test]
    fn invariants_hold_after_every_step(actions in prop::collection::vec(action(), 0..60)) {
        let mut cart = Cart::new();
        for action in actions {
            cart.dispatch(action);
            assert_invariants(&cart);
        }
    }

    #[test]
    fn add_always_shows_indicator(
        actions in prop::collection::vec(action(), 0..30),
        id in product_id(),
    ) {
        let mut cart = Cart::new();
        for action in actions {
            cart.dispatch(action);
        }

        let before = cart.quantity_of(&id);
        prop_assert_eq!(cart.add(&id), CartOutcome::Applied);
        prop_assert!(cart.is_indicator_visible());
        prop_assert_eq!(cart.quantity_of(&id), before + 1);
    }

    #[test]
    fn n_adds_give_one_line_of_n(id in product_id(), n in 1u32..50) {
        let mut cart = Cart::new();
        for _ in 0..n {
            cart.add(&id);
        }
        prop_assert_eq!(cart.line_count(), 1);
        prop_assert_eq!(cart.quantity_of(&id), n);
    }

    #[test]
    fn lines_follow_first_insertion_order(actions in prop::collection::vec(action(), 0..60)) {
        let mut cart = Cart::new();
        // Model: ids in the order they (re)entered the cart
        let mut order: Vec<String> = Vec::new();

        for action in actions {
            match &action {
                CartAction::Add(id) if !cart.contains(id) => order.push(id.clone()),
                _ => {}
            }
            cart.dispatch(action);
            order.retain(|id| cart.contains(id));

            let ids: Vec<&String> = cart.lines().iter().map(|l| &l.product_id).collect();
            prop_assert_eq!(ids, order.iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn emptying_the_cart_hides_indicator(actions in prop::collection::vec(action(), 0..40)) {
        let mut cart = Cart::new();
        for action in actions {
            let was_empty = cart.is_empty();
            cart.dispatch(action);
            if !was_empty && cart.is_empty() {
                prop_assert!(!cart.is_indicator_visible());
            }
        }
    }

    #[test]
    fn grand_total_matches_charges(actions in prop::collection::vec(action(), 0..40)) {
        let catalog = InMemoryCatalog::sample();
        let schedule = ChargeSchedule::default();
        let mut cart = Cart::new();
        for action in actions {
            cart.dispatch(action);
        }

        let bill = Bill::compute(&cart, &catalog, &schedule);
        let charges = bill.delivery + bill.handling + bill.small_cart + bill.donation;
        prop_assert_eq!(bill.grand_total, bill.items_total + charges);
        prop_assert_eq!(bill.items_total, cart.items_total(&catalog));

        if bill.items_total >= schedule.waiver_threshold {
            prop_assert_eq!(bill.delivery, Money::zero());
            prop_assert_eq!(bill.small_cart, Money::zero());
        }
    }
}
