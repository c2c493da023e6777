//! # Cart Store
//!
//! The shopping cart: (product, quantity) lines plus the flag that shows or
//! hides the floating "view cart" affordance.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Event            CartAction              Cart Change                │
//! │  ────────            ──────────              ───────────                │
//! │                                                                         │
//! │  "Add" button ─────► Add(id) ──────────────► qty += 1 or push {id, 1}  │
//! │                                              indicator = true          │
//! │                                                                         │
//! │  "+" stepper ──────► Increment(id) ────────► qty += 1  (absent: no-op) │
//! │                                                                         │
//! │  "-" stepper ──────► Decrement(id) ────────► qty -= 1, or drop line    │
//! │                                              at 1   (absent: no-op)    │
//! │                                                                         │
//! │  Trash icon ───────► Remove(id) ───────────► drop line (idempotent)    │
//! │                                                                         │
//! │  After order ──────► Clear ────────────────► lines = [], hidden        │
//! │                                                                         │
//! │  Dismiss bubble ───► HideIndicator ────────► hidden, lines untouched   │
//! │                                                                         │
//! │  Any op that empties the cart hides the indicator in the same step.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line has `quantity >= 1`
//! - No two lines share a product id
//! - Lines stay in first-insertion order
//! - The indicator is never visible while the cart is empty
//!
//! The store does not consult the catalog. An unknown product id still gets
//! a line; whether it can be priced is decided by [`crate::pricing`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::Money;

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Catalog product id. Opaque to the cart.
    pub product_id: String,

    /// Always at least 1; a line that would reach 0 is removed instead.
    pub quantity: u32,
}

impl CartLine {
    /// `quantity × unit price`, if the catalog knows the product.
    pub fn subtotal(&self, catalog: &impl Catalog) -> Option<Money> {
        catalog
            .unit_price(&self.product_id)
            .map(|price| price.multiply_quantity(self.quantity))
    }
}

// =============================================================================
// Actions and Outcomes
// =============================================================================

/// A cart mutation. `Cart::dispatch` is the single write path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "productId", rename_all = "camelCase")]
#[ts(export)]
pub enum CartAction {
    Add(String),
    Increment(String),
    Decrement(String),
    Remove(String),
    Clear,
    HideIndicator,
}

impl CartAction {
    /// The product id the action targets, if any.
    pub fn product_id(&self) -> Option<&str> {
        match self {
            CartAction::Add(id)
            | CartAction::Increment(id)
            | CartAction::Decrement(id)
            | CartAction::Remove(id) => Some(id),
            CartAction::Clear | CartAction::HideIndicator => None,
        }
    }
}

/// Whether an action changed the cart.
///
/// Increment/decrement/remove on a product that is not in the cart, or
/// clearing an already-empty cart, are `Ignored`. Neither outcome is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum CartOutcome {
    Applied,
    Ignored,
}

impl CartOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CartOutcome::Applied)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart store.
///
/// Only `Serialize` is derived: a cart is always built empty and changed
/// through its operations, so it can never be deserialized into a state that
/// breaks the invariants above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    indicator_visible: bool,
}

impl Cart {
    /// Creates an empty cart with the indicator hidden.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Applies one action.
    pub fn dispatch(&mut self, action: CartAction) -> CartOutcome {
        match action {
            CartAction::Add(id) => self.add(&id),
            CartAction::Increment(id) => self.increment(&id),
            CartAction::Decrement(id) => self.decrement(&id),
            CartAction::Remove(id) => self.remove(&id),
            CartAction::Clear => self.clear(),
            CartAction::HideIndicator => self.hide_indicator(),
        }
    }

    /// Adds one unit of a product and shows the indicator.
    pub fn add(&mut self, product_id: &str) -> CartOutcome {
        match self.line_mut(product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product_id: product_id.to_string(),
                quantity: 1,
            }),
        }
        self.indicator_visible = true;
        CartOutcome::Applied
    }

    /// Adds one unit to an existing line. Absent products are ignored.
    pub fn increment(&mut self, product_id: &str) -> CartOutcome {
        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                CartOutcome::Applied
            }
            None => CartOutcome::Ignored,
        }
    }

    /// Removes one unit; a line at quantity 1 is dropped.
    pub fn decrement(&mut self, product_id: &str) -> CartOutcome {
        let Some(index) = self.position(product_id) else {
            return CartOutcome::Ignored;
        };

        if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
        } else {
            self.lines.remove(index);
            self.sync_indicator();
        }
        CartOutcome::Applied
    }

    /// Drops the line for a product, whatever its quantity.
    pub fn remove(&mut self, product_id: &str) -> CartOutcome {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.sync_indicator();

        if self.lines.len() == before {
            CartOutcome::Ignored
        } else {
            CartOutcome::Applied
        }
    }

    /// Empties the cart and hides the indicator.
    pub fn clear(&mut self) -> CartOutcome {
        if self.lines.is_empty() && !self.indicator_visible {
            return CartOutcome::Ignored;
        }
        self.lines.clear();
        self.indicator_visible = false;
        CartOutcome::Applied
    }

    /// Hides the indicator without touching the lines.
    pub fn hide_indicator(&mut self) -> CartOutcome {
        if !self.indicator_visible {
            return CartOutcome::Ignored;
        }
        self.indicator_visible = false;
        CartOutcome::Applied
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Lines in first-insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the floating "view cart" affordance is shown.
    pub fn is_indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    /// Sum of all quantities.
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Quantity of a product, 0 if absent.
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.position(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line subtotals for lines the catalog can price.
    pub fn items_total(&self, catalog: &impl Catalog) -> Money {
        self.lines
            .iter()
            .filter_map(|line| line.subtotal(catalog))
            .sum()
    }

    /// An owned copy for observers.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            indicator_visible: self.indicator_visible,
            total_item_count: self.total_item_count(),
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id == product_id)
    }

    fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }

    fn sync_indicator(&mut self) {
        if self.lines.is_empty() {
            self.indicator_visible = false;
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// What cart observers receive after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub indicator_visible: bool,
    #[ts(type = "number")]
    pub total_item_count: u64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add("7");
        }

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("7"), 3);
        assert!(cart.is_indicator_visible());
    }

    #[test]
    fn test_salt_scenario() {
        let mut cart = Cart::new();

        cart.add("7");
        cart.add("7");
        assert_eq!(cart.quantity_of("7"), 2);

        cart.decrement("7");
        assert_eq!(cart.quantity_of("7"), 1);
        assert!(cart.is_indicator_visible());

        cart.decrement("7");
        assert!(!cart.contains("7"));
        assert!(cart.is_empty());
        assert!(!cart.is_indicator_visible());

        // Repeating is a no-op
        assert_eq!(cart.decrement("7"), CartOutcome::Ignored);
    }

    #[test]
    fn test_increment_absent_is_ignored() {
        let mut cart = Cart::new();
        assert_eq!(cart.increment("1"), CartOutcome::Ignored);
        assert!(cart.is_empty());
        assert!(!cart.is_indicator_visible());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add("1");
        cart.add("2");

        assert_eq!(cart.remove("1"), CartOutcome::Applied);
        assert_eq!(cart.remove("1"), CartOutcome::Ignored);
        assert!(cart.is_indicator_visible());

        cart.remove("2");
        assert!(!cart.is_indicator_visible());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add("1");
        cart.add("5");

        assert_eq!(cart.clear(), CartOutcome::Applied);
        assert!(cart.is_empty());
        assert!(!cart.is_indicator_visible());
        assert_eq!(cart.total_item_count(), 0);

        assert_eq!(cart.clear(), CartOutcome::Ignored);
    }

    #[test]
    fn test_hide_indicator_keeps_lines() {
        let mut cart = Cart::new();
        cart.add("3");

        assert_eq!(cart.hide_indicator(), CartOutcome::Applied);
        assert!(!cart.is_indicator_visible());
        assert_eq!(cart.quantity_of("3"), 1);

        // The next add brings it back
        cart.add("4");
        assert!(cart.is_indicator_visible());
    }

    #[test]
    fn test_unknown_product_still_gets_a_line() {
        let catalog = InMemoryCatalog::sample();
        let mut cart = Cart::new();
        cart.add("999");

        assert_eq!(cart.quantity_of("999"), 1);
        assert_eq!(cart.lines()[0].subtotal(&catalog), None);
        assert!(cart.items_total(&catalog).is_zero());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add("5");
        cart.add("1");
        cart.add("5");

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["5", "1"]);
    }

    #[test]
    fn test_dispatch_and_snapshot() {
        let mut cart = Cart::new();
        cart.dispatch(CartAction::Add("1".to_string()));
        cart.dispatch(CartAction::Add("1".to_string()));
        cart.dispatch(CartAction::Add("5".to_string()));

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.total_item_count, 3);
        assert!(snapshot.indicator_visible);
        assert_eq!(snapshot.lines.len(), 2);

        let catalog = InMemoryCatalog::sample();
        assert_eq!(cart.items_total(&catalog), Money::from_rupees(260));
    }

    #[test]
    fn test_action_serde_shape() {
        let json = serde_json::to_value(CartAction::Add("7".to_string())).unwrap();
        assert_eq!(json["type"], "add");
        assert_eq!(json["productId"], "7");

        let json = serde_json::to_value(CartAction::Clear).unwrap();
        assert_eq!(json["type"], "clear");

        assert_eq!(CartAction::Remove("2".to_string()).product_id(), Some("2"));
        assert_eq!(CartAction::HideIndicator.product_id(), None);
    }
}
