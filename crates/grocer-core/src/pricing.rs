//! # Bill Pricing
//!
//! Turns cart lines into the bill shown on the checkout screen.
//!
//! ## Bill Breakdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart: Wheat ×2 (₹100), Sugar ×1 (₹60)                                  │
//! │                                                                         │
//! │  Items total ...................... ₹260   (MRP ₹280, saved ₹20)       │
//! │  Delivery charge .................. ₹0     waived: 260 >= 99           │
//! │  Handling charge .................. ₹11                                │
//! │  Small cart charge ................ ₹0     waived: 260 >= 99           │
//! │  Donation ......................... ₹1                                 │
//! │  ─────────────────────────────────────────                             │
//! │  Grand total ...................... ₹272                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One threshold, not tiers: at or above `waiver_threshold` both the delivery
//! and the small-cart charge drop to zero. Handling and donation always apply
//! to a non-empty cart. An empty cart bills nothing at all.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::money::Money;
use crate::validation::{validate_price, ValidationResult};

// =============================================================================
// Charge Schedule
// =============================================================================

/// Flat charges added on top of the items total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChargeSchedule {
    pub delivery: Money,
    pub handling: Money,
    pub small_cart: Money,
    pub donation: Money,
    /// Items total at which delivery and small-cart are waived.
    pub waiver_threshold: Money,
}

impl Default for ChargeSchedule {
    fn default() -> Self {
        ChargeSchedule {
            delivery: Money::from_rupees(20),
            handling: Money::from_rupees(11),
            small_cart: Money::from_rupees(20),
            donation: Money::from_rupees(1),
            waiver_threshold: Money::from_rupees(99),
        }
    }
}

impl ChargeSchedule {
    /// Rejects negative amounts.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_price("delivery", self.delivery)?;
        validate_price("handling", self.handling)?;
        validate_price("small_cart", self.small_cart)?;
        validate_price("donation", self.donation)?;
        validate_price("waiver_threshold", self.waiver_threshold)?;
        Ok(())
    }

    /// Whether `items_total` is high enough to waive delivery and small-cart.
    #[inline]
    pub fn is_waived(&self, items_total: Money) -> bool {
        items_total >= self.waiver_threshold
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A priced cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillLine {
    pub product_id: String,
    pub name: String,
    pub quantity_label: String,
    pub quantity: u32,
    pub unit_price: Money,
    /// Per-unit MRP (original price when discounted).
    pub unit_mrp: Money,
    pub subtotal: Money,
}

/// The full checkout breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Bill {
    pub lines: Vec<BillLine>,

    /// Product ids in the cart that the catalog does not know.
    pub unpriced: Vec<String>,

    pub items_total: Money,
    pub mrp_total: Money,
    pub savings: Money,

    pub delivery: Money,
    pub handling: Money,
    pub small_cart: Money,
    pub donation: Money,

    pub grand_total: Money,

    /// How much more to add to reach the waiver threshold, 0 once met.
    pub amount_to_waiver: Money,
}

impl Bill {
    /// Prices a cart against a catalog and a charge schedule.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::{Bill, Cart, ChargeSchedule, InMemoryCatalog, Money};
    ///
    /// let catalog = InMemoryCatalog::sample();
    /// let mut cart = Cart::new();
    /// cart.add("7"); // Salt, ₹25
    ///
    /// let bill = Bill::compute(&cart, &catalog, &ChargeSchedule::default());
    /// assert_eq!(bill.delivery, Money::from_rupees(20));
    /// assert_eq!(bill.amount_to_waiver, Money::from_rupees(74));
    /// assert_eq!(bill.grand_total, Money::from_rupees(25 + 20 + 11 + 20 + 1));
    /// ```
    pub fn compute(cart: &Cart, catalog: &impl Catalog, schedule: &ChargeSchedule) -> Bill {
        let mut lines = Vec::with_capacity(cart.line_count());
        let mut unpriced = Vec::new();

        for line in cart.lines() {
            match catalog.get(&line.product_id) {
                Some(product) => lines.push(BillLine {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    quantity_label: product.quantity_label.clone(),
                    quantity: line.quantity,
                    unit_price: product.price,
                    unit_mrp: product.mrp(),
                    subtotal: product.price.multiply_quantity(line.quantity),
                }),
                None => unpriced.push(line.product_id.clone()),
            }
        }

        let items_total: Money = lines.iter().map(|l| l.subtotal).sum();
        let mrp_total: Money = lines
            .iter()
            .map(|l| l.unit_mrp.multiply_quantity(l.quantity))
            .sum();

        if lines.is_empty() {
            return Bill {
                lines,
                unpriced,
                ..Bill::empty()
            };
        }

        let waived = schedule.is_waived(items_total);
        let delivery = if waived { Money::zero() } else { schedule.delivery };
        let small_cart = if waived { Money::zero() } else { schedule.small_cart };

        let grand_total = items_total + delivery + schedule.handling + small_cart + schedule.donation;

        Bill {
            lines,
            unpriced,
            items_total,
            mrp_total,
            savings: mrp_total.saturating_sub(items_total),
            delivery,
            handling: schedule.handling,
            small_cart,
            donation: schedule.donation,
            grand_total,
            amount_to_waiver: schedule.waiver_threshold.saturating_sub(items_total),
        }
    }

    /// The bill of an empty cart: everything zero.
    pub fn empty() -> Bill {
        Bill {
            lines: Vec::new(),
            unpriced: Vec::new(),
            items_total: Money::zero(),
            mrp_total: Money::zero(),
            savings: Money::zero(),
            delivery: Money::zero(),
            handling: Money::zero(),
            small_cart: Money::zero(),
            donation: Money::zero(),
            grand_total: Money::zero(),
            amount_to_waiver: Money::zero(),
        }
    }

    /// Whether delivery and small-cart were waived.
    pub fn charges_waived(&self) -> bool {
        !self.lines.is_empty() && self.delivery.is_zero() && self.small_cart.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    fn cart_of(ids: &[&str]) -> Cart {
        let mut cart = Cart::new();
        for id in ids {
            cart.add(id);
        }
        cart
    }

    #[test]
    fn test_threshold_waives_delivery_and_small_cart() {
        let catalog = InMemoryCatalog::sample();
        let cart = cart_of(&["1", "1", "5"]);

        let bill = Bill::compute(&cart, &catalog, &ChargeSchedule::default());

        assert_eq!(bill.items_total, Money::from_rupees(260));
        assert!(bill.delivery.is_zero());
        assert!(bill.small_cart.is_zero());
        assert_eq!(bill.handling, Money::from_rupees(11));
        assert_eq!(bill.donation, Money::from_rupees(1));
        assert_eq!(bill.grand_total, Money::from_rupees(272));
        assert!(bill.amount_to_waiver.is_zero());
        assert!(bill.charges_waived());
    }

    #[test]
    fn test_below_threshold_charges_apply() {
        let catalog = InMemoryCatalog::sample();
        let cart = cart_of(&["7", "7"]); // ₹50

        let bill = Bill::compute(&cart, &catalog, &ChargeSchedule::default());

        assert_eq!(bill.delivery, Money::from_rupees(20));
        assert_eq!(bill.small_cart, Money::from_rupees(20));
        assert_eq!(bill.grand_total, Money::from_rupees(50 + 20 + 11 + 20 + 1));
        assert_eq!(bill.amount_to_waiver, Money::from_rupees(49));
        assert!(!bill.charges_waived());
    }

    #[test]
    fn test_exactly_at_threshold_is_waived() {
        let catalog = InMemoryCatalog::sample();
        let schedule = ChargeSchedule {
            waiver_threshold: Money::from_rupees(100),
            ..ChargeSchedule::default()
        };
        let cart = cart_of(&["1"]); // ₹100

        let bill = Bill::compute(&cart, &catalog, &schedule);
        assert!(bill.delivery.is_zero());
        assert!(bill.small_cart.is_zero());
    }

    #[test]
    fn test_mrp_and_savings() {
        let catalog = InMemoryCatalog::sample();
        let cart = cart_of(&["1", "1", "5"]);

        let bill = Bill::compute(&cart, &catalog, &ChargeSchedule::default());

        // Wheat MRP 110 ×2, Sugar has no discount
        assert_eq!(bill.mrp_total, Money::from_rupees(280));
        assert_eq!(bill.savings, Money::from_rupees(20));
    }

    #[test]
    fn test_empty_cart_bills_nothing() {
        let catalog = InMemoryCatalog::sample();
        let bill = Bill::compute(&Cart::new(), &catalog, &ChargeSchedule::default());

        assert_eq!(bill, Bill::empty());
        assert!(bill.grand_total.is_zero());
    }

    #[test]
    fn test_unknown_products_are_unpriced() {
        let catalog = InMemoryCatalog::sample();
        let cart = cart_of(&["999", "1"]);

        let bill = Bill::compute(&cart, &catalog, &ChargeSchedule::default());

        assert_eq!(bill.unpriced, vec!["999".to_string()]);
        assert_eq!(bill.lines.len(), 1);
        assert_eq!(bill.items_total, Money::from_rupees(100));
    }

    #[test]
    fn test_schedule_rejects_negative_charges() {
        let schedule = ChargeSchedule {
            handling: Money::from_rupees(-1),
            ..ChargeSchedule::default()
        };
        assert!(schedule.validate().is_err());
        assert!(ChargeSchedule::default().validate().is_ok());
    }
}
