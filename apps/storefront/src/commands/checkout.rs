//! # Checkout Commands
//!
//! Bill pricing, delivery details and order placement.
//!
//! ## Order Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order()                                        │
//! │                                                                         │
//! │  1. Lock cart, lock draft                                               │
//! │     • Bill::compute(cart, catalog, charges)                             │
//! │     • OrderRequest::build(...) ──► EmptyCart / city required?           │
//! │  2. Release both locks                                                  │
//! │                                                                         │
//! │  3. OrderClient::submit(&request).await                                 │
//! │     (one POST, bounded by the request timeout, never retried)           │
//! │                                                                         │
//! │  4. Placed   ──► clear cart, reset draft (payment method kept)          │
//! │     Rejected ──► cart and draft untouched, message shown                │
//! │     Error    ──► cart and draft untouched, ApiError returned            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No lock is held across the await; the shell and any observer stay
//! responsive while the endpoint answers.

use grocer_checkout::{OrderOutcome, OrderRequest};
use grocer_core::{Bill, CartAction, CheckoutDraft, DeliveryInstruction, Money};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, CheckoutState, ConfigState};

/// Result of a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub outcome: OrderOutcome,
    /// Amount that was sent as the order total.
    pub total: Money,
    pub item_count: u64,
}

/// Prices the current cart with the configured charges.
pub fn get_bill(config: &ConfigState, catalog: &CatalogState, cart: &CartState) -> Bill {
    debug!("get_bill command");
    let schedule = config.charge_schedule();
    cart.with_cart(|c| Bill::compute(c, catalog.catalog(), &schedule))
}

/// Current checkout draft.
pub fn get_checkout(checkout: &CheckoutState) -> CheckoutDraft {
    checkout.with_draft(CheckoutDraft::clone)
}

/// Toggles a delivery note on or off.
///
/// ## Arguments
/// * `tag` - `record`, `avoid-bell`, `no-bell` or `other`
///
/// ## Returns
/// Updated draft, or `VALIDATION_ERROR` for an unknown tag
pub fn toggle_instruction(checkout: &CheckoutState, tag: &str) -> Result<CheckoutDraft, ApiError> {
    let instruction: DeliveryInstruction = tag.parse()?;
    let draft = checkout.with_draft_mut(|d| {
        let enabled = d.toggle_instruction(instruction);
        debug!(instruction = %instruction.tag(), enabled, "toggle_instruction command");
        d.clone()
    });
    Ok(draft)
}

/// Sets the delivery city.
pub fn set_city(checkout: &CheckoutState, city: &str) -> Result<CheckoutDraft, ApiError> {
    debug!(city = %city, "set_city command");
    let draft = checkout.with_draft_mut(|d| d.set_city(city).map(|_| d.clone()))?;
    Ok(draft)
}

/// Sets the payment method label shown on the checkout screen.
pub fn set_payment_method(checkout: &CheckoutState, label: &str) -> Result<CheckoutDraft, ApiError> {
    debug!(payment_method = %label, "set_payment_method command");
    let draft = checkout.with_draft_mut(|d| d.set_payment_method(label).map(|_| d.clone()))?;
    Ok(draft)
}

/// Submits the cart as an order.
///
/// ## Returns
/// - `Placed` or `Rejected` as answered by the endpoint
/// - `CART_ERROR` for an empty cart, `VALIDATION_ERROR` without a city
/// - `NETWORK_ERROR` / `ORDER_ERROR` if the endpoint could not be used
pub async fn place_order(
    config: &ConfigState,
    catalog: &CatalogState,
    cart: &CartState,
    checkout: &CheckoutState,
) -> Result<PlaceOrderResponse, ApiError> {
    let schedule = config.charge_schedule();

    let request = cart.with_cart(|c| {
        let bill = Bill::compute(c, catalog.catalog(), &schedule);
        checkout.with_draft(|d| OrderRequest::build(c, catalog.catalog(), d, &bill))
    })?;

    let total = request.total;
    let item_count = request.unit_count();
    info!(
        session_id = %config.session_id(),
        items = item_count,
        total = %total,
        city = %request.delivery_info.city,
        "Placing order"
    );

    let outcome = checkout.client().submit(&request).await?;

    match &outcome {
        OrderOutcome::Placed { .. } => {
            cart.dispatch(CartAction::Clear);
            checkout.with_draft_mut(CheckoutDraft::reset);
            info!(total = %total, "Cart cleared after order");
        }
        OrderOutcome::Rejected { message } => {
            warn!(message = %message, "Order rejected");
        }
    }

    Ok(PlaceOrderResponse {
        outcome,
        total,
        item_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use grocer_checkout::StorefrontConfig;
    use grocer_core::InMemoryCatalog;

    use crate::state::Storefront;

    fn storefront() -> Storefront {
        Storefront::new(StorefrontConfig::default(), InMemoryCatalog::sample()).unwrap()
    }

    #[test]
    fn test_bill_for_sample_cart() {
        let s = storefront();
        s.cart.dispatch(CartAction::Add("1".into()));
        s.cart.dispatch(CartAction::Add("1".into()));
        s.cart.dispatch(CartAction::Add("5".into()));

        let bill = get_bill(&s.config, &s.catalog, &s.cart);
        assert_eq!(bill.items_total, Money::from_rupees(260));
        assert_eq!(bill.delivery, Money::zero());
        assert_eq!(bill.small_cart, Money::zero());
        assert_eq!(bill.grand_total, Money::from_rupees(272));
    }

    #[test]
    fn test_bill_below_threshold_charges_everything() {
        let s = storefront();
        s.cart.dispatch(CartAction::Add("7".into()));

        let bill = get_bill(&s.config, &s.catalog, &s.cart);
        // 25 + 20 + 11 + 20 + 1
        assert_eq!(bill.grand_total, Money::from_rupees(77));
        assert_eq!(bill.amount_to_waiver, Money::from_rupees(74));
    }

    #[test]
    fn test_toggle_instruction() {
        let s = storefront();

        let draft = toggle_instruction(&s.checkout, "no-bell").unwrap();
        assert!(draft.has_instruction(DeliveryInstruction::NoBell));

        let draft = toggle_instruction(&s.checkout, "no-bell").unwrap();
        assert!(draft.instructions().is_empty());

        let err = toggle_instruction(&s.checkout, "knock-twice").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_set_city_validates() {
        let s = storefront();

        assert_eq!(set_city(&s.checkout, "  Pune ").unwrap().city, "Pune");
        assert_eq!(
            set_city(&s.checkout, "   ").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(get_checkout(&s.checkout).city, "Pune");
    }

    #[test]
    fn test_set_payment_method() {
        let s = storefront();
        assert_eq!(get_checkout(&s.checkout).payment_method, "Google Pay UPI");

        let draft = set_payment_method(&s.checkout, "Cash on Delivery").unwrap();
        assert_eq!(draft.payment_method, "Cash on Delivery");
    }

    #[tokio::test]
    async fn test_place_order_with_empty_cart() {
        let s = storefront();
        set_city(&s.checkout, "Pune").unwrap();

        let err = place_order(&s.config, &s.catalog, &s.cart, &s.checkout)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[tokio::test]
    async fn test_place_order_without_city() {
        let s = storefront();
        s.cart.dispatch(CartAction::Add("1".into()));

        let err = place_order(&s.config, &s.catalog, &s.cart, &s.checkout)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(s.cart.snapshot().total_item_count, 1);
    }
}
