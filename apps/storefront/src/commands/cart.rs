//! # Cart Commands
//!
//! Cart manipulation. Every write goes through [`CartState::dispatch`].
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Screen  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                  │             │
//! │       │           add_to_cart                     place_order           │
//! │       │           increment_quantity              (checkout.rs)         │
//! │       │           decrement_quantity                      │             │
//! │       │           remove_from_cart                        │             │
//! │       │                │                                  │             │
//! │       └──────── clear_cart ◄──────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `add_to_cart` checks the catalog before dispatching. The other
//! operations act on lines already in the cart and are silent no-ops when
//! the line is absent.

use grocer_core::{Cart, CartAction, Catalog, Money};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// One cart line with catalog details filled in.
///
/// The detail fields are `None` if the catalog no longer knows the product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub product_id: String,
    pub quantity: u32,
    pub name: Option<String>,
    pub unit_price: Option<Money>,
    pub subtotal: Option<Money>,
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineDto>,
    pub indicator_visible: bool,
    pub total_item_count: u64,
    pub items_total: Money,
}

impl CartResponse {
    pub fn from_cart(cart: &Cart, catalog: &impl Catalog) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                let product = catalog.get(&line.product_id);
                CartLineDto {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                    name: product.map(|p| p.name.clone()),
                    unit_price: product.map(|p| p.price),
                    subtotal: line.subtotal(catalog),
                }
            })
            .collect();

        CartResponse {
            lines,
            indicator_visible: cart.is_indicator_visible(),
            total_item_count: cart.total_item_count(),
            items_total: cart.items_total(catalog),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn respond(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    cart.with_cart(|c| CartResponse::from_cart(c, catalog.catalog()))
}

/// Gets the current cart contents.
pub fn get_cart(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    respond(catalog, cart)
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - If the product is already in the cart: quantity increases
/// - If not: appended as a new line with quantity 1
/// - The "view cart" indicator becomes visible either way
///
/// ## Returns
/// Updated cart, or `NOT_FOUND` if the catalog does not know the product
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    catalog.catalog().require(product_id)?;
    cart.dispatch(CartAction::Add(product_id.to_string()));

    Ok(respond(catalog, cart))
}

/// Adds one unit to a line already in the cart.
pub fn increment_quantity(catalog: &CatalogState, cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "increment_quantity command");
    cart.dispatch(CartAction::Increment(product_id.to_string()));
    respond(catalog, cart)
}

/// Removes one unit; the line disappears when it reaches zero.
pub fn decrement_quantity(catalog: &CatalogState, cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "decrement_quantity command");
    cart.dispatch(CartAction::Decrement(product_id.to_string()));
    respond(catalog, cart)
}

/// Removes a line regardless of its quantity.
pub fn remove_from_cart(catalog: &CatalogState, cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    cart.dispatch(CartAction::Remove(product_id.to_string()));
    respond(catalog, cart)
}

/// Empties the cart and hides the indicator.
pub fn clear_cart(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.dispatch(CartAction::Clear);
    respond(catalog, cart)
}

/// Dismisses the floating "view cart" affordance. The lines stay.
pub fn hide_view_cart(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    debug!("hide_view_cart command");
    cart.dispatch(CartAction::HideIndicator);
    respond(catalog, cart)
}
