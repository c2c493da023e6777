//! # Storefront Commands
//!
//! Every operation the front end (or the shell) can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Listing, search, recommendations, favorites
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Bill, delivery details, order placement
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Shell line "add 7"                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      &storefront.catalog,   ◄── only the state it needs                 │
//! │      &storefront.cart,                                                  │
//! │      "7",                                                               │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (serde, camelCase)                                            │
//! │         ▼                                                               │
//! │  Printed by the shell, or serialized for a front end                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state containers it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn clear_cart(catalog: &CatalogState, cart: &CartState) -> CartResponse
//!
//! // Needs everything, and awaits the order endpoint
//! async fn place_order(config: &ConfigState, catalog: &CatalogState,
//!                      cart: &CartState, checkout: &CheckoutState)
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod product;
