//! # grocer-core: Pure Storefront Logic
//!
//! This crate is the **heart** of the grocery storefront. It contains the
//! cart store, catalog lookup, bill pricing and checkout draft as pure code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Grocer Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile Front End                             │   │
//! │  │   Products ──► Product Detail ──► Cart / Checkout ──► Order     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront Commands                          │   │
//! │  │    search_products, add_to_cart, get_bill, place_order, etc.    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │ catalog │ │  cart   │ │ pricing │ │checkout │ │validation│ │   │
//! │  │   │ Product │ │  Cart   │ │  Bill   │ │  Draft  │ │  rules   │ │   │
//! │  │   │ search  │ │ CartLine│ │ Charges │ │  Notes  │ │          │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              grocer-checkout (order submission)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DeliveryInstruction)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Read-only product catalog, search and recommendations
//! - [`cart`] - The cart store and its action dispatch
//! - [`pricing`] - Bill breakdown with flat charges and waiver threshold
//! - [`checkout`] - Checkout draft (city, delivery notes, payment label)
//! - [`favorites`] - Session favorites set
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use grocer_core::catalog::InMemoryCatalog;
//! use grocer_core::cart::Cart;
//! use grocer_core::pricing::{Bill, ChargeSchedule};
//!
//! let catalog = InMemoryCatalog::sample();
//! let mut cart = Cart::new();
//! cart.add("1"); // Wheat, ₹100
//! cart.add("1");
//! cart.add("5"); // Sugar, ₹60
//!
//! let bill = Bill::compute(&cart, &catalog, &ChargeSchedule::default());
//! assert_eq!(bill.items_total.rupees(), 260);
//! assert_eq!(bill.grand_total.rupees(), 272); // delivery + small cart waived
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod favorites;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAction, CartLine, CartOutcome, CartSnapshot};
pub use catalog::{Catalog, InMemoryCatalog};
pub use checkout::CheckoutDraft;
pub use error::{CoreError, CoreResult, ValidationError};
pub use favorites::Favorites;
pub use money::Money;
pub use pricing::{Bill, BillLine, ChargeSchedule};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Payment method label preselected on the checkout screen.
pub const DEFAULT_PAYMENT_METHOD: &str = "Google Pay UPI";

/// Maximum length of a search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Maximum length of the free-text delivery city.
pub const MAX_CITY_LEN: usize = 100;
