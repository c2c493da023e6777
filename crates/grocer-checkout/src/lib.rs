//! # grocer-checkout: Order Submission for the Grocer Storefront
//!
//! This crate turns a priced cart into an order on the wire, and owns the
//! storefront configuration that decides where orders go and what they cost.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Architecture                             │
//! │                                                                         │
//! │   grocer-core                          grocer-checkout                  │
//! │   ───────────                          ───────────────                  │
//! │   Cart ─────────┐                                                       │
//! │   Catalog ──────┼──► OrderRequest::build ──► OrderClient::submit        │
//! │   CheckoutDraft ┤         (protocol)            (client)                │
//! │   Bill ─────────┘                                  │                    │
//! │                                                    ▼                    │
//! │                                        POST [order].endpoint            │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                                      OrderOutcome::Placed / Rejected    │
//! │                                                                         │
//! │   StorefrontConfig (config)                                             │
//! │   ├── [store]    name, currency                                         │
//! │   ├── [charges]  ChargeSchedule for Bill::compute                       │
//! │   └── [order]    endpoint, timeout, default payment label               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Storefront configuration (TOML + environment)
//! - [`protocol`] - Order request/response JSON shapes
//! - [`client`] - The HTTP order client
//! - [`error`] - Checkout error types

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::OrderClient;
pub use config::{ChargeSettings, OrderSettings, StoreSettings, StorefrontConfig};
pub use error::{CheckoutError, CheckoutResult};
pub use protocol::{DeliveryInfo, OrderItem, OrderOutcome, OrderRequest, OrderResponse};
