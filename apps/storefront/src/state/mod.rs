//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ## Why Multiple State Types?
//! Instead of a single ambient store, each concern gets its own container
//! and every command declares exactly the containers it needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (built once in run())                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │          │                  │                  │               │        │
//! │          ▼                  ▼                  ▼               ▼        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐ ┌─────────────┐  │
//! │  │ CatalogState │  │  CartState   │  │CheckoutState │ │ ConfigState │  │
//! │  │              │  │              │  │              │ │             │  │
//! │  │ Arc<Catalog> │  │  Arc<Mutex<  │  │  Arc<Mutex<  │ │ Arc<Config> │  │
//! │  │ Mutex<Favs>  │  │    Cart>>    │  │    Draft>>   │ │ session id  │  │
//! │  │              │  │  + watch tx  │  │ OrderClient  │ │             │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘ └─────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Catalog and config: read-only after initialization                  │
//! │  • Cart, favorites, draft: Mutex, held for one synchronous operation   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod checkout;
mod config;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use checkout::CheckoutState;
pub use config::{ConfigState, ConfigView};

use grocer_checkout::{OrderClient, StorefrontConfig};
use grocer_core::InMemoryCatalog;

use crate::error::ApiError;

/// Every state container of one storefront session.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub config: ConfigState,
    pub catalog: CatalogState,
    pub cart: CartState,
    pub checkout: CheckoutState,
}

impl Storefront {
    /// Builds a session over `catalog` with the given configuration.
    ///
    /// ## Errors
    /// `CONFIG_ERROR` if the order endpoint or timeout is unusable.
    pub fn new(config: StorefrontConfig, catalog: InMemoryCatalog) -> Result<Self, ApiError> {
        config.validate()?;
        let client = OrderClient::new(&config.order)?;
        let checkout = CheckoutState::new(client, &config.order.default_payment_method);

        Ok(Storefront {
            config: ConfigState::new(config)?,
            catalog: CatalogState::new(catalog),
            cart: CartState::new(),
            checkout,
        })
    }
}
