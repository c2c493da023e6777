//! # Configuration State
//!
//! Stores the storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GROCER_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use grocer_checkout::{CheckoutResult, StorefrontConfig};
use grocer_core::{ChargeSchedule, Money};
use serde::Serialize;
use uuid::Uuid;

/// Read-only configuration plus session identity.
#[derive(Debug, Clone)]
pub struct ConfigState {
    config: Arc<StorefrontConfig>,
    charges: ChargeSchedule,
    session_id: Uuid,
    started_at: DateTime<Utc>,
}

impl ConfigState {
    /// Fails with `InvalidConfig` if a charge does not fit in paise.
    pub fn new(config: StorefrontConfig) -> CheckoutResult<Self> {
        let charges = config.charge_schedule()?;
        Ok(ConfigState {
            config: Arc::new(config),
            charges,
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
        })
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Charge schedule for bill pricing.
    pub fn charge_schedule(&self) -> ChargeSchedule {
        self.charges
    }

    /// Formats money with the configured currency symbol.
    pub fn money(&self, amount: Money) -> String {
        self.config.format_currency(amount)
    }

    /// What `get_config` returns to the front end.
    pub fn view(&self) -> ConfigView {
        ConfigView {
            session_id: self.session_id,
            started_at: self.started_at,
            store_name: self.config.store.name.clone(),
            currency_code: self.config.store.currency_code.clone(),
            currency_symbol: self.config.store.currency_symbol.clone(),
            currency_decimals: self.config.store.currency_decimals,
            charges: self.charges,
            order_endpoint: self.config.order.endpoint.clone(),
            request_timeout_secs: self.config.order.request_timeout_secs,
            default_payment_method: self.config.order.default_payment_method.clone(),
        }
    }
}

/// Configuration as exposed to the front end.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub store_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
    pub currency_decimals: u32,
    pub charges: ChargeSchedule,
    pub order_endpoint: String,
    pub request_timeout_secs: u64,
    pub default_payment_method: String,
}
