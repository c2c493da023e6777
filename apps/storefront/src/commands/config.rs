//! # Config Commands
//!
//! Retrieval of the storefront configuration.

use tracing::debug;

use crate::state::{ConfigState, ConfigView};

/// Gets the current storefront configuration.
///
/// ## When Used
/// - App startup (store name, currency formatting)
/// - Checkout screen (charges, default payment label)
///
/// ## Returns
/// Read-only view of the configuration plus the session id
pub fn get_config(config: &ConfigState) -> ConfigView {
    debug!("get_config command");
    config.view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_checkout::StorefrontConfig;
    use grocer_core::Money;

    #[test]
    fn test_get_config_defaults() {
        let config = ConfigState::new(StorefrontConfig::default()).unwrap();
        let view = get_config(&config);

        assert_eq!(view.currency_code, "INR");
        assert_eq!(view.request_timeout_secs, 30);
        assert_eq!(view.session_id, config.session_id());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["currencySymbol"], "₹");
        assert_eq!(json["defaultPaymentMethod"], "Google Pay UPI");
        assert_eq!(json["charges"]["waiverThreshold"], 9900);
        assert_eq!(json["currencyDecimals"], 2);
    }

    #[test]
    fn test_money_renders_in_rupees() {
        let config = ConfigState::new(StorefrontConfig::default()).unwrap();
        assert_eq!(config.money(Money::from_rupees(272)), "₹272");
        assert_eq!(config.money(Money::from_paise(27250)), "₹272.50");
    }

    #[test]
    fn test_oversized_charge_fails_state_setup() {
        let mut config = StorefrontConfig::default();
        config.charges.delivery = 100_000_000_000_000_000;
        assert!(ConfigState::new(config).is_err());
    }
}
