//! # Storefront Configuration
//!
//! Configuration management for the storefront: store identity, the charge
//! schedule and the order endpoint.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GROCER_ORDER_ENDPOINT=https://orders.example.com/v1/orders         │
//! │     GROCER_ORDER_TIMEOUT_SECS=10                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $GROCER_CONFIG, or                                                 │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.grocer.storefront/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ₹20 delivery, ₹11 handling, ₹20 small cart, ₹1 donation, ₹99 waiver│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [store]
//! name = "Grocer"
//! currency_code = "INR"
//! currency_symbol = "₹"
//! currency_decimals = 2
//!
//! [charges]          # whole rupees
//! delivery = 20
//! handling = 11
//! small_cart = 20
//! donation = 1
//! waiver_threshold = 99
//!
//! [order]
//! endpoint = "https://jsonplaceholder.typicode.com/posts"
//! request_timeout_secs = 30
//! default_payment_method = "Google Pay UPI"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use grocer_core::money::MINOR_DIGITS;
use grocer_core::validation::validate_payment_method;
use grocer_core::{ChargeSchedule, Money, DEFAULT_PAYMENT_METHOD};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CheckoutError, CheckoutResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "GROCER_CONFIG";

// =============================================================================
// Store Settings
// =============================================================================

/// Store identity and currency presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Name shown in the shell banner.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// ISO 4217 code.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Minor-unit digits. Amounts are kept in paise, so only 2 validates.
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u32,
}

fn default_store_name() -> String {
    "Grocer".to_string()
}

fn default_currency_code() -> String {
    "INR".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_currency_decimals() -> u32 {
    MINOR_DIGITS
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// Charge Settings
// =============================================================================

/// Bill charges in whole currency units, as written in the TOML file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeSettings {
    #[serde(default = "default_delivery")]
    pub delivery: i64,

    #[serde(default = "default_handling")]
    pub handling: i64,

    #[serde(default = "default_small_cart")]
    pub small_cart: i64,

    #[serde(default = "default_donation")]
    pub donation: i64,

    /// Items total at which delivery and small-cart are waived.
    #[serde(default = "default_waiver_threshold")]
    pub waiver_threshold: i64,
}

fn default_delivery() -> i64 {
    20
}
fn default_handling() -> i64 {
    11
}
fn default_small_cart() -> i64 {
    20
}
fn default_donation() -> i64 {
    1
}
fn default_waiver_threshold() -> i64 {
    99
}

impl Default for ChargeSettings {
    fn default() -> Self {
        ChargeSettings {
            delivery: default_delivery(),
            handling: default_handling(),
            small_cart: default_small_cart(),
            donation: default_donation(),
            waiver_threshold: default_waiver_threshold(),
        }
    }
}

impl ChargeSettings {
    /// The schedule used by bill pricing.
    ///
    /// ## Errors
    /// `InvalidConfig` naming the first charge too large to hold in paise.
    pub fn schedule(&self) -> CheckoutResult<ChargeSchedule> {
        Ok(ChargeSchedule {
            delivery: charge("delivery", self.delivery)?,
            handling: charge("handling", self.handling)?,
            small_cart: charge("small_cart", self.small_cart)?,
            donation: charge("donation", self.donation)?,
            waiver_threshold: charge("waiver_threshold", self.waiver_threshold)?,
        })
    }
}

fn charge(field: &str, rupees: i64) -> CheckoutResult<Money> {
    Money::checked_from_rupees(rupees).ok_or_else(|| {
        CheckoutError::InvalidConfig(format!("charges.{} = {} is out of range", field, rupees))
    })
}

// =============================================================================
// Order Settings
// =============================================================================

/// Where and how orders are submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSettings {
    /// POST target for order requests.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Upper bound on one order request (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Payment label preselected on checkout.
    #[serde(default = "default_payment_method")]
    pub default_payment_method: String,
}

fn default_endpoint() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_payment_method() -> String {
    DEFAULT_PAYMENT_METHOD.to_string()
}

impl Default for OrderSettings {
    fn default() -> Self {
        OrderSettings {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout(),
            default_payment_method: default_payment_method(),
        }
    }
}

impl OrderSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parses and checks the endpoint: absolute, http or https.
    pub fn endpoint_url(&self) -> CheckoutResult<Url> {
        let url = Url::parse(&self.endpoint)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CheckoutError::InvalidUrl(format!(
                "Order endpoint must use http:// or https://, got: {}://",
                other
            ))),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub charges: ChargeSettings,

    #[serde(default)]
    pub order: OrderSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `$GROCER_CONFIG`, else the
    ///    platform config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CheckoutResult<Self> {
        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads one TOML file, without env overrides or validation.
    pub fn from_file(path: &Path) -> CheckoutResult<Self> {
        info!(?path, "Loading storefront config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CheckoutError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CheckoutResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CheckoutError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CheckoutError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| CheckoutError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CheckoutResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(CheckoutError::InvalidConfig("store.name must not be empty".into()));
        }

        if self.store.currency_symbol.is_empty() {
            return Err(CheckoutError::InvalidConfig(
                "store.currency_symbol must not be empty".into(),
            ));
        }

        if self.store.currency_decimals != MINOR_DIGITS {
            return Err(CheckoutError::InvalidConfig(format!(
                "store.currency_decimals must be {} (amounts are kept in paise), got {}",
                MINOR_DIGITS, self.store.currency_decimals
            )));
        }

        self.charges
            .schedule()?
            .validate()
            .map_err(|e| CheckoutError::InvalidConfig(format!("charges: {}", e)))?;

        self.order.endpoint_url()?;

        if self.order.request_timeout_secs == 0 {
            return Err(CheckoutError::InvalidConfig(
                "order.request_timeout_secs must be greater than 0".into(),
            ));
        }

        validate_payment_method(&self.order.default_payment_method)
            .map_err(|e| CheckoutError::InvalidConfig(format!("order: {}", e)))?;

        Ok(())
    }

    /// Applies `GROCER_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are logged
    /// and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("GROCER_ORDER_ENDPOINT") {
            debug!(endpoint = %endpoint, "Overriding order endpoint from environment");
            self.order.endpoint = endpoint;
        }

        if let Some(timeout) = lookup("GROCER_ORDER_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.order.request_timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid GROCER_ORDER_TIMEOUT_SECS"),
            }
        }

        if let Some(name) = lookup("GROCER_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(method) = lookup("GROCER_PAYMENT_METHOD") {
            debug!(payment_method = %method, "Overriding payment method from environment");
            self.order.default_payment_method = method;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "grocer", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The charge schedule for bill pricing.
    pub fn charge_schedule(&self) -> CheckoutResult<ChargeSchedule> {
        self.charges.schedule()
    }

    /// Renders an amount with the configured symbol, using the paise scale
    /// of [`Money`].
    ///
    /// Whole amounts drop the fraction: `₹260`, `₹12.50`.
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let major = amount.rupees().unsigned_abs();
        let fraction = amount.paise_part();

        if fraction == 0 {
            format!("{}{}{}", sign, self.store.currency_symbol, major)
        } else {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.store.currency_symbol,
                major,
                fraction,
                width = MINOR_DIGITS as usize
            )
        }
    }
}
