//! # Checkout Error Types
//!
//! Error types for configuration and order submission.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Protocol            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  HttpStatus             │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  SerializationFailed    │ │
//! │  │  ConfigLoad/Save│  │                 │  │  DeserializationFailed  │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │     Domain      │  Core(CoreError): empty cart, missing city, ...   │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected order (`success: false`) is NOT an error. It comes back as
//! [`crate::OrderOutcome::Rejected`].

use grocer_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Everything that can go wrong between "Place order" and a response.
#[derive(Debug, Error)]
pub enum CheckoutError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid storefront configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid order endpoint.
    #[error("Invalid order endpoint: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never got a response (DNS, refused connection, TLS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint did not answer within the configured timeout.
    #[error("Order request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Protocol Errors
    // =========================================================================
    /// The endpoint answered with a non-2xx status.
    #[error("Order endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Failed to encode the order request.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The response body was not a valid order response.
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    // =========================================================================
    // Other
    // =========================================================================
    /// File I/O outside config load/save.
    #[error("I/O error: {0}")]
    Io(String),

    /// Domain error from grocer-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::Core(CoreError::Validation(err))
    }
}

impl From<url::ParseError> for CheckoutError {
    fn from(err: url::ParseError) -> Self {
        CheckoutError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for CheckoutError {
    fn from(err: std::io::Error) -> Self {
        CheckoutError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for CheckoutError {
    fn from(err: toml::de::Error) -> Self {
        CheckoutError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CheckoutError {
    fn from(err: toml::ser::Error) -> Self {
        CheckoutError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CheckoutError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::InvalidConfig(_)
                | CheckoutError::InvalidUrl(_)
                | CheckoutError::ConfigLoadFailed(_)
                | CheckoutError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if the request did not get a usable HTTP exchange.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, CheckoutError::Network(_) | CheckoutError::Timeout(_))
    }

    /// Returns true if the endpoint answered but not in the expected shape.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::HttpStatus { .. }
                | CheckoutError::SerializationFailed(_)
                | CheckoutError::DeserializationFailed(_)
        )
    }
}
