//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Front end / shell            Rust command layer                        │
//! │  ─────────────────            ──────────────────                        │
//! │                                                                         │
//! │  add_to_cart("42")                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Domain error? ──── CoreError::ProductNotFound("42") ──┐        │  │
//! │  │         │                                              │        │  │
//! │  │         ▼                                              ▼        │  │
//! │  │  Order error? ───── CheckoutError::Timeout(30) ────► ApiError ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Product not found: 42" }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use grocer_checkout::CheckoutError;
use grocer_core::CoreError;
use serde::Serialize;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart cannot be used for the requested operation (e.g. empty)
    CartError,

    /// The order endpoint answered in a way we cannot use
    OrderError,

    /// The order endpoint could not be reached in time
    NetworkError,

    /// Bad or unreadable configuration
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::EmptyCart => ApiError::cart("Cart is empty"),
            CoreError::DuplicateProduct(id) => {
                tracing::error!(product_id = %id, "Catalog has a duplicate product id");
                ApiError::internal("Catalog is inconsistent")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<grocer_core::ValidationError> for ApiError {
    fn from(err: grocer_core::ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts checkout errors to API errors.
impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Core(e) => e.into(),
            CheckoutError::Network(_) | CheckoutError::Timeout(_) => {
                ApiError::new(ErrorCode::NetworkError, err.to_string())
            }
            CheckoutError::HttpStatus { .. }
            | CheckoutError::SerializationFailed(_)
            | CheckoutError::DeserializationFailed(_) => {
                tracing::error!("Order endpoint error: {}", err);
                ApiError::new(ErrorCode::OrderError, err.to_string())
            }
            CheckoutError::InvalidConfig(_)
            | CheckoutError::InvalidUrl(_)
            | CheckoutError::ConfigLoadFailed(_)
            | CheckoutError::ConfigSaveFailed(_) => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
            CheckoutError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                ApiError::internal("I/O error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Product", "42");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 42");
    }

    #[test]
    fn test_from_core_error() {
        assert_eq!(ApiError::from(CoreError::EmptyCart).code, ErrorCode::CartError);
        assert_eq!(
            ApiError::from(CoreError::ProductNotFound("9".into())).code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_from_checkout_error() {
        assert_eq!(
            ApiError::from(CheckoutError::Timeout(30)).code,
            ErrorCode::NetworkError
        );
        assert_eq!(
            ApiError::from(CheckoutError::HttpStatus {
                status: 500,
                body: String::new()
            })
            .code,
            ErrorCode::OrderError
        );
        assert_eq!(
            ApiError::from(CheckoutError::InvalidUrl("x".into())).code,
            ErrorCode::ConfigError
        );
        assert_eq!(
            ApiError::from(CheckoutError::Core(CoreError::EmptyCart)).code,
            ErrorCode::CartError
        );

        let json = serde_json::to_value(ApiError::from(CheckoutError::Network("refused".into()))).unwrap();
        assert_eq!(json["code"], "NETWORK_ERROR");
    }
}
