//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  └── Disables "Place order" while the cart is empty                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog construction                                         │
//! │  └── Ids non-empty and unique, prices not negative                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocer_core::validation::{validate_city, validate_search_query};
//!
//! assert_eq!(validate_city("  Pune ").unwrap(), "Pune");
//! assert_eq!(validate_search_query(" rice ").unwrap(), "rice");
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CITY_LEN, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a catalog product id.
const MAX_PRODUCT_ID_LEN: usize = 50;

/// Maximum length of a product name.
const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a payment method label.
const MAX_PAYMENT_METHOD_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog product id.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - No whitespace (ids are typed into the shell as single tokens)
///
/// ## Example
/// ```rust
/// use grocer_core::validation::validate_product_id;
///
/// assert!(validate_product_id("7").is_ok());
/// assert!(validate_product_id("").is_err());
/// assert!(validate_product_id("7 8").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product_id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "product_id".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (search then returns nothing)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates the delivery city entered at checkout.
///
/// ## Returns
/// The trimmed city.
pub fn validate_city(city: &str) -> ValidationResult<String> {
    let city = city.trim();

    if city.is_empty() {
        return Err(ValidationError::Required {
            field: "city".to_string(),
        });
    }

    if city.chars().count() > MAX_CITY_LEN {
        return Err(ValidationError::TooLong {
            field: "city".to_string(),
            max: MAX_CITY_LEN,
        });
    }

    Ok(city.to_string())
}

/// Validates a payment method label. The label is free text; it only has
/// to be present and reasonably short.
pub fn validate_payment_method(label: &str) -> ValidationResult<String> {
    let label = label.trim();

    if label.is_empty() {
        return Err(ValidationError::Required {
            field: "payment_method".to_string(),
        });
    }

    if label.chars().count() > MAX_PAYMENT_METHOD_LEN {
        return Err(ValidationError::TooLong {
            field: "payment_method".to_string(),
            max: MAX_PAYMENT_METHOD_LEN,
        });
    }

    Ok(label.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price or charge amount.
///
/// Zero is allowed (a waived charge, a free sample); negative is not.
pub fn validate_price(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
