//! # Product Commands
//!
//! Listing, lookup, search, recommendations and favorites.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  User types "  Rice "                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_search_query() ──► trimmed, ≤ 100 chars                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Empty after trim? ──YES──► []                                          │
//! │       │ NO                                                              │
//! │       ▼                                                                 │
//! │  Case-insensitive substring match on name, catalog order                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product> with the session's favorite flags                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use grocer_core::validation::validate_search_query;
use grocer_core::{Catalog, Product};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// How many recommendations the home screen shows by default.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 6;

/// Result of a heart tap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub product_id: String,
    pub is_favorite: bool,
}

/// Lists the whole catalog in catalog order.
pub fn list_products(catalog: &CatalogState) -> Vec<Product> {
    debug!("list_products command");
    catalog
        .catalog()
        .all()
        .iter()
        .map(|p| catalog.present(p))
        .collect()
}

/// Gets a single product by id.
///
/// ## Returns
/// The product if found, or `NOT_FOUND`
pub fn get_product(catalog: &CatalogState, id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %id, "get_product command");
    let product = catalog.catalog().require(id)?;
    Ok(catalog.present(product))
}

/// Searches products by name.
///
/// ## Arguments
/// * `query` - Free text; surrounding whitespace is ignored
///
/// ## Returns
/// Matching products in catalog order (empty for a blank query), or
/// `VALIDATION_ERROR` for an over-long query
pub fn search_products(catalog: &CatalogState, query: &str) -> Result<Vec<Product>, ApiError> {
    let query = validate_search_query(query)?;
    let results: Vec<Product> = catalog
        .catalog()
        .search(&query)
        .into_iter()
        .map(|p| catalog.present(p))
        .collect();

    info!(query = %query, results = results.len(), "Product search completed");
    Ok(results)
}

/// Highest-rated products that are not already in the cart.
///
/// ## Arguments
/// * `limit` - Maximum results (default: [`DEFAULT_RECOMMENDATION_LIMIT`])
pub fn recommended_products(
    catalog: &CatalogState,
    cart: &CartState,
    limit: Option<usize>,
) -> Vec<Product> {
    let limit = limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    debug!(limit, "recommended_products command");

    let in_cart: Vec<String> = cart.with_cart(|c| {
        c.lines().iter().map(|l| l.product_id.clone()).collect()
    });
    let exclude: Vec<&str> = in_cart.iter().map(String::as_str).collect();

    catalog
        .catalog()
        .recommendations(&exclude, limit)
        .into_iter()
        .map(|p| catalog.present(p))
        .collect()
}

/// Toggles a product in or out of the session favorites.
///
/// ## Returns
/// The new favorite state, or `NOT_FOUND` for an unknown product
pub fn toggle_favorite(catalog: &CatalogState, product_id: &str) -> Result<FavoriteResponse, ApiError> {
    catalog.catalog().require(product_id)?;
    let is_favorite = catalog.with_favorites_mut(|f| f.toggle(product_id));

    debug!(product_id = %product_id, is_favorite, "toggle_favorite command");
    Ok(FavoriteResponse {
        product_id: product_id.to_string(),
        is_favorite,
    })
}
