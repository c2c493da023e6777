//! # Catalog Module
//!
//! Read-only product lookup for the storefront.
//!
//! ## Catalog Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog                                        │
//! │                                                                         │
//! │   get("7") ──────────► Some(Salt, ₹25)                                 │
//! │   get("99") ─────────► None  (cart lines may still reference it)       │
//! │                                                                         │
//! │   search("RICE") ────► [Rice]          case-insensitive substring      │
//! │   search("   ") ─────► []              blank query shows nothing       │
//! │                                                                         │
//! │   recommendations(exclude, 4) ──► highest rated first                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`Catalog`] trait is the seam the cart pricing and the command layer
//! depend on. [`InMemoryCatalog`] is the only implementation; products are
//! static for the life of the process.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_price, validate_product_id, validate_product_name};

// =============================================================================
// Catalog Trait
// =============================================================================

/// Read access to the product catalog.
pub trait Catalog {
    /// Looks up a product by id.
    fn get(&self, id: &str) -> Option<&Product>;

    /// All products in catalog order.
    fn all(&self) -> &[Product];

    /// Unit price of a product, if the catalog knows it.
    fn unit_price(&self, id: &str) -> Option<Money> {
        self.get(id).map(|p| p.price)
    }

    /// Case-insensitive substring search on product names.
    ///
    /// A blank query returns nothing. Results keep catalog order.
    fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.all()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Products not in `exclude`, best rated first, at most `limit`.
    ///
    /// Equal ratings keep catalog order.
    fn recommendations(&self, exclude: &[&str], limit: usize) -> Vec<&Product> {
        let mut picks: Vec<&Product> = self
            .all()
            .iter()
            .filter(|p| !exclude.contains(&p.id.as_str()))
            .collect();

        // stable sort: ties stay in catalog order
        picks.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        picks.truncate(limit);
        picks
    }
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// A catalog backed by a `Vec<Product>`.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Builds a catalog, validating every product.
    ///
    /// ## Errors
    /// - `CoreError::DuplicateProduct` if two products share an id
    /// - `CoreError::Validation` for an empty id or name, or a negative price
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            validate_product_id(&product.id)?;
            validate_product_name(&product.name)?;
            validate_price("price", product.price)?;
            if let Some(original) = product.original_price {
                validate_price("original_price", original)?;
            }

            if !seen.insert(product.id.as_str()) {
                return Err(CoreError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(InMemoryCatalog { products })
    }

    /// The 20-product sample catalog the storefront ships with.
    pub fn sample() -> Self {
        InMemoryCatalog {
            products: sample_products(),
        }
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product, turning a miss into `ProductNotFound`.
    pub fn require(&self, id: &str) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn all(&self) -> &[Product] {
        &self.products
    }
}

impl TryFrom<Vec<Product>> for InMemoryCatalog {
    type Error = CoreError;

    fn try_from(products: Vec<Product>) -> CoreResult<Self> {
        InMemoryCatalog::new(products)
    }
}

// =============================================================================
// Sample Data
// =============================================================================

fn image_url(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{photo}?w=400")
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    quantity_label: &str,
    price: i64,
    rating: f32,
    reviews: u32,
    delivery_time: &str,
    tag: Option<&str>,
    discount: Option<(&str, i64)>,
    photo: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        quantity_label: quantity_label.to_string(),
        price: Money::from_rupees(price),
        original_price: discount.map(|(_, mrp)| Money::from_rupees(mrp)),
        image: image_url(photo),
        rating,
        reviews,
        delivery_time: delivery_time.to_string(),
        tag: tag.map(str::to_string),
        discount: discount.map(|(label, _)| label.to_string()),
        is_favorite: false,
    }
}

const WHEAT: &str = "1574323347407-f5e1ad6d020b";
const RICE: &str = "1586201375761-83865001e31c";
const HOUSEHOLD: &str = "1558618666-fcd25c85cd64";
const CARE: &str = "1556228720-195a672e8a03";
const STATIONERY: &str = "1481627834876-b7833e8f5570";

#[rustfmt::skip]
fn sample_products() -> Vec<Product> {
    vec![
        item("1", "Wheat", "1 kg", 100, 4.5, 128, "30 mins", Some("Fresh"), Some(("10%", 110)), WHEAT),
        item("2", "Rice", "1 kg", 50, 4.3, 95, "25 mins", None, Some(("5%", 53)), RICE),
        item("3", "Soap", "10 bars", 50, 4.2, 87, "20 mins", Some("Hygiene"), None, HOUSEHOLD),
        item("4", "Shampoo", "100 sachets", 100, 4.4, 156, "35 mins", Some("Personal Care"), Some(("15%", 118)), CARE),
        item("5", "Sugar", "1 kg", 60, 4.1, 73, "25 mins", None, None, "1587049352846-4a222e784d38"),
        item("6", "Cooking Oil", "1 litre", 120, 4.6, 201, "30 mins", Some("Cooking"), Some(("8%", 130)), "1474979266404-7eaacbcd87c5"),
        item("7", "Salt", "1 kg", 25, 4.0, 45, "15 mins", None, None, "1609501676725-7186f757a123"),
        item("8", "Atta (Flour)", "1 kg", 90, 4.4, 134, "25 mins", Some("Fresh"), Some(("12%", 102)), WHEAT),
        item("9", "Dal (Lentils)", "1 kg", 120, 4.5, 167, "30 mins", Some("Protein Rich"), Some(("10%", 133)), RICE),
        item("10", "Biscuits", "10 packs", 100, 4.3, 89, "20 mins", Some("Snacks"), None, "1558961363-fa8fdf82db35"),
        item("11", "Sanitary Pads", "10 pieces", 80, 4.6, 234, "25 mins", Some("Personal Care"), Some(("20%", 100)), CARE),
        item("12", "Toothpaste", "5 tubes", 100, 4.4, 178, "30 mins", Some("Oral Care"), Some(("15%", 118)), HOUSEHOLD),
        item("13", "Toothbrush", "10 pieces", 50, 4.2, 67, "20 mins", Some("Oral Care"), None, HOUSEHOLD),
        item("14", "Detergent Powder", "1 kg", 70, 4.3, 112, "25 mins", Some("Cleaning"), Some(("10%", 78)), HOUSEHOLD),
        item("15", "Milk (Tetra Pack)", "5 litres", 300, 4.7, 289, "35 mins", Some("Dairy"), Some(("5%", 316)), "1550583724-b2692b85b150"),
        item("16", "Blanket", "1 piece", 250, 4.5, 156, "45 mins", Some("Home & Living"), Some(("18%", 305)), "1586023492125-27b2c045efd7"),
        item("17", "Slippers", "5 pairs", 300, 4.4, 198, "40 mins", Some("Footwear"), Some(("12%", 341)), "1549298916-b41d501d3772"),
        item("18", "School Notebooks", "10 pieces", 100, 4.6, 145, "30 mins", Some("Education"), Some(("15%", 118)), STATIONERY),
        item("19", "Pens & Pencils", "20 pieces", 50, 4.3, 78, "20 mins", Some("Education"), None, STATIONERY),
        item("20", "Mosquito Repellent", "10 coils", 60, 4.2, 92, "25 mins", Some("Health"), Some(("8%", 65)), HOUSEHOLD),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_sample_catalog_is_valid() {
        let sample = InMemoryCatalog::sample();
        assert_eq!(sample.len(), 20);

        // Re-validating the sample data must succeed
        let rebuilt = InMemoryCatalog::new(sample.all().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 20);
    }

    #[test]
    fn test_get_and_unit_price() {
        let catalog = InMemoryCatalog::sample();

        assert_eq!(catalog.get("1").unwrap().name, "Wheat");
        assert_eq!(catalog.unit_price("5"), Some(Money::from_rupees(60)));
        assert_eq!(catalog.unit_price("7"), Some(Money::from_rupees(25)));
        assert!(catalog.get("99").is_none());
        assert!(matches!(
            catalog.require("99"),
            Err(CoreError::ProductNotFound(id)) if id == "99"
        ));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = InMemoryCatalog::sample();

        let hits = catalog.search("RICE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Rice");
    }

    #[test]
    fn test_search_blank_query_returns_nothing() {
        let catalog = InMemoryCatalog::sample();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn test_search_keeps_catalog_order() {
        let catalog = InMemoryCatalog::sample();

        // "Toothpaste" (12) and "Toothbrush" (13)
        let ids: Vec<&str> = catalog.search("tooth").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["12", "13"]);

        // substring, not prefix
        let ids: Vec<&str> = catalog.search("(").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["8", "9", "15"]);
    }

    #[test]
    fn test_recommendations() {
        let catalog = InMemoryCatalog::sample();

        let picks = catalog.recommendations(&["15"], 3);
        let ids: Vec<&str> = picks.iter().map(|p| p.id.as_str()).collect();
        // 4.6 ties: Cooking Oil (6), Sanitary Pads (11), School Notebooks (18)
        assert_eq!(ids, vec!["6", "11", "18"]);

        let top = catalog.recommendations(&[], 1);
        assert_eq!(top[0].id, "15");

        assert!(catalog.recommendations(&[], 0).is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut products = InMemoryCatalog::sample().all().to_vec();
        products[1].id = "1".to_string();

        let err = InMemoryCatalog::new(products).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateProduct(id) if id == "1"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut products = InMemoryCatalog::sample().all().to_vec();
        products[0].price = Money::from_paise(-100);

        let err = InMemoryCatalog::try_from(products).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Negative { .. })));
    }
}
