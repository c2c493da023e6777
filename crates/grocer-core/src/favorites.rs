//! # Favorites
//!
//! The heart icon on product cards. Session-only, like the cart.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Catalog;

/// Set of favorited product ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

impl Favorites {
    /// Seeds the set from the catalog's `is_favorite` defaults.
    pub fn seeded_from(catalog: &impl Catalog) -> Self {
        Favorites {
            ids: catalog
                .all()
                .iter()
                .filter(|p| p.is_favorite)
                .map(|p| p.id.clone())
                .collect(),
        }
    }

    /// Flips a product in or out. Returns whether it is now a favorite.
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.ids.remove(product_id) {
            false
        } else {
            self.ids.insert(product_id.to_string());
            true
        }
    }

    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.ids.contains(product_id)
    }

    /// Favorited ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
