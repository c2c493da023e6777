//! # Catalog State
//!
//! The product catalog plus the session favorites set.
//!
//! The catalog is read-only after startup, so it is shared through an `Arc`
//! with no lock. Favorites change on every heart tap and sit behind a mutex.

use std::sync::{Arc, Mutex};

use grocer_core::{Favorites, InMemoryCatalog, Product};

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<InMemoryCatalog>,
    favorites: Arc<Mutex<Favorites>>,
}

impl CatalogState {
    /// Wraps a catalog and seeds favorites from its defaults.
    pub fn new(catalog: InMemoryCatalog) -> Self {
        let favorites = Favorites::seeded_from(&catalog);
        CatalogState {
            catalog: Arc::new(catalog),
            favorites: Arc::new(Mutex::new(favorites)),
        }
    }

    pub fn catalog(&self) -> &InMemoryCatalog {
        &self.catalog
    }

    /// Executes a function with write access to the favorites.
    pub fn with_favorites_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Favorites) -> R,
    {
        let mut favorites = self.favorites.lock().expect("Favorites mutex poisoned");
        f(&mut favorites)
    }

    /// A product as the front end should see it: `is_favorite` reflects the
    /// session, not the catalog default.
    pub fn present(&self, product: &Product) -> Product {
        let favorites = self.favorites.lock().expect("Favorites mutex poisoned");
        Product {
            is_favorite: favorites.is_favorite(&product.id),
            ..product.clone()
        }
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        CatalogState::new(InMemoryCatalog::sample())
    }
}
