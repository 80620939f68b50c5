//! Favorites (wishlist) store.
//!
//! A per-user set of product ids with toggle semantics. Like the session
//! store, this is a single owned container with a narrow mutation API:
//! many surfaces read it, nothing mutates the set directly.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use snackkart_core::ProductId;

/// Shared, thread-safe wishlist. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    inner: Arc<RwLock<HashSet<ProductId>>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership for a product; returns the new membership state.
    pub fn toggle(&self, product_id: ProductId) -> bool {
        let mut set = self.inner.write().expect("favorites lock poisoned");
        if set.remove(&product_id) {
            false
        } else {
            set.insert(product_id);
            true
        }
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.inner
            .read()
            .expect("favorites lock poisoned")
            .contains(&product_id)
    }

    pub fn ids(&self) -> Vec<ProductId> {
        self.inner
            .read()
            .expect("favorites lock poisoned")
            .iter()
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("favorites lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.write().expect("favorites lock poisoned").clear();
    }
}
