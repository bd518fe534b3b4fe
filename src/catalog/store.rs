//! Product Store Module
//!
//! Authoritative product collection: an id-keyed map plus a newest-first order index.

use std::collections::{HashMap, VecDeque};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{Product, ProductInput, ProductPatch};
use crate::error::{CatalogError, Result};

// == Product Store ==
/// Mutable product collection. Does no filtering or sorting of its own.
#[derive(Debug, Default)]
pub struct ProductStore {
    /// Records keyed by id
    products: HashMap<String, Product>,
    /// Ids in iteration order, front = most recently created
    order: VecDeque<String>,
}

impl ProductStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Seed ==
    /// Loads records in the given order, appended after any existing ones.
    ///
    /// Records whose id is already present replace the stored one in place.
    pub fn seed(&mut self, products: impl IntoIterator<Item = Product>) {
        for product in products {
            if !self.products.contains_key(&product.id) {
                self.order.push_back(product.id.clone());
            }
            self.products.insert(product.id.clone(), product);
        }
    }

    // == Create ==
    /// Validates `input`, assigns id and timestamps, and places the record first.
    pub fn create(&mut self, input: ProductInput) -> Result<Product> {
        input.validate()?;

        let mut id = Uuid::new_v4().to_string();
        while self.products.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }

        let product = Product::from_input(id.clone(), input, Utc::now());
        self.products.insert(id.clone(), product.clone());
        self.order.push_front(id);

        debug!(id = %product.id, "product created");
        Ok(product)
    }

    // == Get By Id ==
    pub fn get_by_id(&self, id: &str) -> Result<Product> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    // == Update ==
    /// Merges `patch` into the record and bumps `updated_at`.
    ///
    /// The merged record is validated before it replaces the stored one.
    pub fn update(&mut self, id: &str, patch: ProductPatch) -> Result<Product> {
        let current = self
            .products
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let mut next = current.merged(patch);
        next.validate()?;
        // Wall clock may step backwards; created_at <= updated_at must hold.
        next.updated_at = Utc::now().max(current.created_at);

        self.products.insert(id.to_string(), next.clone());
        debug!(id = %id, "product updated");
        Ok(next)
    }

    // == Delete ==
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if self.products.remove(id).is_none() {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        self.order.retain(|k| k != id);
        debug!(id = %id, "product deleted");
        Ok(())
    }

    // == List ==
    /// Returns an owned snapshot in store order.
    pub fn list(&self) -> Vec<Product> {
        self.order
            .iter()
            .filter_map(|id| self.products.get(id))
            .cloned()
            .collect()
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.products.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::tests::sample_input;
    use crate::catalog::ProductStatus;

    #[test]
    fn test_store_new() {
        let store = ProductStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_create_assigns_identity() {
        let mut store = ProductStore::new();
        let product = store.create(sample_input("Lamp")).unwrap();

        assert!(!product.id.is_empty());
        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(store.get_by_id(&product.id).unwrap(), product);
    }

    #[test]
    fn test_create_prepends() {
        let mut store = ProductStore::new();
        let first = store.create(sample_input("First")).unwrap();
        let second = store.create(sample_input("Second")).unwrap();

        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_create_invalid_leaves_store_untouched() {
        let mut store = ProductStore::new();
        let mut input = sample_input("Lamp");
        input.price = -5.0;

        let result = store.create(input);
        assert!(matches!(
            result,
            Err(CatalogError::Validation { field: "price", .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_nonexistent() {
        let store = ProductStore::new();
        assert!(matches!(
            store.get_by_id("missing"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_merges_and_bumps_timestamp() {
        let mut store = ProductStore::new();
        let product = store.create(sample_input("Lamp")).unwrap();

        let patch = ProductPatch {
            status: Some(ProductStatus::Inactive),
            stock: Some(0),
            ..Default::default()
        };
        let updated = store.update(&product.id, patch).unwrap();

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.name, "Lamp");
        assert_eq!(updated.status, ProductStatus::Inactive);
        assert_eq!(updated.stock, 0);
        assert_eq!(updated.created_at, product.created_at);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = ProductStore::new();
        let older = store.create(sample_input("Older")).unwrap();
        let newer = store.create(sample_input("Newer")).unwrap();

        let patch = ProductPatch {
            name: Some("Older v2".to_string()),
            ..Default::default()
        };
        store.update(&older.id, patch).unwrap();

        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[test]
    fn test_update_invalid_is_rejected_atomically() {
        let mut store = ProductStore::new();
        let product = store.create(sample_input("Lamp")).unwrap();

        let patch = ProductPatch {
            name: Some("Renamed".to_string()),
            images: Some(Vec::new()),
            ..Default::default()
        };
        let result = store.update(&product.id, patch);

        assert!(matches!(
            result,
            Err(CatalogError::Validation { field: "images", .. })
        ));
        assert_eq!(store.get_by_id(&product.id).unwrap(), product);
    }

    #[test]
    fn test_update_nonexistent() {
        let mut store = ProductStore::new();
        let result = store.update("missing", ProductPatch::default());
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let mut store = ProductStore::new();
        let keep = store.create(sample_input("Keep")).unwrap();
        let gone = store.create(sample_input("Gone")).unwrap();

        store.delete(&gone.id).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].id, keep.id);
        assert!(matches!(
            store.get_by_id(&gone.id),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_nonexistent() {
        let mut store = ProductStore::new();
        assert!(matches!(
            store.delete("missing"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let mut store = ProductStore::new();
        let product = store.create(sample_input("Lamp")).unwrap();
        let snapshot = store.list();

        store.delete(&product.id).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_seed_preserves_order() {
        let mut seeded = ProductStore::new();
        let mut source = ProductStore::new();
        let a = source.create(sample_input("A")).unwrap();
        let b = source.create(sample_input("B")).unwrap();

        seeded.seed(vec![a.clone(), b.clone()]);

        let ids: Vec<String> = seeded.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}
