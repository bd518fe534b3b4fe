//! Cache Coordinator
//!
//! Serves reads through the response cache and applies writes to the product
//! store, flushing the cache inside the same critical section.
//!
//! Lock order is always store, then cache. A write holds the store write lock
//! until its invalidation is done. A read miss holds the store read lock while
//! it evaluates and stores the result, so a write cannot land between the two
//! and leave a stale page behind.

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{item_key, CacheStats, ResponseCache, CATEGORIES_KEY};
use crate::catalog::{
    evaluate, summarize_categories, CategorySummary, Page, Product, ProductInput, ProductPatch,
    ProductStore, QuerySpec,
};
use crate::config::Config;
use crate::error::Result;

/// Default TTL in seconds for cached listing pages
pub const LIST_TTL_SECS: u64 = 600;

/// Default TTL in seconds for cached single products
pub const ITEM_TTL_SECS: u64 = 3600;

// == Cache Coordinator ==
#[derive(Debug)]
pub struct CacheCoordinator {
    store: RwLock<ProductStore>,
    cache: RwLock<ResponseCache>,
    list_ttl: u64,
    item_ttl: u64,
}

impl CacheCoordinator {
    // == Constructor ==
    pub fn new(store: ProductStore, cache: ResponseCache) -> Self {
        Self {
            store: RwLock::new(store),
            cache: RwLock::new(cache),
            list_ttl: LIST_TTL_SECS,
            item_ttl: ITEM_TTL_SECS,
        }
    }

    /// Overrides the listing and single-product TTLs (seconds).
    pub fn with_ttls(mut self, list_ttl: u64, item_ttl: u64) -> Self {
        self.list_ttl = list_ttl;
        self.item_ttl = item_ttl;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ProductStore::new(), ResponseCache::new(config.cache_max_entries))
            .with_ttls(config.list_ttl, config.item_ttl)
    }

    // == Fetch Page ==
    /// Returns the listing page for `query`, from cache when fresh.
    pub async fn fetch_page(&self, query: &QuerySpec) -> Result<Page> {
        query.validate()?;
        let key = query.canonical_key();

        if let Some(page) = self.cached::<Page>(&key).await {
            return Ok(page);
        }

        let store = self.store.read().await;
        let page = evaluate(&store.list(), query)?;
        self.remember(key, &page, self.list_ttl).await;
        Ok(page)
    }

    // == Fetch By Id ==
    /// Returns a single product, from cache when fresh. Unknown ids are not cached.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Product> {
        let key = item_key(id);

        if let Some(product) = self.cached::<Product>(&key).await {
            return Ok(product);
        }

        let store = self.store.read().await;
        let product = store.get_by_id(id)?;
        self.remember(key, &product, self.item_ttl).await;
        Ok(product)
    }

    // == Fetch Categories ==
    pub async fn fetch_categories(&self) -> Result<Vec<CategorySummary>> {
        if let Some(summary) = self.cached::<Vec<CategorySummary>>(CATEGORIES_KEY).await {
            return Ok(summary);
        }

        let store = self.store.read().await;
        let summary = summarize_categories(&store.list());
        self.remember(CATEGORIES_KEY.to_string(), &summary, self.item_ttl)
            .await;
        Ok(summary)
    }

    // == Create ==
    pub async fn create(&self, input: ProductInput) -> Result<Product> {
        let mut store = self.store.write().await;
        let product = store.create(input)?;

        let flushed = self.cache.write().await.invalidate_all();
        info!(id = %product.id, flushed, "Product created");
        Ok(product)
    }

    // == Update ==
    pub async fn update(&self, id: &str, patch: ProductPatch) -> Result<Product> {
        let mut store = self.store.write().await;
        let product = store.update(id, patch)?;

        let flushed = {
            let mut cache = self.cache.write().await;
            cache.invalidate_id(id);
            cache.invalidate_all()
        };
        info!(id = %id, flushed, "Product updated");
        Ok(product)
    }

    // == Delete ==
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.delete(id)?;

        let flushed = {
            let mut cache = self.cache.write().await;
            cache.invalidate_id(id);
            cache.invalidate_all()
        };
        info!(id = %id, flushed, "Product deleted");
        Ok(())
    }

    // == Seed ==
    /// Loads an initial catalog; treated like any other write.
    pub async fn seed(&self, products: Vec<Product>) {
        let mut store = self.store.write().await;
        let count = products.len();
        store.seed(products);
        self.cache.write().await.invalidate_all();
        info!(count, "Catalog seeded");
    }

    // == Maintenance ==
    /// Sweeps expired cache entries, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.cache.write().await.cleanup_expired()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    pub async fn product_count(&self) -> usize {
        self.store.read().await.len()
    }

    // == Cache Helpers ==
    /// Cache lookup under a read guard. Backend errors count as a miss. A miss
    /// drops the stale entry behind it under a short write guard.
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let lookup = self.cache.read().await.get::<T>(key);
        match lookup {
            Ok(Some(value)) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Ok(None) => {
                debug!(key, "cache miss");
                self.cache.write().await.evict_expired(key);
                None
            }
            Err(err) => {
                warn!(key, error = %err, "cache read failed, serving from store");
                self.cache.write().await.discard(key);
                None
            }
        }
    }

    async fn remember<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        if let Err(err) = self.cache.write().await.set(key, value, ttl) {
            warn!(error = %err, "cache write failed, response served uncached");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MAX_KEY_LENGTH;
    use crate::catalog::{seed::demo_catalog, ProductStatus, SortBy, SortOrder};
    use crate::error::CatalogError;
    use std::sync::Arc;

    fn coordinator() -> CacheCoordinator {
        CacheCoordinator::new(ProductStore::new(), ResponseCache::new(100))
    }

    fn input(name: &str, price: f64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            original_price: None,
            category: "electronics".to_string(),
            subcategory: None,
            images: vec!["https://cdn.example.com/p.jpg".to_string()],
            stock: 3,
            sku: "SKU".to_string(),
            status: ProductStatus::Active,
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_caches_result() {
        let coordinator = coordinator();
        coordinator.seed(demo_catalog()).await;

        let first = coordinator.fetch_page(&QuerySpec::default()).await.unwrap();
        let second = coordinator.fetch_page(&QuerySpec::default()).await.unwrap();

        assert_eq!(first, second);
        let stats = coordinator.cache_stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[tokio::test]
    async fn test_create_flushes_default_page() {
        let coordinator = coordinator();
        coordinator.seed(demo_catalog()).await;

        let before = coordinator.fetch_page(&QuerySpec::default()).await.unwrap();
        let created = coordinator.create(input("Yeni Ürün", 10.0)).await.unwrap();
        assert_eq!(coordinator.cache_stats().await.total_entries, 0);

        let after = coordinator.fetch_page(&QuerySpec::default()).await.unwrap();
        assert_eq!(after.total_count, before.total_count + 1);
        assert_eq!(after.products[0].id, created.id);
    }

    #[tokio::test]
    async fn test_update_reflected_in_page_and_item() {
        let coordinator = coordinator();
        coordinator.seed(demo_catalog()).await;

        let by_price = QuerySpec {
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        coordinator.fetch_page(&by_price).await.unwrap();
        coordinator.fetch_by_id("3").await.unwrap();

        let patch = ProductPatch {
            price: Some(99_999.0),
            ..Default::default()
        };
        coordinator.update("3", patch).await.unwrap();

        let page = coordinator.fetch_page(&by_price).await.unwrap();
        assert_eq!(page.products.last().unwrap().id, "3");
        let item = coordinator.fetch_by_id("3").await.unwrap();
        assert_eq!(item.price, 99_999.0);
    }

    #[tokio::test]
    async fn test_delete_reflected_everywhere() {
        let coordinator = coordinator();
        coordinator.seed(demo_catalog()).await;
        coordinator.fetch_by_id("1").await.unwrap();
        coordinator.fetch_categories().await.unwrap();

        coordinator.delete("1").await.unwrap();

        assert!(matches!(
            coordinator.fetch_by_id("1").await,
            Err(CatalogError::NotFound(_))
        ));
        let page = coordinator.fetch_page(&QuerySpec::default()).await.unwrap();
        assert_eq!(page.total_count, 2);
        let categories = coordinator.fetch_categories().await.unwrap();
        assert_eq!(categories[0].product_count, 1);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_cache() {
        let coordinator = coordinator();
        coordinator.seed(demo_catalog()).await;
        coordinator.fetch_page(&QuerySpec::default()).await.unwrap();

        assert!(coordinator.delete("missing").await.is_err());
        assert!(coordinator.create(input("", 1.0)).await.is_err());

        assert_eq!(coordinator.cache_stats().await.total_entries, 1);
    }

    #[tokio::test]
    async fn test_search_returns_only_matching_product() {
        let coordinator = coordinator();
        coordinator.create(input("Bluetooth Kulaklık", 899.0)).await.unwrap();
        coordinator
            .create(input("Premium Kahve Makinesi", 2499.0))
            .await
            .unwrap();

        let query = QuerySpec {
            search: Some("kahve".to_string()),
            ..Default::default()
        };
        let page = coordinator.fetch_page(&query).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.products[0].name, "Premium Kahve Makinesi");
    }

    #[tokio::test]
    async fn test_invalid_limit_rejected_before_cache() {
        let coordinator = coordinator();
        let query = QuerySpec {
            limit: 0,
            ..Default::default()
        };

        assert!(matches!(
            coordinator.fetch_page(&query).await,
            Err(CatalogError::InvalidQuery(_))
        ));
        assert_eq!(coordinator.cache_stats().await.misses, 0);
    }

    #[tokio::test]
    async fn test_unknown_id_not_cached() {
        let coordinator = coordinator();
        assert!(coordinator.fetch_by_id("nope").await.is_err());
        assert_eq!(coordinator.cache_stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_oversized_key_falls_through() {
        let coordinator = coordinator();
        coordinator.seed(demo_catalog()).await;
        let query = QuerySpec {
            search: Some("k".repeat(MAX_KEY_LENGTH)),
            ..Default::default()
        };

        let page = coordinator.fetch_page(&query).await.unwrap();
        assert_eq!(page.total_count, 0);
        assert_eq!(coordinator.cache_stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_corrupt_entry_falls_through() {
        let coordinator = coordinator();
        coordinator.seed(demo_catalog()).await;
        coordinator
            .cache
            .write()
            .await
            .set(item_key("1"), &"not a product", 3600)
            .unwrap();

        let product = coordinator.fetch_by_id("1").await.unwrap();
        assert_eq!(product.name, "Premium Kahve Makinesi");
        // The fallback result replaced the corrupt entry
        let cached: Option<Product> = coordinator.cache.read().await.get(&item_key("1")).unwrap();
        assert_eq!(cached, Some(product));
    }

    #[tokio::test]
    async fn test_hit_proceeds_while_other_readers_hold_cache() {
        let coordinator = coordinator();
        coordinator.seed(demo_catalog()).await;
        let warm = coordinator.fetch_page(&QuerySpec::default()).await.unwrap();

        let other_reader = coordinator.cache.read().await;
        let hit = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            coordinator.fetch_page(&QuerySpec::default()),
        )
        .await
        .expect("cache hit blocked behind another reader")
        .unwrap();
        drop(other_reader);

        assert_eq!(hit, warm);
        assert_eq!(coordinator.cache_stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_evicted_by_next_lookup() {
        let coordinator = coordinator().with_ttls(0, 0);
        coordinator.seed(demo_catalog()).await;
        coordinator.fetch_by_id("1").await.unwrap();
        assert_eq!(coordinator.cache_stats().await.total_entries, 1);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        assert_eq!(coordinator.cached::<Product>(&item_key("1")).await, None);
        assert_eq!(coordinator.cache_stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_concurrent_writes_leave_no_stale_page() {
        let coordinator = Arc::new(coordinator());
        let mut handles = Vec::new();

        for i in 0..20 {
            let c = coordinator.clone();
            handles.push(tokio::spawn(async move {
                c.create(input(&format!("Item {}", i), 1.0 + i as f64))
                    .await
                    .unwrap();
                c.fetch_page(&QuerySpec::default()).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let page = coordinator.fetch_page(&QuerySpec::default()).await.unwrap();
        assert_eq!(page.total_count, 20);
        assert_eq!(coordinator.product_count().await, 20);
    }
}
