//! Cache/store consistency properties.
//!
//! After every acknowledged write, a cached read must equal a fresh evaluation
//! over the current store contents.

use catalog_cache::cache::ResponseCache;
use catalog_cache::catalog::{
    evaluate, Product, ProductInput, ProductPatch, ProductStatus, ProductStore, QuerySpec,
    SortBy, SortOrder,
};
use catalog_cache::CacheCoordinator;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create { name: String, price: u16, status: ProductStatus },
    Update { slot: usize, price: u16 },
    Delete { slot: usize },
    Read { query: usize },
}

fn status_strategy() -> impl Strategy<Value = ProductStatus> {
    prop_oneof![
        Just(ProductStatus::Active),
        Just(ProductStatus::Inactive),
        Just(ProductStatus::Draft),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => ("[a-c]{1,4}", 1u16..50, status_strategy())
            .prop_map(|(name, price, status)| Op::Create { name, price, status }),
        2 => (0usize..8, 1u16..50).prop_map(|(slot, price)| Op::Update { slot, price }),
        1 => (0usize..8).prop_map(|slot| Op::Delete { slot }),
        4 => (0usize..4).prop_map(|query| Op::Read { query }),
    ]
}

fn queries() -> Vec<QuerySpec> {
    vec![
        QuerySpec::default(),
        QuerySpec {
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
            limit: 2,
            ..Default::default()
        },
        QuerySpec {
            status: Some(ProductStatus::Active),
            ..Default::default()
        },
        QuerySpec {
            search: Some("A".to_string()),
            sort_by: SortBy::Name,
            page: 2,
            limit: 1,
            ..Default::default()
        },
    ]
}

fn input(name: &str, price: u16, status: ProductStatus) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: "generated".to_string(),
        price: price as f64,
        original_price: None,
        category: "general".to_string(),
        subcategory: None,
        images: vec!["img.jpg".to_string()],
        stock: 1,
        sku: "GEN".to_string(),
        status,
        tags: Vec::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_cached_reads_match_live_store(ops in prop::collection::vec(op_strategy(), 1..40)) {
        tokio_test::block_on(async {
            let coordinator = CacheCoordinator::new(ProductStore::new(), ResponseCache::new(64));
            // Newest first, mirroring store order
            let mut model: Vec<Product> = Vec::new();
            let queries = queries();

            for op in ops {
                match op {
                    Op::Create { name, price, status } => {
                        let product = coordinator.create(input(&name, price, status)).await.unwrap();
                        model.insert(0, product);
                    }
                    Op::Update { slot, price } => {
                        if slot < model.len() {
                            let patch = ProductPatch { price: Some(price as f64), ..Default::default() };
                            let updated = coordinator.update(&model[slot].id, patch).await.unwrap();
                            model[slot] = updated;
                        }
                    }
                    Op::Delete { slot } => {
                        if slot < model.len() {
                            let gone = model.remove(slot);
                            coordinator.delete(&gone.id).await.unwrap();
                        }
                    }
                    Op::Read { query } => {
                        let query = &queries[query];
                        let served = coordinator.fetch_page(query).await.unwrap();
                        let fresh = evaluate(&model, query).unwrap();
                        prop_assert_eq!(served, fresh);
                    }
                }
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
