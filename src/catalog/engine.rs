//! Query Engine Module
//!
//! Pure evaluation of a listing query against a product snapshot.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::catalog::{CategorySummary, Page, Product, QuerySpec, SortBy, SortOrder};
use crate::error::Result;

// == Evaluate ==
/// Filters, sorts and paginates `products` according to `query`.
///
/// Deterministic for a given input: the sort is stable in both directions,
/// so products with equal keys keep their relative input order. A page past
/// the end yields an empty `products` list rather than an error.
pub fn evaluate(products: &[Product], query: &QuerySpec) -> Result<Page> {
    query.validate()?;

    let category = query.category_filter();
    let needle = query.search_needle();

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .filter(|p| needle.as_deref().map_or(true, |n| p.matches_search(n)))
        .filter(|p| query.status.map_or(true, |s| p.status == s))
        .collect();

    // slice::sort_by is stable
    matched.sort_by(|a, b| {
        let ordering = compare_by(a, b, query.sort_by);
        match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let total_count = matched.len() as u64;
    let page = query.effective_page();
    let limit = query.limit as u64;
    let offset = (page - 1).saturating_mul(limit);

    let products = if offset >= total_count {
        Vec::new()
    } else {
        matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect()
    };

    Ok(Page {
        products,
        total_count,
        page,
        limit,
        total_pages: total_count.div_ceil(limit),
    })
}

fn compare_by(a: &Product, b: &Product, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Name => a.name.cmp(&b.name),
        SortBy::Price => a.price.total_cmp(&b.price),
        SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        SortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortBy::Stock => a.stock.cmp(&b.stock),
    }
}

// == Summarize Categories ==
/// Distinct categories with their product counts, sorted by slug.
pub fn summarize_categories(products: &[Product]) -> Vec<CategorySummary> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for product in products {
        *counts.entry(product.category.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(slug, product_count)| CategorySummary {
            slug: slug.to_string(),
            product_count,
        })
        .collect()
}
