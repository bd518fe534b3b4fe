//! Query Module
//!
//! Listing parameters, the computed page shape, and canonical cache keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Product, ProductStatus};
use crate::error::{CatalogError, Result};

// == Public Constants ==
/// Page size used when the caller gives none
pub const DEFAULT_LIMIT: i64 = 12;

/// Prefix of every listing cache key
pub const LIST_KEY_PREFIX: &str = "products:";

// == Sort Key ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Price,
    #[default]
    CreatedAt,
    UpdatedAt,
    Stock,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Price => "price",
            SortBy::CreatedAt => "createdAt",
            SortBy::UpdatedAt => "updatedAt",
            SortBy::Stock => "stock",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name" => Some(SortBy::Name),
            "price" => Some(SortBy::Price),
            "createdAt" => Some(SortBy::CreatedAt),
            "updatedAt" => Some(SortBy::UpdatedAt),
            "stock" => Some(SortBy::Stock),
            _ => None,
        }
    }
}

// == Sort Direction ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

// == Query Spec ==
/// Filter, sort and pagination parameters of a listing request.
///
/// `page` and `limit` are kept signed so out-of-range values reach the
/// engine, which clamps `page < 1` and rejects `limit < 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub category: Option<String>,
    pub search: Option<String>,
    pub status: Option<ProductStatus>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub page: i64,
    pub limit: i64,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            status: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl QuerySpec {
    // == Validate ==
    /// Rejects a non-positive `limit`.
    pub fn validate(&self) -> Result<()> {
        if self.limit < 1 {
            return Err(CatalogError::InvalidQuery(format!(
                "limit must be at least 1, got {}",
                self.limit
            )));
        }
        Ok(())
    }

    // == Effective Page ==
    /// Page number with `page < 1` clamped to 1.
    pub fn effective_page(&self) -> u64 {
        self.page.max(1) as u64
    }

    /// Category filter, with an empty string treated as unset.
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Lowercased search needle, with an empty string treated as unset.
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    // == Canonical Key ==
    /// Deterministic cache key for this query.
    ///
    /// Fields are emitted in sorted name order with defaults resolved, the
    /// page clamped and the search term lowercased, so equivalent queries
    /// always share a key.
    pub fn canonical_key(&self) -> String {
        let mut fields: BTreeMap<&'static str, Value> = BTreeMap::new();
        if let Some(category) = self.category_filter() {
            fields.insert("category", Value::from(category));
        }
        if let Some(needle) = self.search_needle() {
            fields.insert("search", Value::from(needle));
        }
        if let Some(status) = self.status {
            fields.insert("status", Value::from(status.as_str()));
        }
        fields.insert("sortBy", Value::from(self.sort_by.as_str()));
        fields.insert("sortOrder", Value::from(self.sort_order.as_str()));
        fields.insert("page", Value::from(self.effective_page()));
        fields.insert("limit", Value::from(self.limit));

        // A BTreeMap of strings and numbers always serializes.
        let encoded = serde_json::to_string(&fields).unwrap_or_default();
        format!("{}{}", LIST_KEY_PREFIX, encoded)
    }
}

// == Page ==
/// A computed slice of matching products plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub products: Vec<Product>,
    pub total_count: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

// == Category Summary ==
/// A category slug with the number of products filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub slug: String,
    pub product_count: u64,
}
