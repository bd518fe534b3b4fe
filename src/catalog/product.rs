//! Product Model
//!
//! Product records, the create/update payloads, and field validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

// == Product Status ==
/// Publication state of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
    #[default]
    Draft,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Draft => "draft",
        }
    }

    /// Parses the wire spelling (`active`, `inactive`, `draft`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(ProductStatus::Active),
            "inactive" => Some(ProductStatus::Inactive),
            "draft" => Some(ProductStatus::Draft),
            _ => None,
        }
    }
}

// == Product ==
/// A catalog record as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    pub stock: u32,
    pub sku: String,
    pub status: ProductStatus,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a fresh record from validated input.
    pub(crate) fn from_input(id: String, input: ProductInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            original_price: input.original_price,
            category: input.category,
            subcategory: input.subcategory,
            images: input.images,
            stock: input.stock,
            sku: input.sku,
            status: input.status,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with `patch` merged in. Identity fields are untouched.
    pub(crate) fn merged(&self, patch: ProductPatch) -> Self {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        if let Some(price) = patch.price {
            next.price = price;
        }
        if let Some(original_price) = patch.original_price {
            next.original_price = original_price;
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(subcategory) = patch.subcategory {
            next.subcategory = subcategory;
        }
        if let Some(images) = patch.images {
            next.images = images;
        }
        if let Some(stock) = patch.stock {
            next.stock = stock;
        }
        if let Some(sku) = patch.sku {
            next.sku = sku;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(tags) = patch.tags {
            next.tags = tags;
        }
        next
    }

    /// Checks every field constraint on the record.
    pub fn validate(&self) -> Result<()> {
        validate_fields(Fields {
            name: &self.name,
            description: &self.description,
            price: self.price,
            original_price: self.original_price,
            category: &self.category,
            images: &self.images,
            sku: &self.sku,
        })
    }

    /// Case-insensitive substring match on name, description or any tag.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

// == Product Input ==
/// Field values for a new product. Built from a request body by
/// [`crate::models::CreateProductRequest`].
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: String,
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    pub stock: u32,
    pub sku: String,
    pub status: ProductStatus,
    pub tags: Vec<String>,
}

impl ProductInput {
    /// Checks every field constraint on the input.
    pub fn validate(&self) -> Result<()> {
        validate_fields(Fields {
            name: &self.name,
            description: &self.description,
            price: self.price,
            original_price: self.original_price,
            category: &self.category,
            images: &self.images,
            sku: &self.sku,
        })
    }
}

// == Product Patch ==
/// A partial update. `None` keeps the current value; for the two optional
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<Option<f64>>,
    pub category: Option<String>,
    pub subcategory: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    pub stock: Option<u32>,
    pub sku: Option<String>,
    pub status: Option<ProductStatus>,
    pub tags: Option<Vec<String>>,
}

// == Validation ==
struct Fields<'a> {
    name: &'a str,
    description: &'a str,
    price: f64,
    original_price: Option<f64>,
    category: &'a str,
    images: &'a [String],
    sku: &'a str,
}

fn validate_fields(f: Fields<'_>) -> Result<()> {
    require_text("name", f.name)?;
    require_text("description", f.description)?;
    require_positive("price", f.price)?;
    if let Some(original) = f.original_price {
        require_positive("originalPrice", original)?;
    }
    require_text("category", f.category)?;
    require_text("sku", f.sku)?;
    if f.images.is_empty() {
        return Err(CatalogError::validation(
            "images",
            "at least one image is required",
        ));
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CatalogError::validation(
            field,
            "must be a finite number greater than 0",
        ));
    }
    Ok(())
}
